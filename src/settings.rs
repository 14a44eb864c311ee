use serde_json;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

static CONFIG_FILE_RELPATH: &'static str = ".config/slack_channel_report.json";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("could not read settings file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("error parsing settings file {path}, are you missing some settings? ({source})")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("no Slack token configured, pass --token or set SLACK_TOKEN")]
    MissingToken,

    #[error("invalid setting {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

// Every field is optional on disk; missing ones keep their defaults
#[derive(Deserialize, Default)]
struct SettingsFile {
    slack_token: Option<String>,
    internal_domain: Option<String>,
    external_prefix: Option<String>,
    channel_types: Option<String>,
    page_size: Option<u32>,
    output_dir: Option<PathBuf>,
    output_base_name: Option<String>,
    member_concurrency: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub slack_token: String,
    /// Email suffix that marks a member as internal, e.g. `@metabase.com`.
    pub internal_domain: String,
    /// Channel name prefix that marks a channel as a candidate external channel.
    pub external_prefix: String,
    pub channel_types: String,
    pub page_size: u32,
    pub output_dir: PathBuf,
    pub output_base_name: String,
    /// Parallel `users.info` lookups per channel. 1 keeps the run sequential.
    pub member_concurrency: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            slack_token: String::new(),
            internal_domain: "@metabase.com".to_owned(),
            external_prefix: "ext".to_owned(),
            channel_types: "public_channel,private_channel".to_owned(),
            page_size: 1000,
            output_dir: PathBuf::from("."),
            output_base_name: "channels_list".to_owned(),
            member_concurrency: 1,
        }
    }
}

impl Settings {
    /// Loads the settings file at `path`, or the default location when None.
    /// A missing default file just yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Settings, SettingsError> {
        let (path, required) = match path {
            Some(path) => (path.to_owned(), true),
            None => match get_settings_file_path() {
                Some(path) => (path, false),
                None => return Ok(Settings::default()),
            },
        };

        match fs::read_to_string(&path) {
            Ok(contents) => read_settings(&path, &contents),
            Err(err) if err.kind() == io::ErrorKind::NotFound && !required => Ok(Settings::default()),
            Err(source) => Err(SettingsError::Read { path, source }),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.slack_token.trim().is_empty() {
            return Err(SettingsError::MissingToken);
        }
        if self.page_size == 0 || self.page_size > 1000 {
            return Err(SettingsError::Invalid {
                key: "page_size",
                message: format!("{} is outside 1..=1000", self.page_size),
            });
        }
        if self.member_concurrency == 0 {
            return Err(SettingsError::Invalid {
                key: "member_concurrency",
                message: "must be at least 1".to_owned(),
            });
        }
        if !self.output_dir.is_dir() {
            return Err(SettingsError::Invalid {
                key: "output_dir",
                message: format!("{} is not a directory", self.output_dir.display()),
            });
        }
        if self.output_base_name.is_empty() {
            return Err(SettingsError::Invalid {
                key: "output_base_name",
                message: "must not be empty".to_owned(),
            });
        }
        Ok(())
    }
}

fn get_settings_file_path() -> Option<PathBuf> {
    let home = env::var("HOME").ok()?;
    Some(Path::new(&home).join(CONFIG_FILE_RELPATH))
}

fn read_settings(path: &Path, contents: &str) -> Result<Settings, SettingsError> {
    let file: SettingsFile = serde_json::from_str(contents).map_err(|source| SettingsError::Parse {
        path: path.to_owned(),
        source,
    })?;

    let defaults = Settings::default();
    Ok(Settings {
        slack_token: file.slack_token.unwrap_or(defaults.slack_token),
        internal_domain: file.internal_domain.unwrap_or(defaults.internal_domain),
        external_prefix: file.external_prefix.unwrap_or(defaults.external_prefix),
        channel_types: file.channel_types.unwrap_or(defaults.channel_types),
        page_size: file.page_size.unwrap_or(defaults.page_size),
        output_dir: file.output_dir.unwrap_or(defaults.output_dir),
        output_base_name: file.output_base_name.unwrap_or(defaults.output_base_name),
        member_concurrency: file.member_concurrency.unwrap_or(defaults.member_concurrency),
    })
}
