#[macro_use]
extern crate serde_derive;

mod channels;
mod classify;
mod report;
mod run;
mod settings;
mod slack;
mod users;

use clap::Parser;
use settings::Settings;
use slack::Slack;
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Lists every channel of a Slack workspace with its members' emails,
/// connected external teams, and whether it looks external, as a CSV report.
#[derive(Parser)]
#[command(name = "slack-channel-report", version)]
struct Cli {
    /// Slack bot or user token
    #[arg(long, env = "SLACK_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Settings file (defaults to ~/.config/slack_channel_report.json)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory the report is written to
    #[arg(long, short)]
    output_dir: Option<PathBuf>,

    /// Email suffix of internal members, e.g. @example.com
    #[arg(long)]
    internal_domain: Option<String>,

    /// Parallel profile lookups per channel
    #[arg(long)]
    concurrency: Option<usize>,

    /// Log per-page and per-channel progress
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn apply(self, settings: &mut Settings) {
        if let Some(token) = self.token {
            settings.slack_token = token;
        }
        if let Some(output_dir) = self.output_dir {
            settings.output_dir = output_dir;
        }
        if let Some(internal_domain) = self.internal_domain {
            settings.internal_domain = internal_domain;
        }
        if let Some(concurrency) = self.concurrency {
            settings.member_concurrency = concurrency;
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "slack_channel_report=debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = Settings::load(cli.config.as_deref())?;
    cli.apply(&mut settings);
    settings.validate()?;

    let slack = Slack::new(&settings.slack_token)?;
    run::run(&slack, &settings).await?;

    Ok(())
}
