use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

const HEADER: [&str; 5] = [
    "Channel Name",
    "Channel ID",
    "List of Users (Emails)",
    "is_external",
    "Integrations/Apps",
];

// Multi-valued cells are joined with this
const LIST_SEPARATOR: &str = ", ";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("could not write report: {0}")]
    Io(#[from] io::Error),

    #[error("could not write report: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug)]
pub struct ReportRow {
    pub channel_name: String,
    pub channel_id: String,
    pub emails: Vec<String>,
    pub is_external: bool,
    pub integrations: Vec<String>,
}

impl ReportRow {
    fn to_record(&self) -> [String; 5] {
        [
            self.channel_name.clone(),
            self.channel_id.clone(),
            self.emails.join(LIST_SEPARATOR),
            if self.is_external { "True" } else { "False" }.to_owned(),
            self.integrations.join(LIST_SEPARATOR),
        ]
    }
}

/// First `<base><n>.csv` in `dir`, counting from 1, that does not exist yet.
pub fn next_filename(dir: &Path, base_name: &str) -> PathBuf {
    let mut index = 1u32;
    loop {
        let candidate = dir.join(format!("{}{}.csv", base_name, index));
        if !candidate.exists() {
            return candidate;
        }
        index += 1;
    }
}

/// A report file being filled in, one row per channel.
///
/// The file is claimed with `create_new`, so a report that appeared between
/// probing and opening is never overwritten.
pub struct ReportWriter {
    path: PathBuf,
    writer: csv::Writer<File>,
    rows: usize,
}

impl ReportWriter {
    /// Picks the next free file name in `dir` and writes the header.
    pub fn create(dir: &Path, base_name: &str) -> Result<ReportWriter, ReportError> {
        let path = next_filename(dir, base_name);
        debug!("Writing report to {}", path.display());

        let file = OpenOptions::new().write(true).create_new(true).open(&path)?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(&HEADER)?;

        Ok(ReportWriter { path, writer, rows: 0 })
    }

    pub fn write_row(&mut self, row: &ReportRow) -> Result<(), ReportError> {
        self.writer.write_record(&row.to_record())?;
        self.rows += 1;
        Ok(())
    }

    /// Flushes the file and returns where it was written.
    pub fn finish(mut self) -> Result<PathBuf, ReportError> {
        self.writer.flush()?;
        debug!("Wrote {} rows to {}", self.rows, self.path.display());
        Ok(self.path)
    }
}
