//! Record sink for crawl output
//!
//! One row per successfully visited page, appended to a CSV file that is
//! re-created with a header at the start of each run. The sink trait keeps
//! the crawl engine independent of the row-encoding mechanics.

use std::fs::File;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing records
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// The unit of crawl output: one row per visited page
///
/// Never mutated after creation; persisted immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub summary: String,
}

/// Append-only destination for page records
pub trait RecordSink {
    /// Appends one record; the row is fully written and flushed before return
    fn append(&mut self, record: &PageRecord) -> Result<(), SinkError>;
}

/// CSV-file sink with a `URL,Title,Summary` header row
pub struct CsvSink {
    writer: csv::Writer<File>,
}

impl CsvSink {
    /// Creates (or truncates) the CSV file and writes the header row
    ///
    /// Prior contents are discarded, so a run always starts from an empty
    /// sink with a header even if nothing else gets written.
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(["URL", "Title", "Summary"])?;
        writer.flush()?;
        tracing::info!("Created results file {}", path.display());
        Ok(Self { writer })
    }
}

impl RecordSink for CsvSink {
    fn append(&mut self, record: &PageRecord) -> Result<(), SinkError> {
        self.writer
            .write_record([&record.url, &record.title, &record.summary])?;
        self.writer.flush()?;
        tracing::info!("Saved record for {}", record.url);
        Ok(())
    }
}
