//! Daily activity report.
//!
//! Collects one day's activities oldest first, lays them out as one block per
//! activity and writes the result as a PDF named after the date.

pub mod layout;
pub mod pdf;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::ReportConfig;
use crate::error::{Error, Result};
use crate::storage::Storage;

use self::layout::LayoutSettings;

/// Result of a report request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The day had no activities; no file was written.
    Empty {
        /// The requested day.
        date: String,
    },
    /// The report was written.
    Written {
        /// Location of the PDF.
        path: PathBuf,
        /// Number of activity blocks in it.
        entries: usize,
    },
}

/// Generator for daily reports.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    output_dir: PathBuf,
    file_prefix: String,
    title: String,
    settings: LayoutSettings,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::from_config(&ReportConfig::default())
    }
}

impl ReportGenerator {
    /// Create a generator from the report configuration.
    #[must_use]
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            file_prefix: config.file_prefix.clone(),
            title: config.title.clone(),
            settings: LayoutSettings::default(),
        }
    }

    /// Write reports into a different directory.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// File name of the report for a date, with path-unsafe characters replaced.
    #[must_use]
    pub fn file_name(&self, date: &str) -> String {
        format!("{}_{}.pdf", self.file_prefix, sanitize_date(date))
    }

    /// Full path of the report for a date.
    #[must_use]
    pub fn report_path(&self, date: &str) -> PathBuf {
        self.output_dir.join(self.file_name(date))
    }

    /// Render the report for a date to PDF bytes.
    ///
    /// Returns `None` when the day has no activities.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or the PDF backend fails.
    pub fn render(&self, storage: &Storage, date: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.build(storage, date)?.map(|(_, bytes)| bytes))
    }

    /// Generate and write the report for a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query, the PDF backend or writing the file fails.
    pub fn generate(&self, storage: &Storage, date: &str) -> Result<ReportOutcome> {
        let Some((entries, bytes)) = self.build(storage, date)? else {
            info!("No activities on {}, nothing to report", date);
            return Ok(ReportOutcome::Empty {
                date: date.to_string(),
            });
        };

        if !self.output_dir.as_os_str().is_empty() && !self.output_dir.exists() {
            std::fs::create_dir_all(&self.output_dir).map_err(|source| Error::DirectoryCreate {
                path: self.output_dir.clone(),
                source,
            })?;
        }

        let path = self.report_path(date);
        std::fs::write(&path, bytes)?;
        info!(
            "Wrote report for {} with {} entries to {}",
            date,
            entries,
            path.display()
        );

        Ok(ReportOutcome::Written { path, entries })
    }

    /// Query, lay out and render one day; `None` when the day is empty.
    fn build(&self, storage: &Storage, date: &str) -> Result<Option<(usize, Vec<u8>)>> {
        let rows = storage.list_activities_for_date_ascending(date)?;
        if rows.is_empty() {
            return Ok(None);
        }

        let title = format!("{} - {}", self.title, date);
        let document = layout::layout(&title, &rows, self.settings);
        debug!(
            "Laid out {} entries on {} pages for {}",
            rows.len(),
            document.pages.len(),
            date
        );
        let bytes = pdf::render(&document)?;
        Ok(Some((rows.len(), bytes)))
    }
}

/// Replace characters that cannot appear in a file name.
fn sanitize_date(date: &str) -> String {
    date.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}
