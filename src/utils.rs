use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::fs;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Result, SummaryError};
use crate::types::DatumaroDocument;

/// Read and parse a Datumaro export.
/// The JSON is parsed straight from a buffered file stream, and the file is closed
/// before this returns, whether parsing succeeded or not.
pub fn read_and_parse_json(path: &Path) -> Result<DatumaroDocument> {
    let file = fs::File::open(path).map_err(|e| SummaryError::io(path, e))?;
    let document: DatumaroDocument = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| SummaryError::from_json(path, e))?;

    debug!(
        "Parsed {} items and {} labels from {}",
        document.items.len(),
        document.categories.label.len(),
        path.display()
    );
    Ok(document)
}

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
                label
            ))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}
