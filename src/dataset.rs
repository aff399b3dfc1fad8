use log::info;
use std::fmt;
use std::path::PathBuf;

use crate::config::Args;
use crate::error::Result;
use crate::io::write_summary;
use crate::summary::summarize_with_progress;
use crate::utils::{create_progress_bar, read_and_parse_json};

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
    pub columns: usize,
}

impl fmt::Display for ExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Done! CSV file saved as '{}' with shape ({}, {})",
            self.output.display(),
            self.rows,
            self.columns
        )
    }
}

/// Main summary pipeline: locate and read the export, tally every item and write
/// the CSV table. The output file is only touched once the whole table is built.
pub fn process_dataset(args: &Args) -> Result<ExportReport> {
    let input = args.input_path()?;
    info!("Reading Datumaro export {}", input.display());
    let document = read_and_parse_json(&input)?;
    info!(
        "Read {} items with {} catalog labels.",
        document.items.len(),
        document.categories.label.len()
    );

    let pb = create_progress_bar(document.items.len() as u64, "Items");
    let table = summarize_with_progress(&document, &pb)?;
    pb.finish_and_clear();

    let output = args.output_path();
    write_summary(&output, &table)?;

    let (rows, columns) = table.shape();
    Ok(ExportReport {
        input,
        output,
        rows,
        columns,
    })
}
