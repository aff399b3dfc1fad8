use glob::{glob, Pattern};
use log::{info, warn};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, SummaryError};
use crate::table::SummaryTable;

/// Find the Datumaro export in `dir`: the first regular file (in glob's sorted
/// order) whose name ends in `.{extension}`. Subdirectories are not searched.
pub fn find_input_file(dir: &Path, extension: &str) -> Result<PathBuf> {
    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(&dir.to_string_lossy()),
        Pattern::escape(extension)
    );
    let entries = glob(&pattern).map_err(|e| {
        SummaryError::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
        )
    })?;

    let mut candidates = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            SummaryError::io(path, e.into_error())
        })?;
        if path.is_file() {
            candidates.push(path);
        }
    }

    let mut candidates = candidates.into_iter();
    let chosen = candidates.next().ok_or_else(|| SummaryError::NotFound {
        dir: dir.to_path_buf(),
        extension: extension.to_string(),
    })?;

    let ignored: Vec<_> = candidates.collect();
    if !ignored.is_empty() {
        warn!(
            "Found {} .{} files in {}; using {} and ignoring {:?}",
            ignored.len() + 1,
            extension,
            dir.display(),
            chosen.display(),
            ignored
        );
    }

    Ok(chosen)
}

/// Write the summary table to `path`, replacing any existing file
pub fn write_summary(path: &Path, table: &SummaryTable) -> Result<()> {
    // Render fully before touching the file system
    let csv = table.to_csv();

    let file = File::create(path).map_err(|e| SummaryError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(csv.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| SummaryError::io(path, e))?;

    info!("Wrote {} rows to {}", table.rows.len(), path.display());
    Ok(())
}
