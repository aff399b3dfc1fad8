use clap::Parser;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::io::find_input_file;

/// Default name of the generated summary table
pub const DEFAULT_OUTPUT_FILE: &str = "datumaro_annotation_summary.csv";

/// Command-line arguments for summarizing a Datumaro JSON export into a CSV table.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Directory searched for the Datumaro export
    #[arg(short = 'd', long = "dir", default_value = ".")]
    pub dir: PathBuf,

    /// Explicit path to the Datumaro export; skips directory discovery
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output CSV file, relative paths are resolved against --dir
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// File extension recognized as a Datumaro export during discovery
    #[arg(long = "extension", default_value = "json", value_parser = validate_extension)]
    pub extension: String,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            input: None,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            extension: "json".to_string(),
        }
    }
}

impl Args {
    /// Arguments rooted at `dir` with every other option left at its default
    pub fn for_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// The export to read: the explicit `--input` if given, otherwise the first
    /// matching file found in `--dir`
    pub fn input_path(&self) -> Result<PathBuf> {
        match &self.input {
            Some(path) => Ok(path.clone()),
            None => find_input_file(&self.dir, &self.extension),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        if self.output.is_absolute() {
            self.output.clone()
        } else {
            self.dir.join(&self.output)
        }
    }
}

// Accept "json" or ".json", reject anything empty or containing a path separator
fn validate_extension(s: &str) -> std::result::Result<String, String> {
    let ext = s.trim().trim_start_matches('.');
    if ext.is_empty() || ext.contains(['/', '\\', '*']) {
        Err("EXTENSION must be a plain file extension such as 'json'".to_string())
    } else {
        Ok(ext.to_string())
    }
}
