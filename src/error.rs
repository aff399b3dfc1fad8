use std::path::PathBuf;

use serde_json::error::Category;

/// Everything that can stop a summary run. No variant is recovered from locally;
/// the run ends and no output file is written.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("No .{extension} file found in {}", .dir.display())]
    NotFound { dir: PathBuf, extension: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON ({}): {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected Datumaro document layout ({}): {source}", .path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Item '{item}' references label_id {label_id} but the label catalog has {catalog_len} entries"
    )]
    UnknownLabel {
        item: String,
        label_id: usize,
        catalog_len: usize,
    },
}

pub type Result<T> = std::result::Result<T, SummaryError>;

impl SummaryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Split serde_json failures into malformed content and well-formed content
    /// that is missing keys or carries the wrong types
    pub(crate) fn from_json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        let path = path.into();
        match source.classify() {
            Category::Data => Self::Schema { path, source },
            Category::Syntax | Category::Eof => Self::Parse { path, source },
            Category::Io => Self::Io {
                path,
                source: source.into(),
            },
        }
    }
}
