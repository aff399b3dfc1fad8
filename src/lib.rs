//! Datumaro annotation summary
//!
//! This library reads a Datumaro JSON export and produces a CSV table with one row
//! per item: its id, frame, total annotation count and one count column per label
//! that is used anywhere in the export.

pub mod config;
pub mod dataset;
pub mod error;
pub mod io;
pub mod summary;
pub mod table;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use config::{Args, DEFAULT_OUTPUT_FILE};
pub use dataset::{process_dataset, ExportReport};
pub use error::{Result, SummaryError};
pub use io::{find_input_file, write_summary};
pub use summary::{
    build_label_map, build_row, build_rows, collect_used_labels, resolve_label_columns,
    summarize, LabelColumns, LabelMap,
};
pub use table::{SummaryRow, SummaryTable, FIXED_COLUMNS};
pub use types::{Annotation, DatumaroDocument, Item};
pub use utils::read_and_parse_json;
