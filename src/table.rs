use std::fmt::Write;

pub const IMAGE_NAME_COLUMN: &str = "Image Name";
pub const FRAME_NUMBER_COLUMN: &str = "Frame Number";
pub const TOTAL_ANNOTATIONS_COLUMN: &str = "Total Annotations";

/// Columns that always lead the table, in this order
pub const FIXED_COLUMNS: [&str; 3] = [
    IMAGE_NAME_COLUMN,
    FRAME_NUMBER_COLUMN,
    TOTAL_ANNOTATIONS_COLUMN,
];

// One tallied item; `label_counts` is aligned with `SummaryTable::label_columns`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub image_name: String,
    pub frame: String,
    pub total_annotations: usize,
    pub label_counts: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SummaryTable {
    pub label_columns: Vec<String>,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn new(label_columns: Vec<String>, rows: Vec<SummaryRow>) -> Self {
        Self {
            label_columns,
            rows,
        }
    }

    /// Fixed columns followed by the label columns
    pub fn header(&self) -> Vec<&str> {
        FIXED_COLUMNS
            .iter()
            .copied()
            .chain(self.label_columns.iter().map(String::as_str))
            .collect()
    }

    /// (data rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), FIXED_COLUMNS.len() + self.label_columns.len())
    }

    /// Render as comma separated text with a header line and `\n` line endings
    pub fn to_csv(&self) -> String {
        let mut csv = String::with_capacity((self.rows.len() + 1) * 32);

        push_record(&mut csv, self.header());
        for row in &self.rows {
            push_field(&mut csv, &row.image_name);
            csv.push(',');
            push_field(&mut csv, &row.frame);
            // Writing to a String cannot fail
            let _ = write!(csv, ",{}", row.total_annotations);
            for count in &row.label_counts {
                let _ = write!(csv, ",{}", count);
            }
            csv.push('\n');
        }

        csv
    }
}

fn push_record<'a>(csv: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            csv.push(',');
        }
        push_field(csv, field);
    }
    csv.push('\n');
}

// Minimal quoting: only fields holding a delimiter, quote or line break are quoted
fn push_field(csv: &mut String, field: &str) {
    if field.contains([',', '"', '\n', '\r']) {
        csv.push('"');
        csv.push_str(&field.replace('"', "\"\""));
        csv.push('"');
    } else {
        csv.push_str(field);
    }
}
