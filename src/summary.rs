//! Label tallying for Datumaro items
//!
//! The summary is built in three independent stages: the label catalog is turned
//! into a positional [`LabelMap`], the items are scanned for the label ids they
//! actually use, and every item is then tallied into a [`SummaryRow`] whose counts
//! line up with the alphabetically sorted [`LabelColumns`].

use indicatif::ProgressBar;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, SummaryError};
use crate::table::{SummaryRow, SummaryTable};
use crate::types::{DatumaroDocument, Item};

/// Label names indexed by their position in the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap {
    names: Vec<String>,
}

impl LabelMap {
    pub fn name(&self, label_id: usize) -> Option<&str> {
        self.names.get(label_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for LabelMap {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Output label columns and the column each used label id is counted in.
/// Labels sharing a name share a column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelColumns {
    names: Vec<String>,
    by_label: BTreeMap<usize, usize>,
}

impl LabelColumns {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Column index for `label_id`, `None` if the label is not used anywhere
    pub fn column_of(&self, label_id: usize) -> Option<usize> {
        self.by_label.get(&label_id).copied()
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

/// Map catalog positions to label names. Any explicit id in a descriptor is
/// ignored; annotations reference labels by position.
pub fn build_label_map(document: &DatumaroDocument) -> LabelMap {
    document
        .categories
        .label
        .labels
        .iter()
        .map(|label| label.name.clone())
        .collect()
}

/// Every label id referenced by at least one annotation of any item
pub fn collect_used_labels(items: &[Item]) -> BTreeSet<usize> {
    items
        .iter()
        .flat_map(|item| item.annotations.iter())
        .filter_map(|annotation| annotation.label_id)
        .collect()
}

/// Resolve the used label ids to names and lay the columns out alphabetically.
///
/// A used id with no catalog entry is an error naming the first item that uses it.
pub fn resolve_label_columns(
    items: &[Item],
    label_map: &LabelMap,
    used_labels: &BTreeSet<usize>,
) -> Result<LabelColumns> {
    let mut named = BTreeMap::new();
    for &label_id in used_labels {
        match label_map.name(label_id) {
            Some(name) => named.insert(label_id, name),
            None => return Err(unknown_label(items, label_id, label_map.len())),
        };
    }

    let names: Vec<String> = named
        .values()
        .copied()
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    let by_label = named
        .into_iter()
        .filter_map(|(label_id, name)| {
            names
                .binary_search_by(|column| column.as_str().cmp(name))
                .ok()
                .map(|column| (label_id, column))
        })
        .collect();

    Ok(LabelColumns { names, by_label })
}

fn unknown_label(items: &[Item], label_id: usize, catalog_len: usize) -> SummaryError {
    let item = items
        .iter()
        .find(|item| {
            item.annotations
                .iter()
                .any(|annotation| annotation.label_id == Some(label_id))
        })
        .map(|item| item.id.clone())
        .unwrap_or_default();

    SummaryError::UnknownLabel {
        item,
        label_id,
        catalog_len,
    }
}

/// Tally one item. Every annotation counts toward the total, only annotations
/// whose label has a column count toward a label.
pub fn build_row(item: &Item, columns: &LabelColumns) -> SummaryRow {
    let mut label_counts = vec![0; columns.len()];
    for annotation in &item.annotations {
        if let Some(column) = annotation.label_id.and_then(|id| columns.column_of(id)) {
            label_counts[column] += 1;
        }
    }

    SummaryRow {
        image_name: item.id.clone(),
        frame: item.frame_text(),
        total_annotations: item.annotations.len(),
        label_counts,
    }
}

/// Tally every item, keeping the document's item order
pub fn build_rows(items: &[Item], columns: &LabelColumns, pb: &ProgressBar) -> Vec<SummaryRow> {
    items
        .iter()
        .map(|item| {
            let row = build_row(item, columns);
            pb.inc(1);
            row
        })
        .collect()
}

/// Run all stages over `document`, reporting row construction on `pb`
pub fn summarize_with_progress(
    document: &DatumaroDocument,
    pb: &ProgressBar,
) -> Result<SummaryTable> {
    let label_map = build_label_map(document);
    let used_labels = collect_used_labels(&document.items);
    debug!(
        "{} of {} catalog labels are used by annotations",
        used_labels.len(),
        label_map.len()
    );

    let columns = resolve_label_columns(&document.items, &label_map, &used_labels)?;
    let rows = build_rows(&document.items, &columns, pb);

    Ok(SummaryTable::new(columns.into_names(), rows))
}

pub fn summarize(document: &DatumaroDocument) -> Result<SummaryTable> {
    summarize_with_progress(document, &ProgressBar::hidden())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: serde_json::Value) -> DatumaroDocument {
        serde_json::from_value(value).unwrap()
    }

    fn car_person_document() -> DatumaroDocument {
        document(json!({
            "categories": { "label": { "labels": [{ "name": "car" }, { "name": "person" }] } },
            "items": [
                { "id": "img1", "annotations": [{ "label_id": 0 }, { "label_id": 0 }, { "label_id": 1 }] },
                { "id": "img2", "annotations": [] }
            ]
        }))
    }

    #[test]
    fn test_build_label_map_is_positional() {
        let doc = document(json!({
            "categories": { "label": { "labels": [
                { "name": "zebra", "id": 7 },
                { "name": "ant", "id": 3 }
            ] } },
            "items": []
        }));
        let label_map = build_label_map(&doc);

        assert_eq!(label_map.len(), 2);
        assert_eq!(label_map.name(0), Some("zebra"));
        assert_eq!(label_map.name(1), Some("ant"));
        assert_eq!(label_map.name(2), None);
    }

    #[test]
    fn test_collect_used_labels() {
        let doc = document(json!({
            "categories": { "label": { "labels": [] } },
            "items": [
                { "id": "a", "annotations": [{ "label_id": 2 }, { "label_id": 0 }, {}] },
                { "id": "b", "annotations": [{ "label_id": 2 }] },
                { "id": "c" }
            ]
        }));

        let used = collect_used_labels(&doc.items);
        assert_eq!(used.into_iter().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_unused_labels_get_no_column() {
        let doc = document(json!({
            "categories": { "label": { "labels": [
                { "name": "truck" }, { "name": "bus" }, { "name": "car" }
            ] } },
            "items": [{ "id": "a", "annotations": [{ "label_id": 2 }, { "label_id": 1 }] }]
        }));
        let label_map = build_label_map(&doc);
        let used = collect_used_labels(&doc.items);
        let columns = resolve_label_columns(&doc.items, &label_map, &used).unwrap();

        assert_eq!(columns.names(), ["bus", "car"]);
        assert_eq!(columns.column_of(1), Some(0));
        assert_eq!(columns.column_of(2), Some(1));
        assert_eq!(columns.column_of(0), None);
    }

    #[test]
    fn test_duplicate_label_names_share_a_column() {
        let doc = document(json!({
            "categories": { "label": { "labels": [{ "name": "car" }, { "name": "car" }] } },
            "items": [{ "id": "a", "annotations": [{ "label_id": 0 }, { "label_id": 1 }] }]
        }));
        let table = summarize(&doc).unwrap();

        assert_eq!(table.label_columns, vec!["car".to_string()]);
        assert_eq!(table.rows[0].label_counts, vec![2]);
    }

    #[test]
    fn test_unknown_label_id_fails() {
        let doc = document(json!({
            "categories": { "label": { "labels": [{ "name": "car" }] } },
            "items": [
                { "id": "ok", "annotations": [{ "label_id": 0 }] },
                { "id": "bad", "annotations": [{ "label_id": 5 }] }
            ]
        }));

        match summarize(&doc) {
            Err(SummaryError::UnknownLabel {
                item,
                label_id,
                catalog_len,
            }) => {
                assert_eq!(item, "bad");
                assert_eq!(label_id, 5);
                assert_eq!(catalog_len, 1);
            }
            other => panic!("expected UnknownLabel, got {:?}", other),
        }
    }

    #[test]
    fn test_build_row_counts() {
        let doc = car_person_document();
        let table = summarize(&doc).unwrap();

        assert_eq!(table.label_columns, vec!["car", "person"]);
        assert_eq!(table.rows.len(), 2);

        let first = &table.rows[0];
        assert_eq!(first.image_name, "img1");
        assert_eq!(first.frame, "");
        assert_eq!(first.total_annotations, 3);
        assert_eq!(first.label_counts, vec![2, 1]);

        let second = &table.rows[1];
        assert_eq!(second.image_name, "img2");
        assert_eq!(second.total_annotations, 0);
        assert_eq!(second.label_counts, vec![0, 0]);
    }

    #[test]
    fn test_unlabeled_annotation_counts_toward_total_only() {
        let doc = document(json!({
            "categories": { "label": { "labels": [{ "name": "car" }] } },
            "items": [{
                "id": "img",
                "attr": { "frame": 3 },
                "annotations": [{ "label_id": 0 }, { "type": "caption" }, { "label_id": null }]
            }]
        }));
        let table = summarize(&doc).unwrap();
        let row = &table.rows[0];

        assert_eq!(row.frame, "3");
        assert_eq!(row.total_annotations, 3);
        assert_eq!(row.label_counts, vec![1]);
        assert!(row.label_counts.iter().sum::<usize>() <= row.total_annotations);
    }

    #[test]
    fn test_build_rows_advances_progress() {
        let doc = car_person_document();
        let columns = LabelColumns::default();
        let pb = ProgressBar::hidden();
        pb.set_length(doc.items.len() as u64);

        let rows = build_rows(&doc.items, &columns, &pb);

        assert_eq!(rows.len(), 2);
        assert_eq!(pb.position(), 2);
        assert!(rows.iter().all(|row| row.label_counts.is_empty()));
    }
}
