use serde::{Deserialize, Serialize};
use serde_json::Value;

// The subset of a Datumaro JSON export that the summary reads. Unknown keys are
// ignored, so full exports (infos, points categories, bbox data, ...) load as is.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatumaroDocument {
    pub categories: Categories,
    pub items: Vec<Item>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Categories {
    pub label: LabelCategories,
}

// The label catalog; a label's position in `labels` is the id annotations refer to
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LabelCategories {
    pub labels: Vec<LabelDescriptor>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LabelDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent: String,
}

// One image or video frame record
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Item {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr: Option<ItemAttributes>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ItemAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Annotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_id: Option<usize>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Item {
    /// The frame attribute as table text; empty when the item has no frame
    pub fn frame_text(&self) -> String {
        match self.attr.as_ref().and_then(|attr| attr.frame.as_ref()) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(frame)) => frame.clone(),
            Some(other) => other.to_string(),
        }
    }
}

impl LabelCategories {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
