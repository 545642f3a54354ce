//! Student directory record as seen by the fee subsystem.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A student entry owned by the directory collaborator. Only `id` and
/// `classId` are read here; every other field is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    pub class_id: String,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl StudentRecord {
    pub fn new(id: &str, class_id: &str) -> Self {
        Self {
            id: id.to_string(),
            class_id: class_id.to_string(),
            other: Map::new(),
        }
    }
}
