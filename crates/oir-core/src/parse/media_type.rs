use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::reference::ReferenceOr;
use super::schema::Schema;

/// A media type object. A missing `schema` is legal and maps to free-form
/// JSON during transformation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<ReferenceOr<Schema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, serde_json::Value>,
}
