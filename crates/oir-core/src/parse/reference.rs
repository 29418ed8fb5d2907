use serde::{Deserialize, Serialize};

/// A `$ref` pointer or an inline value. The untagged representation matches
/// the OpenAPI wire format: any object carrying `$ref` is a reference,
/// everything else deserializes as the value itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferenceOr<T> {
    Reference {
        #[serde(rename = "$ref")]
        reference: String,
    },
    Value(T),
}

impl<T> ReferenceOr<T> {
    pub fn as_value(&self) -> Option<&T> {
        match self {
            ReferenceOr::Value(value) => Some(value),
            ReferenceOr::Reference { .. } => None,
        }
    }
}
