use serde_json::Number;

/// Validation bounds lifted off a schema. A `None` field means the keyword
/// was absent and the bound stays permissive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constraint {
    Number {
        exclusive_minimum: Option<Number>,
        minimum: Option<Number>,
        exclusive_maximum: Option<Number>,
        maximum: Option<Number>,
        multiple_of: Option<Number>,
    },
    Text {
        min_length: Option<u64>,
        max_length: Option<u64>,
        pattern: Option<String>,
    },
    Collection {
        min_items: Option<u64>,
        max_items: Option<u64>,
        unique_items: bool,
    },
    Object {
        min_properties: Option<u64>,
        max_properties: Option<u64>,
    },
}

impl Constraint {
    pub fn unique_items(&self) -> bool {
        matches!(self, Constraint::Collection { unique_items: true, .. })
    }
}
