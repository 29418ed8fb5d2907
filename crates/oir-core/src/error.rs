use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),
}

/// Errors raised while turning a parsed document into the IR. Every variant
/// is fatal for the whole transformation: documents are transformed once at
/// generation time, so there is no retry and no partial result.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("unresolved reference: {0}")]
    Lookup(String),

    #[error("no transformation rule for schema: {0}")]
    UnsupportedSchema(String),

    #[error("invalid default {value} for {expected} schema")]
    InvalidDefault {
        value: String,
        expected: &'static str,
    },

    #[error("illegal constraint: {0}")]
    IllegalConstraint(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}
