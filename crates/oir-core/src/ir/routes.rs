use indexmap::IndexMap;

use super::models::{Model, Primitive};

/// HTTP method, one per path-item slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Head => "HEAD",
            Method::Patch => "PATCH",
            Method::Trace => "TRACE",
        }
    }
}

/// Parameter location, preserved verbatim from the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Path,
    Query,
    Header,
    Cookie,
}

/// One resolved route parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    pub name: String,
    pub model: Model,
    pub required: bool,
    pub location: Location,
    pub description: Option<String>,
}

/// A single expanded form field of a multipart or url-encoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub model: Model,
    pub required: bool,
}

/// One content-type variant of a request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// `multipart/form-data` and `application/x-www-form-urlencoded`,
    /// expanded into per-field entries.
    Form { fields: Vec<Field> },
    /// Every other content type, carried whole.
    Typed { model: Model },
}

/// The request body of a route, keyed by content type.
#[derive(Debug, Clone, PartialEq)]
pub struct Bodies {
    pub required: bool,
    pub content: IndexMap<String, Body>,
}

/// What a single response returns, content type by content type.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnType {
    pub description: Option<String>,
    pub content: IndexMap<String, Model>,
}

impl ReturnType {
    /// The first content model, or `Unit` for a content-less response.
    pub fn primary(&self) -> Model {
        self.content.values().next().cloned().unwrap_or(Model::Primitive {
            kind: Primitive::Unit,
            description: None,
            default: None,
            nullable: false,
            constraint: None,
        })
    }
}

/// All responses of a route.
#[derive(Debug, Clone, PartialEq)]
pub struct Returns {
    pub by_status: IndexMap<String, ReturnType>,
    /// The status code of the response with the lowest 2xx code, if any.
    pub success: Option<String>,
    /// The OpenAPI `default` response.
    pub default: Option<ReturnType>,
}

impl Returns {
    pub fn success_return(&self) -> Option<&ReturnType> {
        self.success.as_deref().and_then(|code| self.by_status.get(code))
    }
}

/// The typed representation of one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub operation_id: String,
    pub path: String,
    pub method: Method,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub deprecated: bool,
    pub inputs: Vec<Input>,
    pub bodies: Option<Bodies>,
    pub returns: Returns,
    /// Inline models from body and response schemas, flattened once per
    /// route and deduplicated.
    pub nested: Vec<Model>,
}
