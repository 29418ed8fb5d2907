use std::collections::HashSet;

use crate::error::TransformError;
use crate::parse::components::Components;
use crate::parse::operation::PathItem;
use crate::parse::parameter::Parameter;
use crate::parse::reference::ReferenceOr;
use crate::parse::request_body::RequestBody;
use crate::parse::response::Response;
use crate::parse::schema::Schema;

/// Whether a value came in via `$ref` or inline. A `Ref` sub-schema becomes
/// a named `Model::Reference` and is never re-expanded in place; a `Value`
/// becomes an inline nested model.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<A> {
    Ref { name: String, value: A },
    Value(A),
}

impl<A> Resolved<A> {
    pub fn value(&self) -> &A {
        match self {
            Resolved::Ref { value, .. } => value,
            Resolved::Value(value) => value,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Resolved::Ref { name, .. } => Some(name),
            Resolved::Value(_) => None,
        }
    }
}

/// Resolves `ReferenceOr` nodes against the five component maps. Lookups
/// follow transitive component-level references and fail fatally on unknown
/// names or reference cycles at the component level.
pub struct Resolver<'a> {
    components: Option<&'a Components>,
}

macro_rules! resolve_kind {
    ($fn_name:ident, $ty:ty, $map:ident, $kind:literal) => {
        pub fn $fn_name(
            &self,
            node: &'a ReferenceOr<$ty>,
        ) -> Result<Resolved<&'a $ty>, TransformError> {
            match node {
                ReferenceOr::Value(value) => Ok(Resolved::Value(value)),
                ReferenceOr::Reference { reference } => {
                    self.resolve_in(|c, name| c.$map.get(name), $kind, reference)
                }
            }
        }
    };
}

impl<'a> Resolver<'a> {
    pub fn new(components: Option<&'a Components>) -> Self {
        Self { components }
    }

    resolve_kind!(schema, Schema, schemas, "schemas");
    resolve_kind!(response, Response, responses, "responses");
    resolve_kind!(parameter, Parameter, parameters, "parameters");
    resolve_kind!(request_body, RequestBody, request_bodies, "requestBodies");
    resolve_kind!(path_item, PathItem, path_items, "pathItems");

    fn resolve_in<T>(
        &self,
        get: impl Fn(&'a Components, &str) -> Option<&'a ReferenceOr<T>>,
        kind: &'static str,
        reference: &str,
    ) -> Result<Resolved<&'a T>, TransformError> {
        let components = self
            .components
            .ok_or_else(|| TransformError::Lookup(reference.to_string()))?;

        let mut name = ref_name(reference, kind)?.to_string();
        let mut seen = HashSet::new();
        loop {
            if !seen.insert(name.clone()) {
                return Err(TransformError::Lookup(format!(
                    "circular component reference: {reference}"
                )));
            }
            match get(components, &name) {
                Some(ReferenceOr::Value(value)) => return Ok(Resolved::Ref { name, value }),
                Some(ReferenceOr::Reference { reference: inner }) => {
                    name = ref_name(inner, kind)?.to_string();
                }
                None => return Err(TransformError::Lookup(reference.to_string())),
            }
        }
    }
}

/// Extract the component name from a `#/components/<kind>/<name>` pointer.
fn ref_name<'s>(reference: &'s str, kind: &'static str) -> Result<&'s str, TransformError> {
    let stripped = reference
        .strip_prefix("#/components/")
        .ok_or_else(|| TransformError::Lookup(format!("invalid reference format: {reference}")))?;
    let (section, name) = stripped
        .split_once('/')
        .ok_or_else(|| TransformError::Lookup(format!("invalid reference format: {reference}")))?;
    if section != kind {
        return Err(TransformError::Lookup(format!(
            "expected a {kind} reference, got: {reference}"
        )));
    }
    Ok(name)
}
