use indexmap::{IndexMap, IndexSet};
use log::debug;

use crate::error::TransformError;
use crate::ir::{
    Bodies, Body, Field, Input, Location, Method, Model, NamingContext, ReturnType, Returns, Route,
};
use crate::parse::operation::{Operation, PathItem};
use crate::parse::parameter::{Parameter, ParameterLocation};
use crate::parse::reference::ReferenceOr;
use crate::parse::schema::Schema;
use crate::parse::spec::Document;

use super::naming::synthesized_operation_id;
use super::registry::ComponentRegistry;
use super::resolver::{Resolved, Resolver};
use super::schema_to_model::{ModelBuilder, collect_inline};

const FORM_MEDIA_TYPES: [&str; 2] = ["multipart/form-data", "application/x-www-form-urlencoded"];

/// Walks `paths` and `webhooks` and turns every operation into a `Route`.
pub struct RouteExtractor<'a> {
    resolver: &'a Resolver<'a>,
    registry: &'a ComponentRegistry,
    builder: ModelBuilder<'a>,
}

impl<'a> RouteExtractor<'a> {
    pub fn new(resolver: &'a Resolver<'a>, registry: &'a ComponentRegistry) -> Self {
        Self {
            resolver,
            registry,
            builder: ModelBuilder::new(resolver),
        }
    }

    pub fn extract(&self, document: &Document) -> Result<Vec<Route>, TransformError> {
        let mut routes = Vec::new();
        for (path, node) in &document.paths {
            let item = self.resolver.path_item(node)?;
            self.extract_item(path, item.value(), &mut routes)?;
        }
        // Webhooks have no path of their own; the webhook name acts as a
        // single-segment pseudo-path.
        for (name, node) in &document.webhooks {
            let item = self.resolver.path_item(node)?;
            let path = format!("/{name}");
            self.extract_item(&path, item.value(), &mut routes)?;
        }
        Ok(routes)
    }

    fn extract_item(
        &self,
        path: &str,
        item: &PathItem,
        routes: &mut Vec<Route>,
    ) -> Result<(), TransformError> {
        for (method, operation) in operations(item) {
            routes.push(self.to_route(path, method, item, operation)?);
        }
        Ok(())
    }

    fn to_route(
        &self,
        path: &str,
        method: Method,
        item: &PathItem,
        operation: &Operation,
    ) -> Result<Route, TransformError> {
        let operation_id = operation
            .operation_id
            .clone()
            .unwrap_or_else(|| synthesized_operation_id(method, path));
        debug!("extracting route {} {path} ({operation_id})", method.as_str());

        let inputs = self.inputs(item, operation, &operation_id)?;
        let bodies = self.bodies(operation, &operation_id)?;
        let returns = self.returns(operation, &operation_id)?;
        let nested = nested_models(&bodies, &returns);

        Ok(Route {
            operation_id,
            path: path.to_string(),
            method,
            summary: operation.summary.clone(),
            description: operation.description.clone(),
            tags: operation.tags.clone(),
            deprecated: operation.deprecated.unwrap_or(false),
            inputs,
            bodies,
            returns,
            nested,
        })
    }

    /// Path-item parameters first, then operation parameters; an operation
    /// parameter with the same name and location overrides the path-level
    /// one.
    fn inputs(
        &self,
        item: &PathItem,
        operation: &Operation,
        operation_id: &str,
    ) -> Result<Vec<Input>, TransformError> {
        let mut inputs: Vec<Input> = Vec::new();
        for node in item.parameters.iter().chain(&operation.parameters) {
            let parameter = self.resolver.parameter(node)?;
            let input = self.to_input(parameter.value(), operation_id)?;
            match inputs
                .iter_mut()
                .find(|i| i.name == input.name && i.location == input.location)
            {
                Some(existing) => *existing = input,
                None => inputs.push(input),
            }
        }
        Ok(inputs)
    }

    fn to_input(
        &self,
        parameter: &Parameter,
        operation_id: &str,
    ) -> Result<Input, TransformError> {
        let context = NamingContext::RouteParam {
            name: parameter.name.clone(),
            operation_id: operation_id.to_string(),
            postfix: "Parameter".to_string(),
        };
        let model = match &parameter.schema {
            Some(node) => self.builder.node_model(node, &context)?,
            None => Model::FreeFormJson { description: None },
        };
        Ok(Input {
            name: parameter.name.clone(),
            model,
            // Path parameters are always required regardless of the flag.
            required: parameter.required || parameter.location == ParameterLocation::Path,
            location: to_location(parameter.location),
            description: parameter.description.clone(),
        })
    }

    fn bodies(
        &self,
        operation: &Operation,
        operation_id: &str,
    ) -> Result<Option<Bodies>, TransformError> {
        let Some(node) = &operation.request_body else {
            return Ok(None);
        };
        let request_body = self.resolver.request_body(node)?;
        let request_body = request_body.value();

        let context = NamingContext::RouteBody {
            name: operation_id.to_string(),
            postfix: "Request".to_string(),
        };
        let mut content = IndexMap::new();
        for (content_type, media) in &request_body.content {
            let body = if is_form(content_type) {
                match self.form_fields(media.schema.as_ref(), &context)? {
                    Some(fields) => Body::Form { fields },
                    None => Body::Typed {
                        model: self.media_model(media.schema.as_ref(), &context)?,
                    },
                }
            } else {
                Body::Typed {
                    model: self.media_model(media.schema.as_ref(), &context)?,
                }
            };
            content.insert(content_type.clone(), body);
        }

        Ok(Some(Bodies {
            required: request_body.required,
            content,
        }))
    }

    /// Expand a form media type into per-field entries. A `$ref` body
    /// expands through the registry's already-transformed component model;
    /// a non-object schema yields `None` and is carried whole instead.
    fn form_fields(
        &self,
        schema: Option<&ReferenceOr<Schema>>,
        context: &NamingContext,
    ) -> Result<Option<Vec<Field>>, TransformError> {
        let Some(node) = schema else {
            return Ok(None);
        };
        let mut model = match self.resolver.schema(node)? {
            Resolved::Ref { name, .. } => self
                .registry
                .get(&name)
                .cloned()
                .ok_or(TransformError::Lookup(name))?,
            Resolved::Value(schema) => self.builder.to_model(schema, context)?,
        };
        // A component alias registers as a Reference; follow it.
        while let Model::Reference { context: target, .. } = &model {
            let name = target.leaf().to_string();
            model = self
                .registry
                .get(&name)
                .cloned()
                .ok_or(TransformError::Lookup(name))?;
        }

        match model {
            Model::Object { properties, .. } => Ok(Some(
                properties
                    .into_iter()
                    .map(|p| Field {
                        name: p.name,
                        model: p.model,
                        required: p.required,
                    })
                    .collect(),
            )),
            _ => Ok(None),
        }
    }

    fn returns(
        &self,
        operation: &Operation,
        operation_id: &str,
    ) -> Result<Returns, TransformError> {
        let mut by_status = IndexMap::new();
        let mut default = None;
        for (status, node) in &operation.responses {
            let response = self.resolver.response(node)?;
            let response = response.value();

            let postfix = if status == "default" {
                "ResponseDefault".to_string()
            } else {
                format!("Response{status}")
            };
            let context = NamingContext::RouteBody {
                name: operation_id.to_string(),
                postfix,
            };
            let mut content = IndexMap::new();
            for (content_type, media) in &response.content {
                content.insert(
                    content_type.clone(),
                    self.media_model(media.schema.as_ref(), &context)?,
                );
            }
            let return_type = ReturnType {
                description: Some(response.description.clone()).filter(|d| !d.is_empty()),
                content,
            };
            if status == "default" {
                default = Some(return_type);
            } else {
                by_status.insert(status.clone(), return_type);
            }
        }

        let success = by_status
            .keys()
            .filter_map(|status| status.parse::<u16>().ok().map(|code| (code, status)))
            .filter(|(code, _)| (200..300).contains(code))
            .min_by_key(|(code, _)| *code)
            .map(|(_, status)| status.clone());

        Ok(Returns {
            by_status,
            success,
            default,
        })
    }

    /// A media type without a schema carries free-form JSON; this is the one
    /// deliberate soft fallback of body and response handling.
    fn media_model(
        &self,
        schema: Option<&ReferenceOr<Schema>>,
        context: &NamingContext,
    ) -> Result<Model, TransformError> {
        match schema {
            Some(node) => self.builder.node_model(node, context),
            None => Ok(Model::FreeFormJson { description: None }),
        }
    }
}

fn operations(item: &PathItem) -> impl Iterator<Item = (Method, &Operation)> {
    [
        (Method::Get, &item.get),
        (Method::Put, &item.put),
        (Method::Post, &item.post),
        (Method::Delete, &item.delete),
        (Method::Options, &item.options),
        (Method::Head, &item.head),
        (Method::Patch, &item.patch),
        (Method::Trace, &item.trace),
    ]
    .into_iter()
    .filter_map(|(method, slot)| slot.as_ref().map(|operation| (method, operation)))
}

fn is_form(content_type: &str) -> bool {
    FORM_MEDIA_TYPES.iter().any(|m| content_type.starts_with(m))
}

fn to_location(location: ParameterLocation) -> Location {
    match location {
        ParameterLocation::Path => Location::Path,
        ParameterLocation::Query => Location::Query,
        ParameterLocation::Header => Location::Header,
        ParameterLocation::Cookie => Location::Cookie,
    }
}

/// Inline declarable models across all bodies and responses, flattened once
/// and deduplicated in first-seen order.
fn nested_models(bodies: &Option<Bodies>, returns: &Returns) -> Vec<Model> {
    let mut models: Vec<&Model> = Vec::new();
    if let Some(bodies) = bodies {
        for body in bodies.content.values() {
            match body {
                Body::Typed { model } => models.push(model),
                Body::Form { fields } => models.extend(fields.iter().map(|f| &f.model)),
            }
        }
    }
    for return_type in returns.by_status.values().chain(&returns.default) {
        models.extend(return_type.content.values());
    }

    let unique: IndexSet<Model> = collect_inline(models).into_iter().collect();
    unique.into_iter().collect()
}
