pub mod constraint;
pub mod naming;
pub mod registry;
pub mod resolver;
pub mod routes;
pub mod schema_to_model;

use indexmap::IndexSet;
use log::debug;

use crate::error::TransformError;
use crate::ir::{Model, Root, build_tree};
use crate::parse::spec::Document;

use registry::ComponentRegistry;
use resolver::Resolver;
use routes::RouteExtractor;

/// The transformed API: every named component model plus the route tree.
/// This is the whole input of a code generator.
#[derive(Debug, Clone, PartialEq)]
pub struct Api {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub models: IndexSet<Model>,
    pub root: Root,
}

/// Transform a parsed document into its typed IR. The component registry is
/// built first so that route extraction can expand named request bodies; any
/// failure anywhere is fatal.
pub fn transform(document: &Document) -> Result<Api, TransformError> {
    let resolver = Resolver::new(document.components.as_ref());
    let registry = ComponentRegistry::build(document.components.as_ref(), &resolver)?;

    let extractor = RouteExtractor::new(&resolver, &registry);
    let routes = extractor.extract(document)?;
    debug!("extracted {} routes", routes.len());

    Ok(Api {
        title: document.info.title.clone(),
        version: document.info.version.clone(),
        description: document.info.description.clone(),
        models: registry.all(),
        root: build_tree(routes),
    })
}
