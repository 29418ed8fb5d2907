use indexmap::{IndexMap, IndexSet};
use log::debug;

use crate::error::TransformError;
use crate::ir::{Model, NamingContext};
use crate::parse::components::Components;

use super::resolver::{Resolved, Resolver};
use super::schema_to_model::ModelBuilder;

/// Every named component schema, transformed eagerly under its `Named`
/// context before any route is processed. Built once, read-only afterwards.
pub struct ComponentRegistry {
    models: IndexMap<String, Model>,
}

impl ComponentRegistry {
    pub fn build(
        components: Option<&Components>,
        resolver: &Resolver<'_>,
    ) -> Result<Self, TransformError> {
        let mut models = IndexMap::new();
        let builder = ModelBuilder::new(resolver);

        if let Some(components) = components {
            for (name, node) in &components.schemas {
                debug!("registering component schema {name}");
                // A component that is itself a `$ref` registers as a
                // reference to its target; sub-schema refs inside a value
                // already come out as `Reference` models, which is what
                // keeps self-referential components finite.
                let model = match resolver.schema(node)? {
                    Resolved::Ref { name: target, .. } => Model::Reference {
                        context: NamingContext::named(target),
                        description: None,
                        nullable: false,
                    },
                    Resolved::Value(schema) => {
                        builder.to_model(schema, &NamingContext::named(name))?
                    }
                };
                models.insert(name.clone(), model);
            }
        }

        debug!("component registry built with {} models", models.len());
        Ok(Self { models })
    }

    pub fn get(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    pub fn all(&self) -> IndexSet<Model> {
        self.models.values().cloned().collect()
    }
}
