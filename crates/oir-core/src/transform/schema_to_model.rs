use std::collections::HashSet;

use serde_json::Value;

use crate::error::TransformError;
use crate::ir::{Discriminator, EnumKind, Model, NamingContext, Primitive, Property};
use crate::parse::reference::ReferenceOr;
use crate::parse::schema::{AdditionalProperties, Schema, SchemaType, TypeSet};

use super::constraint;
use super::naming::{capitalized, enum_case_name, sort_cases};
use super::resolver::{Resolved, Resolver};

/// The recursive schema-to-model transformer. Construction is a pure
/// function of `(Schema, NamingContext)` plus the resolver; the only state
/// threaded through recursion is the active recursive anchor, which is what
/// keeps self-referential schemas from expanding forever.
#[derive(Clone)]
pub struct ModelBuilder<'a> {
    resolver: &'a Resolver<'a>,
    anchor: Option<String>,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(resolver: &'a Resolver<'a>) -> Self {
        Self {
            resolver,
            anchor: None,
        }
    }

    fn with_anchor(&self, name: &str) -> Self {
        Self {
            resolver: self.resolver,
            anchor: Some(name.to_string()),
        }
    }

    /// Transform a `ReferenceOr` node: a `$ref` becomes a named `Reference`
    /// model and is never expanded in place, an inline schema recurses.
    pub fn node_model(
        &self,
        node: &ReferenceOr<Schema>,
        context: &NamingContext,
    ) -> Result<Model, TransformError> {
        match self.resolver.schema(node)? {
            Resolved::Ref { name, .. } => Ok(Model::Reference {
                context: NamingContext::named(name),
                description: None,
                nullable: false,
            }),
            Resolved::Value(schema) => self.to_model(schema, context),
        }
    }

    /// Transform a schema at a given position into its model.
    pub fn to_model(
        &self,
        schema: &Schema,
        context: &NamingContext,
    ) -> Result<Model, TransformError> {
        if schema.recursive_anchor == Some(true) {
            let anchored = self.with_anchor(context.root_name());
            return anchored.dispatch(schema, context);
        }
        self.dispatch(schema, context)
    }

    /// Dispatch order is significant: first match wins.
    fn dispatch(&self, schema: &Schema, context: &NamingContext) -> Result<Model, TransformError> {
        if let Some(target) = &schema.recursive_ref {
            if target != "#" {
                return Err(TransformError::UnsupportedSchema(format!(
                    "$recursiveRef {target}"
                )));
            }
            return match &self.anchor {
                Some(name) => Ok(Model::Reference {
                    context: NamingContext::named(name),
                    description: schema.description.clone(),
                    nullable: false,
                }),
                None => Err(TransformError::Lookup(
                    "$recursiveRef \"#\" with no active $recursiveAnchor".to_string(),
                )),
            };
        }

        if schema.any_of.len() == 2 {
            if let Some(model) = self.open_enum(schema, context)? {
                return Ok(model);
            }
            if let Some(model) = self.null_unwrap(schema, context)? {
                return Ok(model);
            }
        }
        if schema.any_of.len() == 1 {
            return self.flattened(&schema.any_of[0], schema, context);
        }
        if schema.one_of.len() == 1 {
            return self.flattened(&schema.one_of[0], schema, context);
        }
        if !schema.any_of.is_empty() {
            return self.to_union(&schema.any_of, schema, context);
        }
        if !schema.one_of.is_empty() {
            // A oneOf next to plain properties expresses "at least one of
            // these shapes", not a tagged union; enforcing the exclusivity
            // is outside the IR.
            if !schema.properties.is_empty() {
                return self.to_object(schema, context);
            }
            return self.to_union(&schema.one_of, schema, context);
        }
        if !schema.all_of.is_empty() {
            return self.merge_all_of(schema, context);
        }
        if !schema.enum_values.is_empty() {
            return self.to_enum(schema, context);
        }
        self.typed(schema, context)
    }

    /// `anyOf` of a string enum plus a plain string: an open enumeration of
    /// the known values with an implicit custom case.
    fn open_enum(
        &self,
        schema: &Schema,
        context: &NamingContext,
    ) -> Result<Option<Model>, TransformError> {
        let first = self.resolver.schema(&schema.any_of[0])?;
        let second = self.resolver.schema(&schema.any_of[1])?;

        let (with_enum, other) = if !first.value().enum_values.is_empty() {
            (first.value(), second.value())
        } else if !second.value().enum_values.is_empty() {
            (second.value(), first.value())
        } else {
            return Ok(None);
        };
        if !is_string_typed(with_enum) || !is_string_typed(other) {
            return Ok(None);
        }

        let default = [&schema.default_value, &with_enum.default_value, &other.default_value]
            .into_iter()
            .find_map(|d| d.as_ref())
            .map(|v| scalar_literal(v, Primitive::String))
            .transpose()?;

        let values = with_enum.enum_values.iter().map(render_literal).collect();
        Ok(Some(Model::Enum {
            context: context.clone(),
            description: schema.description.clone(),
            base: Primitive::String,
            values,
            kind: EnumKind::Open,
            default,
            nullable: schema.nullable.unwrap_or(false),
        }))
    }

    /// `anyOf` of a schema plus the `null` type: unwrap to the other branch,
    /// forcing it nullable.
    fn null_unwrap(
        &self,
        schema: &Schema,
        context: &NamingContext,
    ) -> Result<Option<Model>, TransformError> {
        let null_index = {
            let first = self.resolver.schema(&schema.any_of[0])?;
            let second = self.resolver.schema(&schema.any_of[1])?;
            if is_null_typed(first.value()) {
                0
            } else if is_null_typed(second.value()) {
                1
            } else {
                return Ok(None);
            }
        };
        let other = &schema.any_of[1 - null_index];
        let model = self.node_model(other, context)?.into_nullable();
        Ok(Some(model.or_description(schema.description.clone())))
    }

    /// `anyOf`/`oneOf` of size one: exactly the inner model, never a 1-case
    /// union. The outer description fills in only if the inner one is absent.
    fn flattened(
        &self,
        node: &ReferenceOr<Schema>,
        outer: &Schema,
        context: &NamingContext,
    ) -> Result<Model, TransformError> {
        let inner = self.node_model(node, context)?;
        Ok(inner.or_description(outer.description.clone()))
    }

    fn to_union(
        &self,
        branches: &[ReferenceOr<Schema>],
        schema: &Schema,
        context: &NamingContext,
    ) -> Result<Model, TransformError> {
        let mut cases = Vec::with_capacity(branches.len());
        for (index, node) in branches.iter().enumerate() {
            match self.resolver.schema(node)? {
                Resolved::Ref { name, .. } => cases.push(Model::Reference {
                    context: NamingContext::named(name),
                    description: None,
                    nullable: false,
                }),
                Resolved::Value(branch) => {
                    let case_context = self.case_context(branch, schema, context, index)?;
                    cases.push(self.to_model(branch, &case_context)?);
                }
            }
        }

        let default = self.union_default(schema, branches)?;
        sort_cases(&mut cases);
        let inline = collect_inline(&cases);

        Ok(Model::Union {
            context: context.clone(),
            description: schema.description.clone(),
            cases,
            default,
            discriminator: to_discriminator(schema),
            inline,
            nullable: schema.nullable.unwrap_or(false),
        })
    }

    /// Derive the structural position of a union case. String-enum cases get
    /// a name synthesized from their values; object-like cases are named
    /// after their discriminating tag value when one exists; array cases
    /// nest a synthetic `List` segment; everything else falls back to
    /// `<Outer>Case<index+1>`.
    fn case_context(
        &self,
        case: &Schema,
        union_schema: &Schema,
        outer: &NamingContext,
        index: usize,
    ) -> Result<NamingContext, TransformError> {
        if is_string_enum(case) {
            let values: Vec<String> = case.enum_values.iter().map(render_literal).collect();
            return Ok(outer.nest(enum_case_name(&values)));
        }
        if is_object_like(case) {
            if let Some(tag) = self.case_tag(case, union_schema)? {
                return Ok(outer.nest(capitalized(&tag)));
            }
            return Ok(outer.nest(format!("{}Case{}", capitalized(outer.leaf()), index + 1)));
        }
        if is_array_like(case) {
            return Ok(outer.nest("List"));
        }
        Ok(outer.nest(format!("{}Case{}", capitalized(outer.leaf()), index + 1)))
    }

    /// Search a case (and its `allOf` branches) for the discriminating
    /// property value: the union's discriminator-designated property first,
    /// then a literal `type` or `event` property with a single enum value.
    fn case_tag(
        &self,
        case: &Schema,
        union_schema: &Schema,
    ) -> Result<Option<String>, TransformError> {
        let mut candidates: Vec<&str> = Vec::new();
        if let Some(d) = &union_schema.discriminator {
            candidates.push(&d.property_name);
        }
        candidates.push("type");
        candidates.push("event");

        for property in candidates {
            if let Some(value) = self.single_enum_value(case, property, &mut HashSet::new())? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// `seen` tracks component names already visited through `allOf`
    /// branches; a repeat ends that arm of the search instead of recursing
    /// into a reference cycle.
    fn single_enum_value(
        &self,
        schema: &Schema,
        property: &str,
        seen: &mut HashSet<String>,
    ) -> Result<Option<String>, TransformError> {
        if let Some(node) = schema.properties.get(property) {
            let resolved = self.resolver.schema(node)?;
            let values = &resolved.value().enum_values;
            if values.len() == 1 {
                return Ok(Some(render_literal(&values[0])));
            }
        }
        for branch in &schema.all_of {
            let resolved = self.resolver.schema(branch)?;
            if let Some(name) = resolved.name() {
                if !seen.insert(name.to_string()) {
                    continue;
                }
            }
            if let Some(value) = self.single_enum_value(resolved.value(), property, seen)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// The union's default: the first single-value default on the union
    /// schema itself, else the first found among its branches in declaration
    /// order.
    fn union_default(
        &self,
        schema: &Schema,
        branches: &[ReferenceOr<Schema>],
    ) -> Result<Option<String>, TransformError> {
        if let Some(value) = &schema.default_value {
            if !value.is_array() {
                return Ok(Some(render_literal(value)));
            }
        }
        for node in branches {
            let resolved = self.resolver.schema(node)?;
            if let Some(value) = &resolved.value().default_value {
                if !value.is_array() {
                    return Ok(Some(render_literal(value)));
                }
            }
        }
        Ok(None)
    }

    /// `allOf` merge. Branches flatten recursively, so a branch that is
    /// itself an `allOf` contributes its nested properties too. Uniformly
    /// object-like leaves collapse into a single object: properties and
    /// required names union up (later branches override same-named earlier
    /// ones, the container schema overrides all), scalar attributes take the
    /// first non-null value left to right with the container preferred.
    /// Leaves that are not uniformly object-like fall back to a union of the
    /// declared branches; that is a known approximation (allOf is
    /// conjunction, not disjunction) kept for compatibility.
    fn merge_all_of(
        &self,
        schema: &Schema,
        context: &NamingContext,
    ) -> Result<Model, TransformError> {
        let mut seen = HashSet::new();
        let mut branch_values = Vec::with_capacity(schema.all_of.len());
        if !self.flatten_branches(&schema.all_of, &mut seen, &mut branch_values)? {
            return self.to_union(&schema.all_of, schema, context);
        }

        let mut merged = Schema {
            schema_type: Some(TypeSet::Single(SchemaType::Object)),
            ..Schema::default()
        };
        for branch in &branch_values {
            for (name, node) in &branch.properties {
                merged.properties.insert(name.clone(), node.clone());
            }
            for name in &branch.required {
                if !merged.required.contains(name) {
                    merged.required.push(name.clone());
                }
            }
        }
        for (name, node) in &schema.properties {
            merged.properties.insert(name.clone(), node.clone());
        }
        for name in &schema.required {
            if !merged.required.contains(name) {
                merged.required.push(name.clone());
            }
        }

        merged.description = first_attr(schema, &branch_values, |s| s.description.clone());
        merged.nullable = first_attr(schema, &branch_values, |s| s.nullable);
        merged.discriminator = first_attr(schema, &branch_values, |s| s.discriminator.clone());
        merged.min_properties = first_attr(schema, &branch_values, |s| s.min_properties);
        merged.max_properties = first_attr(schema, &branch_values, |s| s.max_properties);
        merged.default_value = schema.default_value.clone();

        // A schema-typed additionalProperties on any branch makes a
        // property-less merge a map; a boolean true makes it free-form.
        merged.additional_properties = first_attr(schema, &branch_values, |s| {
            match &s.additional_properties {
                Some(AdditionalProperties::Schema(node)) => {
                    Some(AdditionalProperties::Schema(node.clone()))
                }
                _ => None,
            }
        })
        .or_else(|| first_attr(schema, &branch_values, |s| s.additional_properties.clone()));

        self.to_model(&merged, context)
    }

    /// Resolve `allOf` branches depth-first into the flat leaf list the
    /// merge consumes. A branch that is itself an `allOf` recurses and then
    /// contributes its own wrapper schema, so wrapper properties override
    /// the nested ones. Returns `false` when any leaf lacks an object shape
    /// (the union fallback applies). `seen` holds the component names on the
    /// current descent only, so a shared base referenced from two sibling
    /// branches is fine while a true reference cycle is a fatal error.
    fn flatten_branches<'s>(
        &self,
        branches: &'s [ReferenceOr<Schema>],
        seen: &mut HashSet<String>,
        out: &mut Vec<&'s Schema>,
    ) -> Result<bool, TransformError>
    where
        'a: 's,
    {
        for node in branches {
            let resolved = self.resolver.schema(node)?;
            let branch = *resolved.value();
            if !branch.all_of.is_empty() {
                let name = resolved.name().map(str::to_string);
                if let Some(name) = &name {
                    if !seen.insert(name.clone()) {
                        return Err(TransformError::UnsupportedSchema(format!(
                            "circular allOf reference through {name}"
                        )));
                    }
                }
                let uniform = self.flatten_branches(&branch.all_of, seen, out)?;
                if let Some(name) = &name {
                    seen.remove(name);
                }
                if !uniform {
                    return Ok(false);
                }
                out.push(branch);
            } else if has_object_shape(branch) {
                out.push(branch);
            } else {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Enum schemas: a literal `null` value is dropped and forces
    /// nullability; the base primitive is recomputed from the schema with
    /// `enum` erased; at least one value must remain.
    fn to_enum(&self, schema: &Schema, context: &NamingContext) -> Result<Model, TransformError> {
        let mut nullable = schema.nullable.unwrap_or(false);
        let mut values = Vec::with_capacity(schema.enum_values.len());
        for value in &schema.enum_values {
            if value.is_null() {
                nullable = true;
            } else {
                values.push(render_literal(value));
            }
        }
        if values.is_empty() {
            return Err(TransformError::UnsupportedSchema(
                "enum with no values".to_string(),
            ));
        }

        let erased = Schema {
            enum_values: Vec::new(),
            default_value: None,
            ..schema.clone()
        };
        let base = match self.typed(&erased, context)? {
            Model::Primitive { kind, .. } => kind,
            // Typeless enums are string enums.
            Model::FreeFormJson { .. } => Primitive::String,
            other => {
                return Err(TransformError::UnsupportedSchema(format!(
                    "enum over non-primitive model {other:?}"
                )));
            }
        };

        let default = schema
            .default_value
            .as_ref()
            .map(|v| scalar_literal(v, base))
            .transpose()?;

        Ok(Model::Enum {
            context: context.clone(),
            description: schema.description.clone(),
            base,
            values,
            kind: EnumKind::Closed,
            default,
            nullable,
        })
    }

    /// Dispatch on the `type` keyword, the last resort of the rule chain.
    fn typed(&self, schema: &Schema, context: &NamingContext) -> Result<Model, TransformError> {
        match &schema.schema_type {
            Some(TypeSet::Multiple(types)) => self.multi_typed(types, schema, context),
            Some(TypeSet::Single(t)) => self.single_typed(t, schema, context),
            None => {
                if !schema.properties.is_empty() || schema.additional_properties.is_some() {
                    self.to_object(schema, context)
                } else if schema.items.is_some() {
                    self.to_list(schema, context)
                } else {
                    Ok(Model::FreeFormJson {
                        description: schema.description.clone(),
                    })
                }
            }
        }
    }

    /// A `type` array with more than one basic type becomes a union of
    /// per-type models, each built from the schema restricted to that type;
    /// exactly one entry collapses to that type directly. A `null` entry
    /// only forces nullability.
    fn multi_typed(
        &self,
        types: &[SchemaType],
        schema: &Schema,
        context: &NamingContext,
    ) -> Result<Model, TransformError> {
        let non_null: Vec<&SchemaType> = types.iter().filter(|t| **t != SchemaType::Null).collect();
        let has_null = non_null.len() != types.len();
        if non_null.is_empty() {
            return Err(TransformError::UnsupportedSchema(
                "the literal null type".to_string(),
            ));
        }

        if non_null.len() == 1 {
            let single = Schema {
                schema_type: Some(TypeSet::Single(non_null[0].clone())),
                ..schema.clone()
            };
            let model = self.single_typed(non_null[0], &single, context)?;
            return Ok(if has_null { model.into_nullable() } else { model });
        }

        let mut cases = Vec::with_capacity(non_null.len());
        for t in &non_null {
            let sub = Schema {
                schema_type: Some(TypeSet::Single((*t).clone())),
                default_value: None,
                description: None,
                ..schema.clone()
            };
            cases.push(self.single_typed(t, &sub, context)?);
        }
        let default = match &schema.default_value {
            Some(value) if !value.is_array() => Some(render_literal(value)),
            _ => None,
        };
        sort_cases(&mut cases);
        let inline = collect_inline(&cases);

        Ok(Model::Union {
            context: context.clone(),
            description: schema.description.clone(),
            cases,
            default,
            discriminator: None,
            inline,
            nullable: has_null || schema.nullable.unwrap_or(false),
        })
    }

    fn single_typed(
        &self,
        t: &SchemaType,
        schema: &Schema,
        context: &NamingContext,
    ) -> Result<Model, TransformError> {
        match t {
            SchemaType::Null => Err(TransformError::UnsupportedSchema(
                "the literal null type".to_string(),
            )),
            SchemaType::Boolean => self.primitive(Primitive::Boolean, schema),
            SchemaType::Integer => self.primitive(Primitive::Int, schema),
            SchemaType::Number => self.primitive(Primitive::Double, schema),
            SchemaType::String => {
                if schema.format.as_deref() == Some("binary") {
                    Ok(Model::OctetStream {
                        description: schema.description.clone(),
                    })
                } else {
                    self.primitive(Primitive::String, schema)
                }
            }
            SchemaType::Object => self.to_object(schema, context),
            SchemaType::Array => self.to_list(schema, context),
        }
    }

    fn primitive(&self, kind: Primitive, schema: &Schema) -> Result<Model, TransformError> {
        let default = schema
            .default_value
            .as_ref()
            .map(|v| scalar_literal(v, kind))
            .transpose()?;
        let constraint = match kind {
            Primitive::Int | Primitive::Double => constraint::number(schema),
            Primitive::String => constraint::text(schema),
            Primitive::Boolean | Primitive::Unit => None,
        };
        Ok(Model::Primitive {
            kind,
            description: schema.description.clone(),
            default,
            nullable: schema.nullable.unwrap_or(false),
            constraint,
        })
    }

    fn to_object(&self, schema: &Schema, context: &NamingContext) -> Result<Model, TransformError> {
        if schema.properties.is_empty() {
            return match &schema.additional_properties {
                Some(AdditionalProperties::Schema(node)) => self.to_map(node, schema, context),
                Some(AdditionalProperties::Bool(false)) => Err(TransformError::IllegalConstraint(
                    "additionalProperties: false with no properties".to_string(),
                )),
                Some(AdditionalProperties::Bool(true)) | None => Ok(Model::FreeFormJson {
                    description: schema.description.clone(),
                }),
            };
        }

        let mut properties = Vec::with_capacity(schema.properties.len());
        for (name, node) in &schema.properties {
            let model = match self.resolver.schema(node)? {
                Resolved::Ref { name: target, .. } => Model::Reference {
                    context: NamingContext::named(target),
                    description: None,
                    nullable: false,
                },
                Resolved::Value(property) => self.to_model(property, &context.nest(name.clone()))?,
            };
            properties.push(Property {
                name: name.clone(),
                model,
                required: schema.required.contains(name),
            });
        }

        let additional = match &schema.additional_properties {
            Some(AdditionalProperties::Bool(value)) => *value,
            Some(AdditionalProperties::Schema(node)) => {
                matches!(node.as_ref(), ReferenceOr::Value(s) if *s == Schema::default())
            }
            None => false,
        };
        let inline = collect_inline(properties.iter().map(|p| &p.model));

        Ok(Model::Object {
            context: context.clone(),
            description: schema.description.clone(),
            properties,
            inline,
            additional_properties: additional,
            nullable: schema.nullable.unwrap_or(false),
            constraint: constraint::object(schema),
        })
    }

    fn to_map(
        &self,
        values: &ReferenceOr<Schema>,
        schema: &Schema,
        context: &NamingContext,
    ) -> Result<Model, TransformError> {
        let value_model = self.node_model(values, context)?;
        Ok(Model::Map {
            values: Box::new(value_model),
            description: schema.description.clone(),
            nullable: schema.nullable.unwrap_or(false),
            constraint: constraint::object(schema),
        })
    }

    /// Arrays always come out as a List: `uniqueItems` is carried as a
    /// collection constraint, never by demoting to an unordered container.
    fn to_list(&self, schema: &Schema, context: &NamingContext) -> Result<Model, TransformError> {
        let items = schema
            .items
            .as_ref()
            .ok_or(TransformError::MissingField("items"))?;
        let inner = self.node_model(items, context)?;

        let default = match &schema.default_value {
            None => None,
            Some(Value::Array(values)) => Some(values.iter().map(render_literal).collect()),
            Some(other) => {
                return Err(TransformError::InvalidDefault {
                    value: other.to_string(),
                    expected: "array",
                });
            }
        };

        Ok(Model::List {
            items: Box::new(inner),
            description: schema.description.clone(),
            default,
            nullable: schema.nullable.unwrap_or(false),
            constraint: constraint::collection(schema),
        })
    }
}

/// First non-null scalar attribute, the container schema preferred over the
/// branch values, branches scanned left to right.
fn first_attr<T>(container: &Schema, branches: &[&Schema], get: impl Fn(&Schema) -> Option<T>) -> Option<T> {
    get(container).or_else(|| branches.iter().find_map(|s| get(s)))
}

fn to_discriminator(schema: &Schema) -> Option<Discriminator> {
    schema.discriminator.as_ref().map(|d| Discriminator {
        property: d.property_name.clone(),
        mapping: d
            .mapping
            .iter()
            .map(|(value, target)| {
                let name = target.rsplit('/').next().unwrap_or(target);
                (value.clone(), name.to_string())
            })
            .collect(),
    })
}

fn is_string_typed(schema: &Schema) -> bool {
    matches!(
        schema.schema_type,
        Some(TypeSet::Single(SchemaType::String))
    )
}

fn is_null_typed(schema: &Schema) -> bool {
    matches!(schema.schema_type, Some(TypeSet::Single(SchemaType::Null)))
}

fn is_string_enum(schema: &Schema) -> bool {
    !schema.enum_values.is_empty()
        && schema.enum_values.iter().all(Value::is_string)
        && (is_string_typed(schema) || schema.schema_type.is_none())
}

/// Whether a schema directly declares an object shape. This is what the
/// `allOf` merge requires of every flattened leaf.
fn has_object_shape(schema: &Schema) -> bool {
    matches!(
        schema.schema_type,
        Some(TypeSet::Single(SchemaType::Object))
    ) || !schema.properties.is_empty()
        || schema.additional_properties.is_some()
}

/// The looser test used for union-case classification: an `allOf` case
/// counts as object-like because its tag property may sit in a branch.
fn is_object_like(schema: &Schema) -> bool {
    has_object_shape(schema) || !schema.all_of.is_empty()
}

fn is_array_like(schema: &Schema) -> bool {
    matches!(schema.schema_type, Some(TypeSet::Single(SchemaType::Array))) || schema.items.is_some()
}

/// Render a JSON literal into its target-agnostic text form; strings keep
/// their content without quotes.
fn render_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render a scalar default, failing when it does not parse as the declared
/// kind or is a multi-value default on a scalar.
fn scalar_literal(value: &Value, kind: Primitive) -> Result<String, TransformError> {
    let mismatch = || TransformError::InvalidDefault {
        value: value.to_string(),
        expected: kind.name(),
    };
    match kind {
        Primitive::Boolean => value.as_bool().map(|b| b.to_string()).ok_or_else(mismatch),
        Primitive::Int => value.as_i64().map(|i| i.to_string()).ok_or_else(mismatch),
        Primitive::Double => {
            if value.is_number() {
                Ok(value.to_string())
            } else {
                Err(mismatch())
            }
        }
        Primitive::String => value.as_str().map(str::to_string).ok_or_else(mismatch),
        Primitive::Unit => Err(mismatch()),
    }
}

/// Collect the declarable inline models (objects, unions, enums) reachable
/// through the given models without crossing a named reference.
pub(crate) fn collect_inline<'m>(models: impl IntoIterator<Item = &'m Model>) -> Vec<Model> {
    let mut out = Vec::new();
    for model in models {
        push_inline(model, &mut out);
    }
    out
}

fn push_inline(model: &Model, out: &mut Vec<Model>) {
    match model {
        Model::Object { .. } | Model::Union { .. } | Model::Enum { .. } => {
            out.push(model.clone());
        }
        Model::List { items, .. } | Model::Set { items, .. } => push_inline(items, out),
        Model::Map { values, .. } => push_inline(values, out),
        _ => {}
    }
}
