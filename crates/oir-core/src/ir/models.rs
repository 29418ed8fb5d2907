use super::constraints::Constraint;
use super::context::NamingContext;

/// The scalar kinds a schema can collapse to. `Unit` stands for "no payload"
/// and is produced for content-less responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Int,
    Double,
    Boolean,
    String,
    Unit,
}

impl Primitive {
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Int => "integer",
            Primitive::Double => "number",
            Primitive::Boolean => "boolean",
            Primitive::String => "string",
            Primitive::Unit => "unit",
        }
    }
}

/// Whether an enumeration admits values outside its declared set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumKind {
    Closed,
    Open,
}

/// A named, typed member of an object model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    pub name: String,
    pub model: Model,
    pub required: bool,
}

/// Discriminator for tagged unions, with `$ref` mapping values already
/// shortened to component names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Discriminator {
    pub property: String,
    pub mapping: Vec<(String, String)>,
}

/// The target-language-agnostic model produced for a schema. The variant set
/// is closed; emitters match exhaustively. Defaults are stored as rendered
/// literals so the whole tree stays `Eq + Hash` and fits in an `IndexSet`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Primitive {
        kind: Primitive,
        description: Option<String>,
        default: Option<String>,
        nullable: bool,
        constraint: Option<Constraint>,
    },
    /// A `string` schema with `format: binary`.
    OctetStream { description: Option<String> },
    /// A schema with no usable shape information; also the fallback for
    /// missing body and response schemas.
    FreeFormJson { description: Option<String> },
    List {
        items: Box<Model>,
        description: Option<String>,
        default: Option<Vec<String>>,
        nullable: bool,
        constraint: Option<Constraint>,
    },
    /// Present for emitters that want a distinct unordered container. The
    /// transformer itself never demotes a List to a Set: `uniqueItems` stays
    /// a constraint on the List.
    Set {
        items: Box<Model>,
        description: Option<String>,
        default: Option<Vec<String>>,
        nullable: bool,
        constraint: Option<Constraint>,
    },
    Map {
        values: Box<Model>,
        description: Option<String>,
        nullable: bool,
        constraint: Option<Constraint>,
    },
    Object {
        context: NamingContext,
        description: Option<String>,
        properties: Vec<Property>,
        /// Inline declarable sub-models, collected for later flattening.
        /// Referenced (`$ref`) sub-schemas never appear here.
        inline: Vec<Model>,
        /// Marks an object that also accepts extra free-form properties
        /// (`additionalProperties: true` or an empty schema).
        additional_properties: bool,
        nullable: bool,
        constraint: Option<Constraint>,
    },
    Union {
        context: NamingContext,
        description: Option<String>,
        /// Cases in deserialization probe order: most specific first,
        /// `Primitive::String` always last.
        cases: Vec<Model>,
        default: Option<String>,
        discriminator: Option<Discriminator>,
        inline: Vec<Model>,
        nullable: bool,
    },
    Enum {
        context: NamingContext,
        description: Option<String>,
        base: Primitive,
        values: Vec<String>,
        kind: EnumKind,
        default: Option<String>,
        nullable: bool,
    },
    /// A named component reference; never re-expanded in place.
    Reference {
        context: NamingContext,
        description: Option<String>,
        nullable: bool,
    },
}

impl Model {
    pub fn description(&self) -> Option<&str> {
        match self {
            Model::Primitive { description, .. }
            | Model::OctetStream { description }
            | Model::FreeFormJson { description }
            | Model::List { description, .. }
            | Model::Set { description, .. }
            | Model::Map { description, .. }
            | Model::Object { description, .. }
            | Model::Union { description, .. }
            | Model::Enum { description, .. }
            | Model::Reference { description, .. } => description.as_deref(),
        }
    }

    /// The structural identity of this model, for declarable variants.
    pub fn context(&self) -> Option<&NamingContext> {
        match self {
            Model::Object { context, .. }
            | Model::Union { context, .. }
            | Model::Enum { context, .. }
            | Model::Reference { context, .. } => Some(context),
            _ => None,
        }
    }

    pub fn is_string_primitive(&self) -> bool {
        matches!(
            self,
            Model::Primitive {
                kind: Primitive::String,
                ..
            }
        )
    }

    /// Fill the description if this model does not carry one of its own.
    pub(crate) fn or_description(self, fallback: Option<String>) -> Model {
        if fallback.is_none() || self.description().is_some() {
            return self;
        }
        match self {
            Model::Primitive { kind, default, nullable, constraint, .. } => Model::Primitive {
                kind,
                description: fallback,
                default,
                nullable,
                constraint,
            },
            Model::OctetStream { .. } => Model::OctetStream { description: fallback },
            Model::FreeFormJson { .. } => Model::FreeFormJson { description: fallback },
            Model::List { items, default, nullable, constraint, .. } => Model::List {
                items,
                description: fallback,
                default,
                nullable,
                constraint,
            },
            Model::Set { items, default, nullable, constraint, .. } => Model::Set {
                items,
                description: fallback,
                default,
                nullable,
                constraint,
            },
            Model::Map { values, nullable, constraint, .. } => Model::Map {
                values,
                description: fallback,
                nullable,
                constraint,
            },
            Model::Object {
                context, properties, inline, additional_properties, nullable, constraint, ..
            } => Model::Object {
                context,
                description: fallback,
                properties,
                inline,
                additional_properties,
                nullable,
                constraint,
            },
            Model::Union { context, cases, default, discriminator, inline, nullable, .. } => {
                Model::Union {
                    context,
                    description: fallback,
                    cases,
                    default,
                    discriminator,
                    inline,
                    nullable,
                }
            }
            Model::Enum { context, base, values, kind, default, nullable, .. } => Model::Enum {
                context,
                description: fallback,
                base,
                values,
                kind,
                default,
                nullable,
            },
            Model::Reference { context, nullable, .. } => Model::Reference {
                context,
                description: fallback,
                nullable,
            },
        }
    }

    /// Force the model nullable, used when an `anyOf` null branch or a null
    /// enum literal is dropped.
    pub(crate) fn into_nullable(self) -> Model {
        match self {
            Model::Primitive { kind, description, default, constraint, .. } => Model::Primitive {
                kind,
                description,
                default,
                nullable: true,
                constraint,
            },
            Model::List { items, description, default, constraint, .. } => Model::List {
                items,
                description,
                default,
                nullable: true,
                constraint,
            },
            Model::Set { items, description, default, constraint, .. } => Model::Set {
                items,
                description,
                default,
                nullable: true,
                constraint,
            },
            Model::Map { values, description, constraint, .. } => Model::Map {
                values,
                description,
                nullable: true,
                constraint,
            },
            Model::Object {
                context, description, properties, inline, additional_properties, constraint, ..
            } => Model::Object {
                context,
                description,
                properties,
                inline,
                additional_properties,
                nullable: true,
                constraint,
            },
            Model::Union { context, description, cases, default, discriminator, inline, .. } => {
                Model::Union {
                    context,
                    description,
                    cases,
                    default,
                    discriminator,
                    inline,
                    nullable: true,
                }
            }
            Model::Enum { context, description, base, values, kind, default, .. } => Model::Enum {
                context,
                description,
                base,
                values,
                kind,
                default,
                nullable: true,
            },
            Model::Reference { context, description, .. } => Model::Reference {
                context,
                description,
                nullable: true,
            },
            // Free-form JSON already admits null; binary payloads have no
            // null representation to speak of.
            other @ (Model::OctetStream { .. } | Model::FreeFormJson { .. }) => other,
        }
    }
}
