pub mod api;
pub mod constraints;
pub mod context;
pub mod models;
pub mod routes;

pub use api::{Node, Root, build_tree};
pub use constraints::Constraint;
pub use context::NamingContext;
pub use models::{Discriminator, EnumKind, Model, Primitive, Property};
pub use routes::{Bodies, Body, Field, Input, Location, Method, ReturnType, Returns, Route};
