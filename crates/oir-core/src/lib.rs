pub mod error;
pub mod ir;
pub mod parse;
pub mod transform;

pub use transform::{Api, transform};

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for code generators that consume the transformed API. Emission is
/// out of scope for this crate; this is the seam emitters plug into.
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error;
    fn generate(
        &self,
        api: &Api,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}
