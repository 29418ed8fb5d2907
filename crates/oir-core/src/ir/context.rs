/// Structural identity of a schema position. Two schema occurrences with an
/// equal `NamingContext` are the same generated type; the code-emission stage
/// turns a context into a concrete identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NamingContext {
    /// A top-level component schema, `#/components/schemas/<name>`.
    Named { name: String },
    /// A schema nested inside another declarable position.
    Nested {
        inner: Box<NamingContext>,
        outer: Box<NamingContext>,
    },
    /// A route parameter schema.
    RouteParam {
        name: String,
        operation_id: String,
        postfix: String,
    },
    /// A route request or response body schema.
    RouteBody { name: String, postfix: String },
}

impl NamingContext {
    pub fn named(name: impl Into<String>) -> Self {
        NamingContext::Named { name: name.into() }
    }

    /// Nest a `Named` segment under this context.
    pub fn nest(&self, segment: impl Into<String>) -> Self {
        NamingContext::Nested {
            inner: Box::new(NamingContext::named(segment)),
            outer: Box::new(self.clone()),
        }
    }

    /// The innermost name segment, used for fallback case names.
    pub fn leaf(&self) -> &str {
        match self {
            NamingContext::Named { name } => name,
            NamingContext::Nested { inner, .. } => inner.leaf(),
            NamingContext::RouteParam { name, .. } => name,
            NamingContext::RouteBody { name, .. } => name,
        }
    }

    /// The outermost name, which is the component name for registry-built
    /// models. Recursive anchors are registered under this name.
    pub fn root_name(&self) -> &str {
        match self {
            NamingContext::Named { name } => name,
            NamingContext::Nested { outer, .. } => outer.root_name(),
            NamingContext::RouteParam { operation_id, .. } => operation_id,
            NamingContext::RouteBody { name, .. } => name,
        }
    }
}
