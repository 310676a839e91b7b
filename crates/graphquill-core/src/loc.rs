use graphquill_parser::SourceSpan;

/// Indicates where a schema element was defined.
#[derive(Clone, Debug, PartialEq)]
pub enum SchemaDefLocation {
    /// The element is a GraphQL built-in (spec scalars, `@skip`, the
    /// introspection types, ...) and has no source location.
    BuiltIn,

    /// The element was defined in an SDL document at this span.
    Document(SourceSpan),
}

impl SchemaDefLocation {
    /// The span for document-defined elements, `None` for built-ins.
    pub fn span(&self) -> Option<&SourceSpan> {
        match self {
            SchemaDefLocation::BuiltIn => None,
            SchemaDefLocation::Document(span) => Some(span),
        }
    }
}
