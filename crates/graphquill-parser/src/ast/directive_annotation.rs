use crate::ast::Name;
use crate::ast::Value;
use crate::SourceSpan;

/// A directive applied to an AST node (e.g. `@skip(if: $flag)`).
///
/// Distinct from a [`DirectiveDefinition`](crate::ast::DirectiveDefinition),
/// which *declares* a directive in SDL.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveAnnotation<'src> {
    pub name: Name<'src>,
    pub arguments: Vec<Argument<'src>>,
    pub span: SourceSpan,
}

impl<'src> DirectiveAnnotation<'src> {
    /// Finds an argument of this directive by name.
    pub fn argument(&self, name: &str) -> Option<&Argument<'src>> {
        self.arguments.iter().find(|arg| arg.name.as_str() == name)
    }
}

/// A named argument: `name: value`.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument<'src> {
    pub name: Name<'src>,
    pub value: Value<'src>,
    pub span: SourceSpan,
}
