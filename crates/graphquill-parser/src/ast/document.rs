use crate::ast::DirectiveDefinition;
use crate::ast::FragmentDefinition;
use crate::ast::OperationDefinition;
use crate::ast::SchemaDefinition;
use crate::ast::TypeDefinition;
use crate::ast::TypeExtension;
use crate::SourceSpan;

// =========================================================
// Document
// =========================================================

/// Root AST node for any GraphQL document.
///
/// A document contains a list of [`Definition`]s which may be type-system
/// definitions, type-system extensions, or executable definitions
/// (operations and fragments). Whether type-system definitions are
/// *permitted* is decided at parse time (executable documents reject them),
/// not by the node shape.
///
/// See [Document](https://spec.graphql.org/June2018/#sec-Language.Document)
/// in the spec.
#[derive(Clone, Debug, PartialEq)]
pub struct Document<'src> {
    pub definitions: Vec<Definition<'src>>,
    pub span: SourceSpan,
}

impl<'src> Document<'src> {
    /// Iterate over only the executable definitions (operations and
    /// fragments) in this document.
    pub fn executable_definitions(&self) -> impl Iterator<Item = &Definition<'src>> {
        self.definitions.iter().filter(|d| {
            matches!(
                d,
                Definition::FragmentDefinition(_) | Definition::OperationDefinition(_)
            )
        })
    }

    /// Iterate over only the operation definitions in this document.
    pub fn operations(&self) -> impl Iterator<Item = &OperationDefinition<'src>> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::OperationDefinition(op) => Some(op),
            _ => None,
        })
    }

    /// Iterate over only the fragment definitions in this document.
    pub fn fragments(&self) -> impl Iterator<Item = &FragmentDefinition<'src>> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::FragmentDefinition(frag) => Some(frag),
            _ => None,
        })
    }
}

// =========================================================
// Definition
// =========================================================

/// A top-level definition in a GraphQL document.
///
/// Covers both executable definitions (operations, fragments) and
/// type-system definitions (schema, types, directives, extensions).
#[allow(clippy::large_enum_variant)]
#[derive(Clone, Debug, PartialEq)]
pub enum Definition<'src> {
    OperationDefinition(OperationDefinition<'src>),
    FragmentDefinition(FragmentDefinition<'src>),
    SchemaDefinition(SchemaDefinition<'src>),
    TypeDefinition(TypeDefinition<'src>),
    TypeExtension(TypeExtension<'src>),
    DirectiveDefinition(DirectiveDefinition<'src>),
}
