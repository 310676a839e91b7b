use crate::ast::DirectiveAnnotation;
use crate::ast::Argument;
use crate::ast::Name;
use crate::ast::NamedTypeAnnotation;
use crate::ast::TypeAnnotation;
use crate::ast::Value;
use crate::SourceSpan;

// =========================================================
// Operation definitions
// =========================================================

/// The kind of an operation: query, mutation, or subscription.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    /// The keyword for this operation kind as written in source text.
    pub fn keyword(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

/// An operation definition (query, mutation, or subscription).
///
/// The shorthand form `{ field }` parses as an anonymous query.
///
/// See [Operations](https://spec.graphql.org/June2018/#sec-Language.Operations)
/// in the spec.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationDefinition<'src> {
    pub operation: OperationKind,
    pub name: Option<Name<'src>>,
    pub variable_definitions: Vec<VariableDefinition<'src>>,
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub selection_set: SelectionSet<'src>,
    pub span: SourceSpan,
}

// =========================================================
// Fragment definitions
// =========================================================

/// A named fragment definition.
///
/// See [Fragments](https://spec.graphql.org/June2018/#sec-Language.Fragments)
/// in the spec.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDefinition<'src> {
    pub name: Name<'src>,
    pub type_condition: TypeCondition<'src>,
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub selection_set: SelectionSet<'src>,
    pub span: SourceSpan,
}

/// An `on Type` condition on a fragment definition or inline fragment.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeCondition<'src> {
    pub named_type: NamedTypeAnnotation<'src>,
    pub span: SourceSpan,
}

// =========================================================
// Variable definitions
// =========================================================

/// A variable definition within an operation's variable list
/// (e.g. `$id: ID! = "default"`).
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition<'src> {
    pub variable: Name<'src>,
    pub var_type: TypeAnnotation<'src>,
    pub default_value: Option<Value<'src>>,
    pub span: SourceSpan,
}

// =========================================================
// Selection sets
// =========================================================

/// A selection set: the brace-delimited collection of fields and fragments
/// selected from a composite type.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionSet<'src> {
    pub selections: Vec<Selection<'src>>,
    pub span: SourceSpan,
}

/// A single selection within a selection set.
#[allow(clippy::large_enum_variant)]
#[derive(Clone, Debug, PartialEq)]
pub enum Selection<'src> {
    Field(Field<'src>),
    FragmentSpread(FragmentSpread<'src>),
    InlineFragment(InlineFragment<'src>),
}

// =========================================================
// Field
// =========================================================

/// A field selection, optionally aliased, with arguments, directives, and
/// a nested selection set.
///
/// See [Fields](https://spec.graphql.org/June2018/#sec-Language.Fields) in
/// the spec.
#[derive(Clone, Debug, PartialEq)]
pub struct Field<'src> {
    pub alias: Option<Name<'src>>,
    pub name: Name<'src>,
    pub arguments: Vec<Argument<'src>>,
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub selection_set: Option<SelectionSet<'src>>,
    pub span: SourceSpan,
}

impl Field<'_> {
    /// The key this field contributes to the response map: its alias when
    /// present, its name otherwise.
    pub fn response_name(&self) -> &str {
        self.alias
            .as_ref()
            .map(|alias| alias.as_str())
            .unwrap_or_else(|| self.name.as_str())
    }
}

// =========================================================
// Fragment spreads & inline fragments
// =========================================================

/// A `...FragmentName` spread.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread<'src> {
    pub name: Name<'src>,
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub span: SourceSpan,
}

/// An inline fragment, with an optional type condition.
#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment<'src> {
    pub type_condition: Option<TypeCondition<'src>>,
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub selection_set: SelectionSet<'src>,
    pub span: SourceSpan,
}
