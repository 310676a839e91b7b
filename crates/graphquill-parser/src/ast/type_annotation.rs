use crate::ast::Name;
use crate::SourceSpan;
use std::fmt;

/// A type reference as written in source text.
///
/// The grammar is left-recursive only via the `!` suffix, which the parser
/// handles by post-wrapping in [`NonNullTypeAnnotation`]. The inner type of
/// a non-null annotation is never itself non-null (`T!!` does not parse).
///
/// See [Type References](https://spec.graphql.org/June2018/#sec-Type-References)
/// in the spec.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeAnnotation<'src> {
    Named(NamedTypeAnnotation<'src>),
    List(Box<ListTypeAnnotation<'src>>),
    NonNull(Box<NonNullTypeAnnotation<'src>>),
}

impl<'src> TypeAnnotation<'src> {
    /// The innermost named type, unwrapping all list and non-null wrappers.
    pub fn innermost_named(&self) -> &NamedTypeAnnotation<'src> {
        match self {
            TypeAnnotation::Named(named) => named,
            TypeAnnotation::List(list) => list.item.innermost_named(),
            TypeAnnotation::NonNull(non_null) => non_null.inner.innermost_named(),
        }
    }

    /// Unwraps a single level of non-null, if present.
    pub fn nullable(&self) -> &TypeAnnotation<'src> {
        match self {
            TypeAnnotation::NonNull(non_null) => &non_null.inner,
            other => other,
        }
    }

    pub fn span(&self) -> &SourceSpan {
        match self {
            TypeAnnotation::Named(named) => &named.span,
            TypeAnnotation::List(list) => &list.span,
            TypeAnnotation::NonNull(non_null) => &non_null.span,
        }
    }
}

impl fmt::Display for TypeAnnotation<'_> {
    /// Formats the annotation as written in source: `Foo`, `[Foo]`, `Foo!`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeAnnotation::Named(named) => write!(f, "{}", named.name),
            TypeAnnotation::List(list) => write!(f, "[{}]", list.item),
            TypeAnnotation::NonNull(non_null) => write!(f, "{}!", non_null.inner),
        }
    }
}

/// A bare named type reference.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedTypeAnnotation<'src> {
    pub name: Name<'src>,
    pub span: SourceSpan,
}

/// A list wrapper: `[Item]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ListTypeAnnotation<'src> {
    pub item: TypeAnnotation<'src>,
    pub span: SourceSpan,
}

/// A non-null wrapper: `Inner!`.
#[derive(Clone, Debug, PartialEq)]
pub struct NonNullTypeAnnotation<'src> {
    /// Invariant: never itself a `NonNull`.
    pub inner: TypeAnnotation<'src>,
    pub span: SourceSpan,
}
