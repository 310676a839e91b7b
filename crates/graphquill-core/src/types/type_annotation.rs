use crate::loc::SchemaDefLocation;
use crate::named_ref::NamedRef;
use crate::schema::Schema;
use crate::types::GraphQLType;
use graphquill_parser::ast;
use std::fmt;

/// A schema-side type reference with its wrapping structure.
///
/// Unlike the AST's three-variant grammar (`NonNullType` wrapping), each
/// annotation node carries a `nullable` flag: `[Int!]!` is
/// `List { nullable: false, item: Named { nullable: false, .. } }`.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeAnnotation {
    Named(NamedTypeAnnotation),
    List(Box<ListTypeAnnotation>),
}

/// A named (innermost) type reference.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedTypeAnnotation {
    pub nullable: bool,
    pub type_ref: NamedRef<GraphQLType>,
}

/// A list wrapper.
#[derive(Clone, Debug, PartialEq)]
pub struct ListTypeAnnotation {
    pub nullable: bool,
    pub item: TypeAnnotation,
}

impl TypeAnnotation {
    /// Converts an AST type reference into a schema annotation. The named
    /// type is referenced by name only; whether it exists is checked when
    /// the reference is dereferenced (or during schema validation).
    pub fn from_ast(annotation: &ast::TypeAnnotation<'_>) -> Self {
        Self::from_ast_impl(annotation, true)
    }

    fn from_ast_impl(annotation: &ast::TypeAnnotation<'_>, nullable: bool) -> Self {
        match annotation {
            ast::TypeAnnotation::NonNull(non_null) => {
                Self::from_ast_impl(&non_null.inner, false)
            }
            ast::TypeAnnotation::Named(named) => TypeAnnotation::Named(NamedTypeAnnotation {
                nullable,
                type_ref: NamedRef::new(
                    named.name.as_str(),
                    SchemaDefLocation::Document(named.span.clone()),
                ),
            }),
            ast::TypeAnnotation::List(list) => TypeAnnotation::List(Box::new(ListTypeAnnotation {
                nullable,
                item: Self::from_ast_impl(&list.item, true),
            })),
        }
    }

    /// A nullable reference to a named type, for programmatic construction.
    pub fn named(name: impl Into<String>) -> Self {
        TypeAnnotation::Named(NamedTypeAnnotation {
            nullable: true,
            type_ref: NamedRef::new(name, SchemaDefLocation::BuiltIn),
        })
    }

    /// The nullable version of this annotation (outermost level only).
    pub fn as_nullable(&self) -> Self {
        match self {
            TypeAnnotation::Named(named) => TypeAnnotation::Named(NamedTypeAnnotation {
                nullable: true,
                type_ref: named.type_ref.clone(),
            }),
            TypeAnnotation::List(list) => TypeAnnotation::List(Box::new(ListTypeAnnotation {
                nullable: true,
                item: list.item.clone(),
            })),
        }
    }

    /// The non-null version of this annotation.
    pub fn non_null(self) -> Self {
        match self {
            TypeAnnotation::Named(mut named) => {
                named.nullable = false;
                TypeAnnotation::Named(named)
            }
            TypeAnnotation::List(mut list) => {
                list.nullable = false;
                TypeAnnotation::List(list)
            }
        }
    }

    /// A nullable list of this annotation.
    pub fn list_of(item: Self) -> Self {
        TypeAnnotation::List(Box::new(ListTypeAnnotation {
            nullable: true,
            item,
        }))
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            TypeAnnotation::Named(named) => named.nullable,
            TypeAnnotation::List(list) => list.nullable,
        }
    }

    /// The innermost named reference, unwrapping all list nesting.
    pub fn innermost_named(&self) -> &NamedTypeAnnotation {
        match self {
            TypeAnnotation::Named(named) => named,
            TypeAnnotation::List(list) => list.item.innermost_named(),
        }
    }

    /// Resolves the innermost named type against a schema. `None` when the
    /// name is not registered.
    pub fn innermost_type<'schema>(&self, schema: &'schema Schema) -> Option<&'schema GraphQLType> {
        self.innermost_named().type_ref.deref(schema).ok()
    }

    /// True when the innermost named type resolves to an input type.
    pub fn is_input_type(&self, schema: &Schema) -> bool {
        self.innermost_type(schema)
            .is_some_and(GraphQLType::is_input_type)
    }

    /// True when the innermost named type resolves to an output type.
    pub fn is_output_type(&self, schema: &Schema) -> bool {
        self.innermost_type(schema)
            .is_some_and(GraphQLType::is_output_type)
    }

    /// Structural equality disregarding nullability at the outermost level
    /// is *not* what argument invariance needs; this is full equality of
    /// shape, names, and nullability.
    pub fn is_same_type(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeAnnotation::Named(a), TypeAnnotation::Named(b)) => {
                a.nullable == b.nullable && a.type_ref.name() == b.type_ref.name()
            }
            (TypeAnnotation::List(a), TypeAnnotation::List(b)) => {
                a.nullable == b.nullable && a.item.is_same_type(&b.item)
            }
            _ => false,
        }
    }

    /// Covariant subtype check: `self` may be used where `other` is
    /// declared. `T!` is a subtype of `T`; `[A]` only of `[B]` when `A` is
    /// a subtype of `B`; a named type is a subtype of an interface it
    /// implements or a union it belongs to.
    pub fn is_subtype_of(&self, other: &Self, schema: &Schema) -> bool {
        // A non-nullable position can never accept a nullable value.
        if self.is_nullable() && !other.is_nullable() {
            return false;
        }
        match (self, other) {
            (TypeAnnotation::Named(sub), TypeAnnotation::Named(sup)) => {
                if sub.type_ref.name() == sup.type_ref.name() {
                    return true;
                }
                let (Ok(sub_type), Ok(sup_type)) =
                    (sub.type_ref.deref(schema), sup.type_ref.deref(schema))
                else {
                    return false;
                };
                schema.is_possible_subtype(sub_type, sup_type)
            }
            (TypeAnnotation::List(sub), TypeAnnotation::List(sup)) => {
                sub.item.is_subtype_of(&sup.item, schema)
            }
            _ => false,
        }
    }
}

impl fmt::Display for TypeAnnotation {
    /// Formats in SDL syntax: `Foo`, `[Foo!]`, `Foo!`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeAnnotation::Named(named) => {
                write!(f, "{}", named.type_ref.name())?;
                if !named.nullable {
                    write!(f, "!")?;
                }
                Ok(())
            }
            TypeAnnotation::List(list) => {
                write!(f, "[{}]", list.item)?;
                if !list.nullable {
                    write!(f, "!")?;
                }
                Ok(())
            }
        }
    }
}
