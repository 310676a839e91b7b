//! The GraphQL type system model.
//!
//! Types are a closed sum ([`GraphQLType`]); identity is by name inside
//! one [`Schema`](crate::schema::Schema). Cross-type references are
//! [`NamedRef`](crate::named_ref::NamedRef)s resolved against the schema
//! on access.

mod deprecation_state;
mod directive_def;
mod enum_type;
mod field;
mod field_resolver;
mod graphql_type;
mod input_object_type;
mod input_value_def;
mod interface_type;
mod object_type;
mod scalar_type;
mod type_annotation;
mod union_type;

pub use deprecation_state::DeprecationState;
pub use directive_def::DirectiveDef;
pub use enum_type::EnumType;
pub use enum_type::EnumVariant;
pub use field::Field;
pub use field_resolver::FieldResolver;
pub use graphql_type::GraphQLType;
pub use input_object_type::InputObjectType;
pub use input_value_def::InputValueDef;
pub use interface_type::InterfaceType;
pub use object_type::ObjectType;
pub use scalar_type::ScalarType;
pub use type_annotation::ListTypeAnnotation;
pub use type_annotation::NamedTypeAnnotation;
pub use type_annotation::TypeAnnotation;
pub use union_type::UnionType;

#[cfg(test)]
mod tests;
