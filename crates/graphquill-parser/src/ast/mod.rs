//! AST types for parsed GraphQL documents.
//!
//! All node types are parameterized over a `'src` lifetime that borrows
//! strings from the source text via [`Cow<'src, str>`]. Nodes own their
//! children, are immutable after parse, and every node carries a
//! [`SourceSpan`] for location tracking.
//!
//! Node categories are closed sums ([`Definition`], [`Selection`],
//! [`Value`], [`TypeAnnotation`], [`TypeDefinition`], [`TypeExtension`]):
//! consumers match exhaustively rather than downcast.
//!
//! [`Cow<'src, str>`]: std::borrow::Cow
//! [`SourceSpan`]: crate::SourceSpan

mod directive_annotation;
mod document;
mod executable_defs;
mod name;
mod serialize;
mod type_annotation;
mod type_system_defs;
mod values;

pub use directive_annotation::Argument;
pub use directive_annotation::DirectiveAnnotation;
pub use document::Definition;
pub use document::Document;
pub use executable_defs::Field;
pub use executable_defs::FragmentDefinition;
pub use executable_defs::FragmentSpread;
pub use executable_defs::InlineFragment;
pub use executable_defs::OperationDefinition;
pub use executable_defs::OperationKind;
pub use executable_defs::Selection;
pub use executable_defs::SelectionSet;
pub use executable_defs::TypeCondition;
pub use executable_defs::VariableDefinition;
pub use name::Name;
pub use type_annotation::ListTypeAnnotation;
pub use type_annotation::NamedTypeAnnotation;
pub use type_annotation::NonNullTypeAnnotation;
pub use type_annotation::TypeAnnotation;
pub use type_system_defs::DirectiveDefinition;
pub use type_system_defs::DirectiveLocation;
pub use type_system_defs::EnumTypeDefinition;
pub use type_system_defs::EnumTypeExtension;
pub use type_system_defs::EnumValueDefinition;
pub use type_system_defs::FieldDefinition;
pub use type_system_defs::InputObjectTypeDefinition;
pub use type_system_defs::InputObjectTypeExtension;
pub use type_system_defs::InputValueDefinition;
pub use type_system_defs::InterfaceTypeDefinition;
pub use type_system_defs::InterfaceTypeExtension;
pub use type_system_defs::ObjectTypeDefinition;
pub use type_system_defs::ObjectTypeExtension;
pub use type_system_defs::RootOperationTypeDefinition;
pub use type_system_defs::ScalarTypeDefinition;
pub use type_system_defs::ScalarTypeExtension;
pub use type_system_defs::SchemaDefinition;
pub use type_system_defs::TypeDefinition;
pub use type_system_defs::TypeExtension;
pub use type_system_defs::UnionTypeDefinition;
pub use type_system_defs::UnionTypeExtension;
pub use values::BooleanValue;
pub use values::EnumValue;
pub use values::FloatValue;
pub use values::IntValue;
pub use values::ListValue;
pub use values::NullValue;
pub use values::ObjectField;
pub use values::ObjectValue;
pub use values::StringValue;
pub use values::Value;
pub use values::VariableValue;

#[cfg(test)]
mod tests;
