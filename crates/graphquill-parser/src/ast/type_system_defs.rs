use crate::ast::DirectiveAnnotation;
use crate::ast::Name;
use crate::ast::NamedTypeAnnotation;
use crate::ast::OperationKind;
use crate::ast::StringValue;
use crate::ast::TypeAnnotation;
use crate::ast::Value;
use crate::SourceSpan;

// =========================================================
// Schema definition
// =========================================================

/// A `schema { query: ..., mutation: ..., subscription: ... }` definition.
///
/// The parser accepts repeated schema definitions; detecting the duplicate
/// is the schema builder's job.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaDefinition<'src> {
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub operation_types: Vec<RootOperationTypeDefinition<'src>>,
    pub span: SourceSpan,
}

/// One `query: TypeName` entry of a schema definition.
#[derive(Clone, Debug, PartialEq)]
pub struct RootOperationTypeDefinition<'src> {
    pub operation: OperationKind,
    pub named_type: NamedTypeAnnotation<'src>,
    pub span: SourceSpan,
}

// =========================================================
// Type definitions
// =========================================================

/// A named type definition in SDL.
#[allow(clippy::large_enum_variant)]
#[derive(Clone, Debug, PartialEq)]
pub enum TypeDefinition<'src> {
    Scalar(ScalarTypeDefinition<'src>),
    Object(ObjectTypeDefinition<'src>),
    Interface(InterfaceTypeDefinition<'src>),
    Union(UnionTypeDefinition<'src>),
    Enum(EnumTypeDefinition<'src>),
    InputObject(InputObjectTypeDefinition<'src>),
}

impl<'src> TypeDefinition<'src> {
    pub fn name(&self) -> &Name<'src> {
        match self {
            TypeDefinition::Scalar(def) => &def.name,
            TypeDefinition::Object(def) => &def.name,
            TypeDefinition::Interface(def) => &def.name,
            TypeDefinition::Union(def) => &def.name,
            TypeDefinition::Enum(def) => &def.name,
            TypeDefinition::InputObject(def) => &def.name,
        }
    }

    pub fn span(&self) -> &SourceSpan {
        match self {
            TypeDefinition::Scalar(def) => &def.span,
            TypeDefinition::Object(def) => &def.span,
            TypeDefinition::Interface(def) => &def.span,
            TypeDefinition::Union(def) => &def.span,
            TypeDefinition::Enum(def) => &def.span,
            TypeDefinition::InputObject(def) => &def.span,
        }
    }
}

/// `scalar DateTime`
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarTypeDefinition<'src> {
    pub description: Option<StringValue<'src>>,
    pub name: Name<'src>,
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub span: SourceSpan,
}

/// `type Foo implements Bar { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTypeDefinition<'src> {
    pub description: Option<StringValue<'src>>,
    pub name: Name<'src>,
    pub interfaces: Vec<NamedTypeAnnotation<'src>>,
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub fields: Vec<FieldDefinition<'src>>,
    pub span: SourceSpan,
}

/// `interface Node { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceTypeDefinition<'src> {
    pub description: Option<StringValue<'src>>,
    pub name: Name<'src>,
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub fields: Vec<FieldDefinition<'src>>,
    pub span: SourceSpan,
}

/// `union SearchResult = A | B`
#[derive(Clone, Debug, PartialEq)]
pub struct UnionTypeDefinition<'src> {
    pub description: Option<StringValue<'src>>,
    pub name: Name<'src>,
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub members: Vec<NamedTypeAnnotation<'src>>,
    pub span: SourceSpan,
}

/// `enum Color { RED GREEN }`
#[derive(Clone, Debug, PartialEq)]
pub struct EnumTypeDefinition<'src> {
    pub description: Option<StringValue<'src>>,
    pub name: Name<'src>,
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub values: Vec<EnumValueDefinition<'src>>,
    pub span: SourceSpan,
}

/// One value of an enum type definition.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumValueDefinition<'src> {
    pub description: Option<StringValue<'src>>,
    pub name: Name<'src>,
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub span: SourceSpan,
}

/// `input Point { x: Float y: Float }`
#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectTypeDefinition<'src> {
    pub description: Option<StringValue<'src>>,
    pub name: Name<'src>,
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub fields: Vec<InputValueDefinition<'src>>,
    pub span: SourceSpan,
}

// =========================================================
// Fields & input values
// =========================================================

/// A field declaration on an object or interface type.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition<'src> {
    pub description: Option<StringValue<'src>>,
    pub name: Name<'src>,
    pub arguments: Vec<InputValueDefinition<'src>>,
    pub field_type: TypeAnnotation<'src>,
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub span: SourceSpan,
}

/// A field argument declaration or an input-object field declaration;
/// both share the `name: Type = default` shape.
#[derive(Clone, Debug, PartialEq)]
pub struct InputValueDefinition<'src> {
    pub description: Option<StringValue<'src>>,
    pub name: Name<'src>,
    pub value_type: TypeAnnotation<'src>,
    pub default_value: Option<Value<'src>>,
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub span: SourceSpan,
}

// =========================================================
// Type extensions
// =========================================================

/// An `extend <kind> Name ...` definition.
///
/// The extension kind must match the kind of the base type; the schema
/// builder enforces that (and rejects scalar extensions outright).
#[allow(clippy::large_enum_variant)]
#[derive(Clone, Debug, PartialEq)]
pub enum TypeExtension<'src> {
    Scalar(ScalarTypeExtension<'src>),
    Object(ObjectTypeExtension<'src>),
    Interface(InterfaceTypeExtension<'src>),
    Union(UnionTypeExtension<'src>),
    Enum(EnumTypeExtension<'src>),
    InputObject(InputObjectTypeExtension<'src>),
}

impl<'src> TypeExtension<'src> {
    pub fn name(&self) -> &Name<'src> {
        match self {
            TypeExtension::Scalar(ext) => &ext.name,
            TypeExtension::Object(ext) => &ext.name,
            TypeExtension::Interface(ext) => &ext.name,
            TypeExtension::Union(ext) => &ext.name,
            TypeExtension::Enum(ext) => &ext.name,
            TypeExtension::InputObject(ext) => &ext.name,
        }
    }

    pub fn span(&self) -> &SourceSpan {
        match self {
            TypeExtension::Scalar(ext) => &ext.span,
            TypeExtension::Object(ext) => &ext.span,
            TypeExtension::Interface(ext) => &ext.span,
            TypeExtension::Union(ext) => &ext.span,
            TypeExtension::Enum(ext) => &ext.span,
            TypeExtension::InputObject(ext) => &ext.span,
        }
    }

    /// The extension kind as written in source, for error messages.
    pub fn kind_keyword(&self) -> &'static str {
        match self {
            TypeExtension::Scalar(_) => "scalar",
            TypeExtension::Object(_) => "type",
            TypeExtension::Interface(_) => "interface",
            TypeExtension::Union(_) => "union",
            TypeExtension::Enum(_) => "enum",
            TypeExtension::InputObject(_) => "input",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarTypeExtension<'src> {
    pub name: Name<'src>,
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub span: SourceSpan,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTypeExtension<'src> {
    pub name: Name<'src>,
    pub interfaces: Vec<NamedTypeAnnotation<'src>>,
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub fields: Vec<FieldDefinition<'src>>,
    pub span: SourceSpan,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceTypeExtension<'src> {
    pub name: Name<'src>,
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub fields: Vec<FieldDefinition<'src>>,
    pub span: SourceSpan,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnionTypeExtension<'src> {
    pub name: Name<'src>,
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub members: Vec<NamedTypeAnnotation<'src>>,
    pub span: SourceSpan,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumTypeExtension<'src> {
    pub name: Name<'src>,
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub values: Vec<EnumValueDefinition<'src>>,
    pub span: SourceSpan,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectTypeExtension<'src> {
    pub name: Name<'src>,
    pub directives: Vec<DirectiveAnnotation<'src>>,
    pub fields: Vec<InputValueDefinition<'src>>,
    pub span: SourceSpan,
}

// =========================================================
// Directive definitions
// =========================================================

/// A `directive @name(...) on LOCATIONS` declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveDefinition<'src> {
    pub description: Option<StringValue<'src>>,
    pub name: Name<'src>,
    pub arguments: Vec<InputValueDefinition<'src>>,
    pub locations: Vec<DirectiveLocation>,
    pub span: SourceSpan,
}

/// The locations a directive may be applied to, per the June 2018 spec.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DirectiveLocation {
    // Executable locations
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    // Type-system locations
    Schema,
    Scalar,
    Object,
    FieldDefinition,
    ArgumentDefinition,
    Interface,
    Union,
    Enum,
    EnumValue,
    InputObject,
    InputFieldDefinition,
}

impl DirectiveLocation {
    /// Parses the SDL spelling (e.g. `FIELD_DEFINITION`).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "QUERY" => DirectiveLocation::Query,
            "MUTATION" => DirectiveLocation::Mutation,
            "SUBSCRIPTION" => DirectiveLocation::Subscription,
            "FIELD" => DirectiveLocation::Field,
            "FRAGMENT_DEFINITION" => DirectiveLocation::FragmentDefinition,
            "FRAGMENT_SPREAD" => DirectiveLocation::FragmentSpread,
            "INLINE_FRAGMENT" => DirectiveLocation::InlineFragment,
            "SCHEMA" => DirectiveLocation::Schema,
            "SCALAR" => DirectiveLocation::Scalar,
            "OBJECT" => DirectiveLocation::Object,
            "FIELD_DEFINITION" => DirectiveLocation::FieldDefinition,
            "ARGUMENT_DEFINITION" => DirectiveLocation::ArgumentDefinition,
            "INTERFACE" => DirectiveLocation::Interface,
            "UNION" => DirectiveLocation::Union,
            "ENUM" => DirectiveLocation::Enum,
            "ENUM_VALUE" => DirectiveLocation::EnumValue,
            "INPUT_OBJECT" => DirectiveLocation::InputObject,
            "INPUT_FIELD_DEFINITION" => DirectiveLocation::InputFieldDefinition,
            _ => return None,
        })
    }

    /// The SDL spelling of this location.
    pub fn keyword(&self) -> &'static str {
        match self {
            DirectiveLocation::Query => "QUERY",
            DirectiveLocation::Mutation => "MUTATION",
            DirectiveLocation::Subscription => "SUBSCRIPTION",
            DirectiveLocation::Field => "FIELD",
            DirectiveLocation::FragmentDefinition => "FRAGMENT_DEFINITION",
            DirectiveLocation::FragmentSpread => "FRAGMENT_SPREAD",
            DirectiveLocation::InlineFragment => "INLINE_FRAGMENT",
            DirectiveLocation::Schema => "SCHEMA",
            DirectiveLocation::Scalar => "SCALAR",
            DirectiveLocation::Object => "OBJECT",
            DirectiveLocation::FieldDefinition => "FIELD_DEFINITION",
            DirectiveLocation::ArgumentDefinition => "ARGUMENT_DEFINITION",
            DirectiveLocation::Interface => "INTERFACE",
            DirectiveLocation::Union => "UNION",
            DirectiveLocation::Enum => "ENUM",
            DirectiveLocation::EnumValue => "ENUM_VALUE",
            DirectiveLocation::InputObject => "INPUT_OBJECT",
            DirectiveLocation::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
        }
    }
}
