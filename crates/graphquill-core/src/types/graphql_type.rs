use crate::loc::SchemaDefLocation;
use crate::named_ref::DerefByName;
use crate::named_ref::DerefByNameError;
use crate::schema::Schema;
use crate::types::EnumType;
use crate::types::Field;
use crate::types::InputObjectType;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::ScalarType;
use crate::types::UnionType;
use indexmap::IndexMap;

/// Represents a defined GraphQL type.
///
/// The five spec scalars are bare variants; all other types box their
/// definition. The set is closed: every capability classification
/// (input/output, composite, leaf, abstract) is a `match` away.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphQLType {
    Bool,
    Float,
    ID,
    Int,
    String,
    Scalar(Box<ScalarType>),
    Enum(Box<EnumType>),
    InputObject(Box<InputObjectType>),
    Interface(Box<InterfaceType>),
    Object(Box<ObjectType>),
    Union(Box<UnionType>),
}

impl GraphQLType {
    /// The unique type name within a schema.
    pub fn name(&self) -> &str {
        match self {
            GraphQLType::Bool => "Boolean",
            GraphQLType::Float => "Float",
            GraphQLType::ID => "ID",
            GraphQLType::Int => "Int",
            GraphQLType::String => "String",
            GraphQLType::Scalar(t) => &t.name,
            GraphQLType::Enum(t) => &t.name,
            GraphQLType::InputObject(t) => &t.name,
            GraphQLType::Interface(t) => &t.name,
            GraphQLType::Object(t) => &t.name,
            GraphQLType::Union(t) => &t.name,
        }
    }

    /// Where this type was defined within the schema.
    pub fn def_location(&self) -> SchemaDefLocation {
        match self {
            GraphQLType::Bool
            | GraphQLType::Float
            | GraphQLType::ID
            | GraphQLType::Int
            | GraphQLType::String => SchemaDefLocation::BuiltIn,
            GraphQLType::Scalar(t) => t.def_location.clone(),
            GraphQLType::Enum(t) => t.def_location.clone(),
            GraphQLType::InputObject(t) => t.def_location.clone(),
            GraphQLType::Interface(t) => t.def_location.clone(),
            GraphQLType::Object(t) => t.def_location.clone(),
            GraphQLType::Union(t) => t.def_location.clone(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            GraphQLType::Bool
            | GraphQLType::Float
            | GraphQLType::ID
            | GraphQLType::Int
            | GraphQLType::String => None,
            GraphQLType::Scalar(t) => t.description.as_deref(),
            GraphQLType::Enum(t) => t.description.as_deref(),
            GraphQLType::InputObject(t) => t.description.as_deref(),
            GraphQLType::Interface(t) => t.description.as_deref(),
            GraphQLType::Object(t) => t.description.as_deref(),
            GraphQLType::Union(t) => t.description.as_deref(),
        }
    }

    // =========================================================================
    // Downcasts
    // =========================================================================

    pub fn as_object(&self) -> Option<&ObjectType> {
        if let Self::Object(t) = self { Some(t) } else { None }
    }

    pub fn as_interface(&self) -> Option<&InterfaceType> {
        if let Self::Interface(t) = self { Some(t) } else { None }
    }

    pub fn as_union(&self) -> Option<&UnionType> {
        if let Self::Union(t) = self { Some(t) } else { None }
    }

    pub fn as_enum(&self) -> Option<&EnumType> {
        if let Self::Enum(t) = self { Some(t) } else { None }
    }

    pub fn as_input_object(&self) -> Option<&InputObjectType> {
        if let Self::InputObject(t) = self { Some(t) } else { None }
    }

    pub fn as_scalar(&self) -> Option<&ScalarType> {
        if let Self::Scalar(t) = self { Some(t) } else { None }
    }

    // =========================================================================
    // Capability classification
    // =========================================================================

    /// Input types: scalars, enums, and input objects.
    pub fn is_input_type(&self) -> bool {
        matches!(
            self,
            GraphQLType::Bool
                | GraphQLType::Float
                | GraphQLType::ID
                | GraphQLType::Int
                | GraphQLType::String
                | GraphQLType::Scalar(_)
                | GraphQLType::Enum(_)
                | GraphQLType::InputObject(_)
        )
    }

    /// Output types: everything except input objects.
    pub fn is_output_type(&self) -> bool {
        !matches!(self, GraphQLType::InputObject(_))
    }

    /// Composite types: object, interface, union.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            GraphQLType::Object(_) | GraphQLType::Interface(_) | GraphQLType::Union(_)
        )
    }

    /// Leaf types: scalars and enums.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            GraphQLType::Bool
                | GraphQLType::Float
                | GraphQLType::ID
                | GraphQLType::Int
                | GraphQLType::String
                | GraphQLType::Scalar(_)
                | GraphQLType::Enum(_)
        )
    }

    /// Abstract types: interface and union. Never appear directly in
    /// response data; resolved to a concrete object type at execution.
    pub fn is_abstract(&self) -> bool {
        matches!(self, GraphQLType::Interface(_) | GraphQLType::Union(_))
    }

    /// True for the spec scalars and introspection types.
    pub fn is_builtin(&self) -> bool {
        match self {
            GraphQLType::Bool
            | GraphQLType::Float
            | GraphQLType::ID
            | GraphQLType::Int
            | GraphQLType::String => true,
            other => other.name().starts_with("__"),
        }
    }

    /// The field map for object and interface types.
    pub fn fields(&self) -> Option<&IndexMap<String, Field>> {
        match self {
            GraphQLType::Object(t) => Some(&t.fields),
            GraphQLType::Interface(t) => Some(&t.fields),
            _ => None,
        }
    }

    /// Looks up a field on an object or interface type.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().and_then(|fields| fields.get(name))
    }
}

impl DerefByName for GraphQLType {
    fn deref_name<'schema>(
        schema: &'schema Schema,
        name: &str,
    ) -> Result<&'schema Self, DerefByNameError> {
        schema
            .types()
            .get(name)
            .ok_or_else(|| DerefByNameError::DanglingReference(name.to_string()))
    }
}
