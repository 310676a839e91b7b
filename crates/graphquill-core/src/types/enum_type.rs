use crate::loc::SchemaDefLocation;
use crate::types::DeprecationState;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// An enum type with its ordered variants.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumType {
    pub name: String,
    pub description: Option<String>,
    /// Wire name → variant, in declaration order.
    pub variants: IndexMap<String, EnumVariant>,
    pub def_location: SchemaDefLocation,
}

impl EnumType {
    pub fn variant(&self, wire_name: &str) -> Option<&EnumVariant> {
        self.variants.get(wire_name)
    }

    /// Finds the variant whose internal value equals `value`, used when
    /// serializing resolver output back to wire names.
    pub fn variant_for_value(&self, value: &JsonValue) -> Option<&EnumVariant> {
        self.variants.values().find(|variant| &variant.value == value)
    }
}

/// One value of an enum type.
///
/// `name` is the wire name (what appears in documents and responses);
/// `value` is the internal payload resolvers produce and receive. For
/// SDL-defined enums the payload is the wire name itself; programmatic
/// types may map variants onto other values.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumVariant {
    pub name: String,
    pub description: Option<String>,
    pub value: JsonValue,
    pub deprecation: DeprecationState,
    pub def_location: SchemaDefLocation,
}
