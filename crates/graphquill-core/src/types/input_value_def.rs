use crate::loc::SchemaDefLocation;
use crate::types::TypeAnnotation;
use serde_json::Value as JsonValue;

/// A field argument definition or an input-object field definition.
///
/// Both positions share the `name: Type = default` shape, so one type
/// covers them.
#[derive(Clone, Debug, PartialEq)]
pub struct InputValueDef {
    pub name: String,
    pub description: Option<String>,
    pub value_type: TypeAnnotation,
    /// The default, stored in untyped JSON form (enum defaults are their
    /// wire-name strings). Coerced against `value_type` at the point of
    /// use, exactly like a supplied value.
    pub default_value: Option<JsonValue>,
    pub def_location: SchemaDefLocation,
}

impl InputValueDef {
    /// An argument is required when its type is non-nullable and it has no
    /// default.
    pub fn is_required(&self) -> bool {
        !self.value_type.is_nullable() && self.default_value.is_none()
    }
}
