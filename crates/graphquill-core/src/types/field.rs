use crate::loc::SchemaDefLocation;
use crate::types::DeprecationState;
use crate::types::FieldResolver;
use crate::types::InputValueDef;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;

/// A field declared on an object or interface type.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub description: Option<String>,
    pub type_annotation: TypeAnnotation,
    /// Argument definitions, in declaration order.
    pub parameters: IndexMap<String, InputValueDef>,
    pub deprecation: DeprecationState,
    /// `None` means the default resolver (mapping lookup on the parent
    /// value) applies.
    pub resolver: Option<FieldResolver>,
    pub def_location: SchemaDefLocation,
}

impl Field {
    pub fn parameter(&self, name: &str) -> Option<&InputValueDef> {
        self.parameters.get(name)
    }

    /// Deprecation reason, when the field carries `@deprecated`.
    pub fn deprecation_reason(&self) -> Option<&str> {
        self.deprecation.reason()
    }
}
