use crate::loc::SchemaDefLocation;
use crate::types::Field;
use indexmap::IndexMap;

/// An interface type: an abstract set of fields that implementing object
/// types must declare.
#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, Field>,
    pub def_location: SchemaDefLocation,
}

impl InterfaceType {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }
}
