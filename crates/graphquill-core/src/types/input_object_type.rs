use crate::loc::SchemaDefLocation;
use crate::types::InputValueDef;
use indexmap::IndexMap;

/// An input object type: a named bag of input fields.
#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, InputValueDef>,
    pub def_location: SchemaDefLocation,
}

impl InputObjectType {
    pub fn field(&self, name: &str) -> Option<&InputValueDef> {
        self.fields.get(name)
    }
}
