use crate::loc::SchemaDefLocation;
use crate::named_ref::NamedRef;
use crate::types::Field;
use crate::types::GraphQLType;
use indexmap::IndexMap;

/// An object type: the concrete, field-bearing shape that response data
/// is made of.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    /// Field definitions in declaration order.
    pub fields: IndexMap<String, Field>,
    pub interfaces: Vec<NamedRef<GraphQLType>>,
    pub def_location: SchemaDefLocation,
}

impl ObjectType {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// True when this object declares `implements` for the named
    /// interface.
    pub fn implements(&self, interface_name: &str) -> bool {
        self.interfaces
            .iter()
            .any(|iface| iface.name() == interface_name)
    }
}
