use crate::loc::SchemaDefLocation;
use crate::named_ref::NamedRef;
use crate::types::GraphQLType;

/// A union type: an abstract choice between object types.
#[derive(Clone, Debug, PartialEq)]
pub struct UnionType {
    pub name: String,
    pub description: Option<String>,
    /// Member references in declaration order.
    pub members: Vec<NamedRef<GraphQLType>>,
    pub def_location: SchemaDefLocation,
}

impl UnionType {
    pub fn has_member(&self, type_name: &str) -> bool {
        self.members.iter().any(|member| member.name() == type_name)
    }
}
