use crate::loc::SchemaDefLocation;

/// A custom scalar type.
///
/// The five spec scalars are variants of
/// [`GraphQLType`](crate::types::GraphQLType) directly and never appear
/// here. Custom scalars serialize and parse as pass-through JSON values;
/// richer scalar libraries sit outside the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarType {
    pub name: String,
    pub description: Option<String>,
    pub def_location: SchemaDefLocation,
}
