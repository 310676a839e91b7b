mod execute;
mod validate_query;
mod validate_schema;

pub(crate) use execute::ExecuteCommand;
pub(crate) use validate_query::ValidateQueryCommand;
pub(crate) use validate_schema::ValidateSchemaCommand;
