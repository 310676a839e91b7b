use crate::loc::SchemaDefLocation;
use crate::types::InputValueDef;
use graphquill_parser::ast::DirectiveLocation;
use indexmap::IndexMap;

/// A directive declaration: the built-ins `@skip`, `@include`, and
/// `@deprecated`, or a custom SDL `directive @name on ...`.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveDef {
    pub name: String,
    pub description: Option<String>,
    pub locations: Vec<DirectiveLocation>,
    pub arguments: IndexMap<String, InputValueDef>,
    pub def_location: SchemaDefLocation,
}

impl DirectiveDef {
    pub fn argument(&self, name: &str) -> Option<&InputValueDef> {
        self.arguments.get(name)
    }

    /// True for the implicitly-defined spec directives.
    pub fn is_builtin(&self) -> bool {
        matches!(self.def_location, SchemaDefLocation::BuiltIn)
    }

    pub fn supports_location(&self, location: DirectiveLocation) -> bool {
        self.locations.contains(&location)
    }
}
