use crate::schema::Schema;
use crate::types::Field;
use crate::types::GraphQLType;
use graphquill_parser::ast;
use serde::Serialize;
use serde_json::Map as JsonMap;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fmt;

/// One step of a response path: a response name or a list index.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// An error raised inside a resolver.
///
/// Converts from anything `Display`, so resolvers can use `?` freely:
///
/// ```ignore
/// let id: u64 = raw.parse()?;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ResolverError {
    pub message: String,
    /// Serialized under the error's `extensions` key when present.
    pub extensions: Option<JsonValue>,
}

impl ResolverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extensions: None,
        }
    }

    pub fn with_extensions(mut self, extensions: JsonValue) -> Self {
        self.extensions = Some(extensions);
        self
    }
}

impl<T: fmt::Display> From<T> for ResolverError {
    fn from(err: T) -> Self {
        ResolverError::new(err.to_string())
    }
}

/// Static information about the field being resolved, passed to
/// resolvers, middlewares, and instrumentation.
pub struct ResolveInfo<'exec> {
    /// The field name as declared in the schema (not the alias).
    pub field_name: &'exec str,
    pub field_def: &'exec Field,
    pub parent_type: &'exec GraphQLType,
    /// Path from the response root to this field's response position.
    pub path: Vec<PathSegment>,
    pub schema: &'exec Schema,
    /// The operation's coerced variable values.
    pub variables: &'exec JsonMap<String, JsonValue>,
    /// All fragment definitions of the document, by name.
    pub fragments: &'exec HashMap<&'exec str, &'exec ast::FragmentDefinition<'exec>>,
    pub operation: &'exec ast::OperationDefinition<'exec>,
    /// The AST field nodes merged under this response name.
    pub nodes: &'exec [&'exec ast::Field<'exec>],
}

/// Everything a resolver receives: the parent value, the coerced
/// arguments, the opaque context value, and the resolve info.
pub struct ResolveContext<'exec> {
    /// The value the parent resolver produced.
    pub parent_value: &'exec JsonValue,
    pub arguments: &'exec JsonMap<String, JsonValue>,
    /// The per-execution context value, opaque to the engine.
    pub context_value: &'exec JsonValue,
    pub info: &'exec ResolveInfo<'exec>,
}

impl ResolveContext<'_> {
    /// Fetches an argument by name; `Null` when absent.
    pub fn argument(&self, name: &str) -> &JsonValue {
        self.arguments.get(name).unwrap_or(&JsonValue::Null)
    }
}

/// The default resolver: key lookup on an object-shaped parent value,
/// `null` for anything else.
pub fn default_resolve(ctx: &ResolveContext<'_>) -> Result<JsonValue, ResolverError> {
    match ctx.parent_value {
        JsonValue::Object(map) => Ok(map
            .get(ctx.info.field_name)
            .cloned()
            .unwrap_or(JsonValue::Null)),
        _ => Ok(JsonValue::Null),
    }
}
