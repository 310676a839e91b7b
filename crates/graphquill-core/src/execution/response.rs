use crate::execution::PathSegment;
use graphquill_parser::SourceSpan;
use serde::Serialize;
use serde_json::Map as JsonMap;
use serde_json::Value as JsonValue;

/// A 1-based line/column pair as it appears in response error payloads.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// The location of a span's start, 1-based.
    pub fn from_span(span: &SourceSpan) -> Self {
        Self {
            line: span.start_inclusive.display_line(),
            column: span.start_inclusive.display_column(),
        }
    }
}

/// One entry of a response's `errors` list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<JsonValue>,
}

impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: vec![],
            path: vec![],
            extensions: None,
        }
    }

    pub fn at_span(message: impl Into<String>, span: &SourceSpan) -> Self {
        Self {
            message: message.into(),
            locations: vec![Location::from_span(span)],
            path: vec![],
            extensions: None,
        }
    }

    pub fn with_path(mut self, path: Vec<PathSegment>) -> Self {
        self.path = path;
        self
    }
}

/// The structured result of processing a GraphQL query.
///
/// `data` is `None` (omitted from serialization) for operation-level
/// failures (syntax errors, validation errors, unknown operation names,
/// variable coercion failures). For resolver errors `data` is kept,
/// possibly with nulls propagated up to the nearest nullable field.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphQLError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<JsonMap<String, JsonValue>>,
}

impl Response {
    /// A response carrying data and any collected field errors.
    pub fn new(data: JsonValue, errors: Vec<GraphQLError>) -> Self {
        Self {
            data: Some(data),
            errors: if errors.is_empty() {
                None
            } else {
                Some(errors)
            },
            extensions: None,
        }
    }

    /// An operation-level failure: no data at all.
    pub fn from_errors(errors: Vec<GraphQLError>) -> Self {
        Self {
            data: None,
            errors: Some(errors),
            extensions: None,
        }
    }

    /// Attaches a named extension payload.
    pub fn add_extension(&mut self, name: impl Into<String>, payload: JsonValue) {
        self.extensions
            .get_or_insert_with(JsonMap::new)
            .insert(name.into(), payload);
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_none()
    }
}
