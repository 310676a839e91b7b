use crate::execution::GraphQLError;
use crate::execution::Location;
use graphquill_parser::SourceSpan;

/// One query-validation failure.
///
/// Validation errors are collected, not raised: a document with any of
/// them does not execute.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub locations: Vec<Location>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, spans: &[&SourceSpan]) -> Self {
        Self {
            message: message.into(),
            locations: spans.iter().map(|span| Location::from_span(span)).collect(),
        }
    }

    pub fn into_graphql_error(self) -> GraphQLError {
        GraphQLError {
            message: self.message,
            locations: self.locations,
            path: vec![],
            extensions: None,
        }
    }
}
