use crate::SourceSpan;

/// A lexer or parser error with location information.
///
/// Parsing is fail-fast: the first `SyntaxError` aborts the parse and no
/// downstream stage (validation, execution) ever sees a partial document.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", self.format_oneline())]
pub struct SyntaxError {
    /// Human-readable primary error message.
    ///
    /// Examples: "Expected Name, found `}`", "Unterminated string"
    message: String,

    /// The span where the error was detected.
    ///
    /// - For "unexpected token" errors: the unexpected token's span
    /// - For "expected X" errors: where X should have appeared
    span: SourceSpan,
}

impl SyntaxError {
    /// Creates a new syntax error.
    pub fn new(message: impl Into<String>, span: SourceSpan) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// Returns the human-readable error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the span where the error was detected.
    pub fn span(&self) -> &SourceSpan {
        &self.span
    }

    /// Formats this error as a single-line summary.
    ///
    /// Produces output like:
    /// ```text
    /// schema.graphql:5:12: syntax error: Expected `:`, found Name "String"
    /// ```
    pub fn format_oneline(&self) -> String {
        format!(
            "{}:{}:{}: syntax error: {}",
            self.span.display_label(),
            self.span.start_inclusive.display_line(),
            self.span.start_inclusive.display_column(),
            self.message,
        )
    }
}
