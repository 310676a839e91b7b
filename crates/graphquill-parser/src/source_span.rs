use crate::SourcePosition;
use std::path::PathBuf;

/// Represents a span of source text from start to end position.
///
/// The span is a half-open interval: `[start_inclusive, end_exclusive)`.
/// - `start_inclusive`: Position of the first character of the source text
/// - `end_exclusive`: Position immediately after the last character
///
/// Optionally includes a file path (the "source label") for the referenced
/// source text. The label is carried into diagnostics only: it is metadata,
/// so two spans with identical positions compare equal regardless of label.
#[derive(Clone, Debug, Eq)]
pub struct SourceSpan {
    pub start_inclusive: SourcePosition,
    pub end_exclusive: SourcePosition,
    /// The file path to the source text this span refers to, if available.
    pub file_path: Option<PathBuf>,
}

impl SourceSpan {
    /// Creates a span without file path information.
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self {
            start_inclusive: start,
            end_exclusive: end,
            file_path: None,
        }
    }

    /// Creates a span with file path information.
    pub fn with_file(start: SourcePosition, end: SourcePosition, file_path: PathBuf) -> Self {
        Self {
            start_inclusive: start,
            end_exclusive: end,
            file_path: Some(file_path),
        }
    }

    /// A zero-width span at the start of an unnamed document.
    ///
    /// Used for nodes synthesized outside of any parse (e.g.
    /// programmatically-built AST fragments).
    pub fn synthetic() -> Self {
        let pos = SourcePosition::new(0, 0, 0);
        Self::new(pos, pos)
    }

    /// The source label shown in diagnostics: the file path when present,
    /// `<input>` otherwise.
    pub fn display_label(&self) -> String {
        self.file_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<input>".to_string())
    }
}

impl PartialEq for SourceSpan {
    fn eq(&self, other: &Self) -> bool {
        self.start_inclusive == other.start_inclusive && self.end_exclusive == other.end_exclusive
    }
}
