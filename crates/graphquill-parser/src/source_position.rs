/// Source position information tracked by the lexer as it scans.
///
/// This is a pure data struct with no mutation methods; the lexer is
/// responsible for computing position values while consuming input.
///
/// # Indexing Convention
///
/// **All position values are 0-based:**
/// - `line`: 0 = first line of the document
/// - `column`: character count within the current line (counts `char`s, not
///   bytes, so a multi-byte character still advances the column by 1)
/// - `byte_offset`: byte offset within the whole document
///
/// Error payloads and diagnostics display 1-based values; use
/// [`SourcePosition::display_line()`] and [`SourcePosition::display_column()`]
/// for those.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SourcePosition {
    line: usize,
    column: usize,
    byte_offset: usize,
}

impl SourcePosition {
    /// Create a new SourcePosition from 0-based values.
    pub fn new(line: usize, column: usize, byte_offset: usize) -> Self {
        Self {
            line,
            column,
            byte_offset,
        }
    }

    /// Returns the 0-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the 0-based character column within the current line.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns the 0-based byte offset from the start of the document.
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Returns the 1-based line number used in diagnostics and response
    /// error locations.
    pub fn display_line(&self) -> usize {
        self.line + 1
    }

    /// Returns the 1-based column number used in diagnostics and response
    /// error locations.
    pub fn display_column(&self) -> usize {
        self.column + 1
    }
}
