//! Zero-copy lexer for GraphQL source text.
//!
//! Token values borrow directly from the source string using
//! `Cow::Borrowed`, avoiding allocations for names, numbers, and strings
//! without escape sequences.
//!
//! Whitespace, the Unicode BOM, line terminators, and commas are skipped as
//! ignored tokens per the GraphQL spec. `#` comments are emitted as
//! [`TokenKind::Comment`] tokens so that tooling can observe them; the
//! [`TokenStream`](crate::TokenStream) the parser consumes filters them out.
//!
//! Lexing is fail-fast: the first invalid character, unterminated string,
//! bad escape, or malformed number aborts with a [`SyntaxError`].

use crate::token::Token;
use crate::token::TokenKind;
use crate::SourcePosition;
use crate::SourceSpan;
use crate::SyntaxError;
use std::borrow::Cow;
use std::path::PathBuf;

/// A lexer over a `&str` input.
///
/// The `'src` lifetime ties token values to the source string. See the
/// module documentation for details.
pub struct Lexer<'src> {
    /// The full source text being lexed.
    source: &'src str,

    /// Current byte offset from the start of `source`.
    ///
    /// The remaining text to lex is `&source[curr_byte_offset..]`.
    curr_byte_offset: usize,

    /// Current 0-based line number.
    curr_line: usize,

    /// Current 0-based character column.
    curr_column: usize,

    /// Whether the previous character was `\r`.
    ///
    /// Used to handle `\r\n` as a single newline: when we see `\r`, we set
    /// this flag; if the next character is `\n`, we skip it without
    /// incrementing the line number again.
    last_char_was_cr: bool,

    /// Whether the EOF token has been emitted (terminates iteration).
    finished: bool,

    /// Optional file path for error messages and spans.
    file_path: Option<PathBuf>,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer from a string slice.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            curr_byte_offset: 0,
            curr_line: 0,
            curr_column: 0,
            last_char_was_cr: false,
            finished: false,
            file_path: None,
        }
    }

    /// Creates a new lexer with an associated file path.
    ///
    /// The file path is included in token spans for error reporting.
    pub fn with_file_path(source: &'src str, path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: Some(path.into()),
            ..Self::new(source)
        }
    }

    // =========================================================================
    // Position and scanning helpers
    // =========================================================================

    /// Returns the remaining source text to be lexed.
    fn remaining(&self) -> &'src str {
        &self.source[self.curr_byte_offset..]
    }

    /// Returns the current source position.
    fn curr_position(&self) -> SourcePosition {
        SourcePosition::new(self.curr_line, self.curr_column, self.curr_byte_offset)
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Peeks at the nth character ahead without consuming.
    fn peek_char_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Consumes the next character and updates position tracking.
    ///
    /// Handles `\n`, `\r`, and `\r\n` line terminators.
    fn consume(&mut self) -> Option<char> {
        let ch = self.peek_char()?;

        if ch == '\n' {
            if self.last_char_was_cr {
                // The \n of a \r\n pair; the line was already advanced when
                // the \r was consumed.
                self.last_char_was_cr = false;
            } else {
                self.curr_line += 1;
                self.curr_column = 0;
            }
        } else if ch == '\r' {
            self.curr_line += 1;
            self.curr_column = 0;
            self.last_char_was_cr = true;
        } else {
            self.curr_column += 1;
            self.last_char_was_cr = false;
        }

        self.curr_byte_offset += ch.len_utf8();
        Some(ch)
    }

    /// Creates a `SourceSpan` from a start position to the current position.
    fn make_span(&self, start: SourcePosition) -> SourceSpan {
        let end = self.curr_position();
        if let Some(path) = &self.file_path {
            SourceSpan::with_file(start, end, path.clone())
        } else {
            SourceSpan::new(start, end)
        }
    }

    fn make_token(&self, kind: TokenKind<'src>, start: SourcePosition) -> Token<'src> {
        Token {
            kind,
            span: self.make_span(start),
        }
    }

    fn error(&self, message: impl Into<String>, start: SourcePosition) -> SyntaxError {
        SyntaxError::new(message, self.make_span(start))
    }

    // =========================================================================
    // Lexer main loop
    // =========================================================================

    /// Advances to the next token.
    ///
    /// After the `Eof` token has been returned once, every subsequent call
    /// returns `Eof` again with a zero-width span.
    pub fn next_token(&mut self) -> Result<Token<'src>, SyntaxError> {
        self.skip_ignored();

        let start = self.curr_position();

        let Some(ch) = self.peek_char() else {
            self.finished = true;
            return Ok(self.make_token(TokenKind::Eof, start));
        };

        match ch {
            '#' => self.lex_comment(start),

            '!' => self.single(TokenKind::Bang, start),
            '$' => self.single(TokenKind::Dollar, start),
            '&' => self.single(TokenKind::Ampersand, start),
            '(' => self.single(TokenKind::ParenOpen, start),
            ')' => self.single(TokenKind::ParenClose, start),
            ':' => self.single(TokenKind::Colon, start),
            '=' => self.single(TokenKind::Equals, start),
            '@' => self.single(TokenKind::At, start),
            '[' => self.single(TokenKind::SquareBracketOpen, start),
            ']' => self.single(TokenKind::SquareBracketClose, start),
            '{' => self.single(TokenKind::CurlyBraceOpen, start),
            '}' => self.single(TokenKind::CurlyBraceClose, start),
            '|' => self.single(TokenKind::Pipe, start),

            '.' => self.lex_ellipsis(start),
            '"' => self.lex_string(start),

            c if is_name_start(c) => Ok(self.lex_name(start)),
            c if c == '-' || c.is_ascii_digit() => self.lex_number(start),

            c => {
                self.consume();
                Err(self.error(format!("Unexpected character `{c}`"), start))
            }
        }
    }

    fn single(
        &mut self,
        kind: TokenKind<'src>,
        start: SourcePosition,
    ) -> Result<Token<'src>, SyntaxError> {
        self.consume();
        Ok(self.make_token(kind, start))
    }

    /// Skips ignored tokens: whitespace, BOM, line terminators, and commas.
    fn skip_ignored(&mut self) {
        while let Some(ch) = self.peek_char() {
            match ch {
                ' ' | '\t' | '\n' | '\r' | ',' | '\u{FEFF}' => {
                    self.consume();
                }
                _ => break,
            }
        }
    }

    // =========================================================================
    // Comments
    // =========================================================================

    /// Lexes a `#` comment up to (but not including) the line terminator.
    fn lex_comment(&mut self, start: SourcePosition) -> Result<Token<'src>, SyntaxError> {
        // Consume the '#'
        self.consume();
        let content_start = self.curr_byte_offset;

        // Comments run to the end of the line; memchr2 finds the terminator
        // without walking char-by-char.
        let content_len = match memchr::memchr2(b'\n', b'\r', self.remaining().as_bytes()) {
            Some(idx) => idx,
            None => self.remaining().len(),
        };
        while self.curr_byte_offset < content_start + content_len {
            self.consume();
        }

        let content = &self.source[content_start..self.curr_byte_offset];
        Ok(self.make_token(TokenKind::Comment(Cow::Borrowed(content)), start))
    }

    // =========================================================================
    // Ellipsis
    // =========================================================================

    /// Lexes `...`. One or two dots are an error.
    fn lex_ellipsis(&mut self, start: SourcePosition) -> Result<Token<'src>, SyntaxError> {
        if self.remaining().starts_with("...") {
            self.consume();
            self.consume();
            self.consume();
            return Ok(self.make_token(TokenKind::Ellipsis, start));
        }
        self.consume();
        Err(self.error("Unexpected `.` (use `...` for a spread)", start))
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// Lexes a name matching `[_A-Za-z][_A-Za-z0-9]*`.
    fn lex_name(&mut self, start: SourcePosition) -> Token<'src> {
        let name_start = self.curr_byte_offset;
        while let Some(ch) = self.peek_char() {
            if is_name_continue(ch) {
                self.consume();
            } else {
                break;
            }
        }
        let name = &self.source[name_start..self.curr_byte_offset];
        self.make_token(TokenKind::Name(Cow::Borrowed(name)), start)
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    /// Lexes an `IntValue` or `FloatValue` per the spec grammar.
    ///
    /// A literal is a float iff it contains a fractional part or an
    /// exponent. Leading zeros are illegal (`01`), as is a number running
    /// directly into a name or another dot (`1x`, `1.2.3`).
    fn lex_number(&mut self, start: SourcePosition) -> Result<Token<'src>, SyntaxError> {
        let raw_start = self.curr_byte_offset;
        let mut is_float = false;

        if self.peek_char() == Some('-') {
            self.consume();
        }

        // IntegerPart: 0 | NonZeroDigit Digit*
        match self.peek_char() {
            Some('0') => {
                self.consume();
                if let Some(next) = self.peek_char()
                    && next.is_ascii_digit()
                {
                    return Err(self.error(
                        format!("Invalid number, unexpected digit after 0: `{next}`"),
                        start,
                    ));
                }
            }
            Some(c) if c.is_ascii_digit() => {
                self.consume_digits();
            }
            other => {
                return Err(self.error(
                    format!("Invalid number, expected digit but got {}", describe_char(other)),
                    start,
                ));
            }
        }

        // FractionalPart
        if self.peek_char() == Some('.')
            && self.peek_char_nth(1).is_some_and(|c| c.is_ascii_digit())
        {
            is_float = true;
            self.consume();
            self.consume_digits();
        } else if self.peek_char() == Some('.') && self.peek_char_nth(1) != Some('.') {
            self.consume();
            let next = self.peek_char();
            return Err(self.error(
                format!("Invalid number, expected digit but got {}", describe_char(next)),
                start,
            ));
        }

        // ExponentPart
        if matches!(self.peek_char(), Some('e' | 'E')) {
            is_float = true;
            self.consume();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.consume();
            }
            match self.peek_char() {
                Some(c) if c.is_ascii_digit() => self.consume_digits(),
                other => {
                    return Err(self.error(
                        format!(
                            "Invalid number, expected digit but got {}",
                            describe_char(other)
                        ),
                        start,
                    ));
                }
            }
        }

        // A number may not run directly into a name.
        if let Some(next) = self.peek_char()
            && is_name_start(next)
        {
            return Err(self.error(
                format!("Invalid number, expected digit but got `{next}`"),
                start,
            ));
        }

        let raw = Cow::Borrowed(&self.source[raw_start..self.curr_byte_offset]);
        let kind = if is_float {
            TokenKind::FloatValue(raw)
        } else {
            TokenKind::IntValue(raw)
        };
        Ok(self.make_token(kind, start))
    }

    fn consume_digits(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() {
                self.consume();
            } else {
                break;
            }
        }
    }

    // =========================================================================
    // Strings
    // =========================================================================

    /// Lexes a string literal, dispatching on `"""` vs `"`.
    fn lex_string(&mut self, start: SourcePosition) -> Result<Token<'src>, SyntaxError> {
        if self.remaining().starts_with("\"\"\"") {
            self.lex_block_string(start)
        } else {
            self.lex_quoted_string(start)
        }
    }

    /// Lexes a double-quoted string with standard escape sequences.
    ///
    /// Borrows the source slice when the string contains no escapes.
    fn lex_quoted_string(&mut self, start: SourcePosition) -> Result<Token<'src>, SyntaxError> {
        // Consume the opening quote
        self.consume();
        let content_start = self.curr_byte_offset;
        let mut cooked: Option<String> = None;

        loop {
            let ch_pos = self.curr_position();
            match self.peek_char() {
                None | Some('\n') | Some('\r') => {
                    return Err(self.error("Unterminated string", start));
                }
                Some('"') => {
                    let value = match cooked {
                        Some(owned) => Cow::Owned(owned),
                        None => {
                            Cow::Borrowed(&self.source[content_start..self.curr_byte_offset])
                        }
                    };
                    self.consume();
                    return Ok(self.make_token(
                        TokenKind::StringValue {
                            value,
                            block: false,
                        },
                        start,
                    ));
                }
                Some('\\') => {
                    // Switch to owned mode at the first escape.
                    let buffered = cooked.get_or_insert_with(|| {
                        self.source[content_start..self.curr_byte_offset].to_string()
                    });
                    self.consume();
                    let escaped = match self.consume() {
                        Some('"') => '"',
                        Some('\\') => '\\',
                        Some('/') => '/',
                        Some('b') => '\u{0008}',
                        Some('f') => '\u{000C}',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        Some('u') => self.lex_unicode_escape(ch_pos)?,
                        other => {
                            return Err(self.error(
                                format!(
                                    "Invalid character escape sequence `\\{}`",
                                    other.map(String::from).unwrap_or_default()
                                ),
                                ch_pos,
                            ));
                        }
                    };
                    buffered.push(escaped);
                }
                Some(c) if (c as u32) < 0x20 && c != '\t' => {
                    return Err(self.error(
                        format!("Invalid character within string: U+{:04X}", c as u32),
                        ch_pos,
                    ));
                }
                Some(c) => {
                    self.consume();
                    if let Some(buffered) = cooked.as_mut() {
                        buffered.push(c);
                    }
                }
            }
        }
    }

    /// Lexes the `XXXX` of a `\uXXXX` escape (the `\u` is already consumed).
    fn lex_unicode_escape(&mut self, escape_start: SourcePosition) -> Result<char, SyntaxError> {
        let mut code_point: u32 = 0;
        for _ in 0..4 {
            let digit = self
                .peek_char()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error("Invalid unicode escape sequence", escape_start))?;
            self.consume();
            code_point = code_point * 16 + digit;
        }
        char::from_u32(code_point)
            .ok_or_else(|| self.error("Invalid unicode escape sequence", escape_start))
    }

    /// Lexes a `"""` block string and applies the spec's `BlockStringValue`
    /// trim algorithm.
    fn lex_block_string(&mut self, start: SourcePosition) -> Result<Token<'src>, SyntaxError> {
        // Consume the opening `"""`
        self.consume();
        self.consume();
        self.consume();
        let content_start = self.curr_byte_offset;

        loop {
            match self.peek_char() {
                None => return Err(self.error("Unterminated block string", start)),
                Some('"') if self.remaining().starts_with("\"\"\"") => {
                    let raw = &self.source[content_start..self.curr_byte_offset];
                    self.consume();
                    self.consume();
                    self.consume();
                    let value = Cow::Owned(block_string_value(&raw.replace("\\\"\"\"", "\"\"\"")));
                    return Ok(self.make_token(
                        TokenKind::StringValue { value, block: true },
                        start,
                    ));
                }
                Some('\\') if self.remaining().starts_with("\\\"\"\"") => {
                    self.consume();
                    self.consume();
                    self.consume();
                    self.consume();
                }
                Some(_) => {
                    self.consume();
                }
            }
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, SyntaxError>;

    /// Yields tokens up to and including the first `Eof`, then terminates.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        Some(self.next_token())
    }
}

// =============================================================================
// Character classes
// =============================================================================

/// `[_A-Za-z]`
pub(crate) fn is_name_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

/// `[_A-Za-z0-9]`
pub(crate) fn is_name_continue(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}

fn describe_char(ch: Option<char>) -> String {
    match ch {
        Some(c) => format!("`{c}`"),
        None => "<EOF>".to_string(),
    }
}

// =============================================================================
// Block strings
// =============================================================================

/// Implements the spec's `BlockStringValue` algorithm: split into lines,
/// compute the common leading-whitespace indent across all lines except the
/// first, strip that indent from those lines, strip leading and trailing
/// blank lines, and join with `\n`.
pub fn block_string_value(raw: &str) -> String {
    // Normalize `\r\n` and lone `\r` line terminators before splitting.
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    // Common indent over all lines but the first.
    let mut common_indent: Option<usize> = None;
    for line in lines.iter().skip(1) {
        let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
        if indent < line.len() {
            common_indent = Some(match common_indent {
                Some(existing) => existing.min(indent),
                None => indent,
            });
        }
    }

    let mut trimmed: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            if idx == 0 {
                *line
            } else {
                let strip = common_indent.unwrap_or(0).min(line.len());
                &line[strip..]
            }
        })
        .collect();

    // Strip leading and trailing blank lines.
    while trimmed
        .first()
        .is_some_and(|line| line.trim_matches([' ', '\t']).is_empty())
    {
        trimmed.remove(0);
    }
    while trimmed
        .last()
        .is_some_and(|line| line.trim_matches([' ', '\t']).is_empty())
    {
        trimmed.pop();
    }

    trimmed.join("\n")
}
