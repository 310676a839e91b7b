use crate::SourceSpan;
use std::borrow::Cow;

/// The kind of a GraphQL token.
///
/// Numeric literals (`IntValue`, `FloatValue`) store only the raw source
/// text; parsing to `i64`/`f64` happens when a literal value node is built.
/// String literals store the *cooked* value (escape sequences processed,
/// block strings trimmed per the spec's `BlockStringValue` algorithm).
///
/// # Lifetime Parameter
///
/// The `'src` lifetime enables zero-copy lexing: token values borrow string
/// slices directly from the source text using `Cow::Borrowed` whenever no
/// escape processing was required.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind<'src> {
    // =========================================================================
    // Punctuators (no allocation needed)
    // =========================================================================
    /// `&`
    Ampersand,
    /// `@`
    At,
    /// `!`
    Bang,
    /// `:`
    Colon,
    /// `}`
    CurlyBraceClose,
    /// `{`
    CurlyBraceOpen,
    /// `$`
    Dollar,
    /// `...`
    Ellipsis,
    /// `=`
    Equals,
    /// `)`
    ParenClose,
    /// `(`
    ParenOpen,
    /// `|`
    Pipe,
    /// `]`
    SquareBracketClose,
    /// `[`
    SquareBracketOpen,

    // =========================================================================
    // Literals
    // =========================================================================
    /// A GraphQL name/identifier matching `[_A-Za-z][_A-Za-z0-9]*`.
    Name(Cow<'src, str>),

    /// Raw source text of an integer literal, including an optional negative
    /// sign (e.g. `"-123"`, `"0"`).
    IntValue(Cow<'src, str>),

    /// Raw source text of a float literal, including an optional negative
    /// sign (e.g. `"-1.23e-4"`, `"0.5"`).
    FloatValue(Cow<'src, str>),

    /// Cooked value of a string literal. `block` records whether the literal
    /// was written with `"""` delimiters, which matters only for printing.
    StringValue { value: Cow<'src, str>, block: bool },

    /// A `#` comment, without the leading `#` or the line terminator.
    ///
    /// Comments are emitted as tokens so tools can observe them, but the
    /// token stream the parser consumes filters them out.
    Comment(Cow<'src, str>),

    // =========================================================================
    // End of input
    // =========================================================================
    /// End of input.
    Eof,
}

impl TokenKind<'_> {
    /// A short human-readable description of this token for error messages,
    /// e.g. `` `{` ``, `Name "query"`, `Int "42"`.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Ampersand => "`&`".to_string(),
            TokenKind::At => "`@`".to_string(),
            TokenKind::Bang => "`!`".to_string(),
            TokenKind::Colon => "`:`".to_string(),
            TokenKind::CurlyBraceClose => "`}`".to_string(),
            TokenKind::CurlyBraceOpen => "`{`".to_string(),
            TokenKind::Dollar => "`$`".to_string(),
            TokenKind::Ellipsis => "`...`".to_string(),
            TokenKind::Equals => "`=`".to_string(),
            TokenKind::ParenClose => "`)`".to_string(),
            TokenKind::ParenOpen => "`(`".to_string(),
            TokenKind::Pipe => "`|`".to_string(),
            TokenKind::SquareBracketClose => "`]`".to_string(),
            TokenKind::SquareBracketOpen => "`[`".to_string(),
            TokenKind::Name(value) => format!("Name \"{value}\""),
            TokenKind::IntValue(raw) => format!("Int \"{raw}\""),
            TokenKind::FloatValue(raw) => format!("Float \"{raw}\""),
            TokenKind::StringValue { .. } => "String".to_string(),
            TokenKind::Comment(_) => "Comment".to_string(),
            TokenKind::Eof => "<EOF>".to_string(),
        }
    }

    /// Returns the name text when this token is a [`TokenKind::Name`].
    pub fn as_name(&self) -> Option<&str> {
        match self {
            TokenKind::Name(value) => Some(value.as_ref()),
            _ => None,
        }
    }
}

/// A single lexed token with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind<'src>,
    pub span: SourceSpan,
}
