use crate::lexer::Lexer;
use crate::token::Token;
use crate::token::TokenKind;
use crate::SyntaxError;

/// A one-token-lookahead stream over the [`Lexer`].
///
/// Comments are filtered out here: the parser never requires them, and
/// skipping them centrally keeps every `parse_*` production free of
/// comment handling.
pub struct TokenStream<'src> {
    lexer: Lexer<'src>,
    /// The lookahead slot. `None` until the first peek.
    peeked: Option<Token<'src>>,
}

impl<'src> TokenStream<'src> {
    pub fn new(lexer: Lexer<'src>) -> Self {
        Self {
            lexer,
            peeked: None,
        }
    }

    /// Lexes forward to the next non-comment token.
    fn lex_significant(&mut self) -> Result<Token<'src>, SyntaxError> {
        loop {
            let token = self.lexer.next_token()?;
            if !matches!(token.kind, TokenKind::Comment(_)) {
                return Ok(token);
            }
        }
    }

    /// Returns the next significant token without consuming it.
    pub fn peek(&mut self) -> Result<&Token<'src>, SyntaxError> {
        if self.peeked.is_none() {
            self.peeked = Some(self.lex_significant()?);
        }
        Ok(self.peeked.as_ref().expect("lookahead slot was just filled"))
    }

    /// Consumes and returns the next significant token.
    pub fn advance(&mut self) -> Result<Token<'src>, SyntaxError> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.lex_significant(),
        }
    }

    /// True when the next significant token is `Eof`.
    pub fn at_eof(&mut self) -> Result<bool, SyntaxError> {
        Ok(matches!(self.peek()?.kind, TokenKind::Eof))
    }
}
