//! GraphQL lexing and parsing for the `graphquill` engine.
//!
//! This crate turns GraphQL source text into an AST. It handles both
//! executable documents (operations and fragments) and type-system
//! documents (SDL), provides a visitor-based traversal over the result,
//! and can print any AST back to canonical source text.

pub mod ast;
mod lexer;
mod parser;
mod printer;
mod source_position;
mod source_span;
mod syntax_error;
mod token;
mod token_stream;
mod visitor;

pub use lexer::block_string_value;
pub use lexer::Lexer;
pub use parser::parse;
pub use parser::parse_executable;
pub use parser::parse_sdl;
pub use parser::parse_type;
pub use parser::parse_value;
pub use parser::ParseOptions;
pub use printer::print_document;
pub use printer::print_value;
pub use source_position::SourcePosition;
pub use source_span::SourceSpan;
pub use syntax_error::SyntaxError;
pub use token::Token;
pub use token::TokenKind;
pub use token_stream::TokenStream;
pub use visitor::walk_document;
pub use visitor::ChainedVisitor;
pub use visitor::DocumentVisitor;
pub use visitor::ParallelVisitor;
pub use visitor::VisitFlow;

#[cfg(test)]
mod tests;
