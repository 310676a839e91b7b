//! Recursive descent parser for GraphQL documents.
//!
//! Productions follow the June 2018 GraphQL specification. The parser is
//! fail-fast: the first error aborts the parse with a [`SyntaxError`]
//! carrying the offending token span. One flag
//! ([`ParseOptions::allow_type_system`]) controls whether type-system
//! definitions are accepted; executable documents reject them.

use crate::ast;
use crate::lexer::Lexer;
use crate::token::Token;
use crate::token::TokenKind;
use crate::token_stream::TokenStream;
use crate::SourcePosition;
use crate::SourceSpan;
use crate::SyntaxError;
use std::path::PathBuf;

/// Options controlling a document parse.
#[derive(Clone, Debug, Default)]
pub struct ParseOptions {
    /// When false (the default), type-system definitions and extensions are
    /// rejected with a syntax error: the document is executable-only.
    pub allow_type_system: bool,

    /// Source label attached to every span for diagnostics.
    pub file_path: Option<PathBuf>,
}

/// Parses a GraphQL document.
pub fn parse<'src>(
    source: &'src str,
    options: &ParseOptions,
) -> Result<ast::Document<'src>, SyntaxError> {
    Parser::new(source, options).parse_document()
}

/// Parses an executable document (operations and fragments only).
pub fn parse_executable(source: &str) -> Result<ast::Document<'_>, SyntaxError> {
    parse(source, &ParseOptions::default())
}

/// Parses a document that may contain type-system definitions.
pub fn parse_sdl(source: &str) -> Result<ast::Document<'_>, SyntaxError> {
    parse(
        source,
        &ParseOptions {
            allow_type_system: true,
            file_path: None,
        },
    )
}

/// Parses a single value literal (e.g. `{a: [1, 2]}`).
///
/// Variables are permitted; trailing input is an error.
pub fn parse_value(source: &str) -> Result<ast::Value<'_>, SyntaxError> {
    let mut parser = Parser::new(source, &ParseOptions::default());
    let value = parser.parse_value(true)?;
    parser.expect_eof()?;
    Ok(value)
}

/// Parses a single type reference (e.g. `[Foo!]!`).
///
/// Trailing input is an error.
pub fn parse_type(source: &str) -> Result<ast::TypeAnnotation<'_>, SyntaxError> {
    let mut parser = Parser::new(source, &ParseOptions::default());
    let annotation = parser.parse_type_annotation()?;
    parser.expect_eof()?;
    Ok(annotation)
}

// =============================================================================
// Parser
// =============================================================================

struct Parser<'src> {
    tokens: TokenStream<'src>,
    allow_type_system: bool,
    file_path: Option<PathBuf>,
    /// End position of the most recently consumed token; node spans run
    /// from their first token's start to this.
    prev_end: SourcePosition,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str, options: &ParseOptions) -> Self {
        let lexer = match options.file_path.clone() {
            Some(path) => Lexer::with_file_path(source, path),
            None => Lexer::new(source),
        };
        Self {
            tokens: TokenStream::new(lexer),
            allow_type_system: options.allow_type_system,
            file_path: options.file_path.clone(),
            prev_end: SourcePosition::new(0, 0, 0),
        }
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    fn peek(&mut self) -> Result<&Token<'src>, SyntaxError> {
        self.tokens.peek()
    }

    fn advance(&mut self) -> Result<Token<'src>, SyntaxError> {
        let token = self.tokens.advance()?;
        self.prev_end = token.span.end_exclusive;
        Ok(token)
    }

    /// The start position of the next significant token.
    fn next_start(&mut self) -> Result<SourcePosition, SyntaxError> {
        Ok(self.peek()?.span.start_inclusive)
    }

    /// Builds a node span from `start` to the end of the last consumed
    /// token, carrying the parser's source label.
    fn span_from(&self, start: SourcePosition) -> SourceSpan {
        match &self.file_path {
            Some(path) => SourceSpan::with_file(start, self.prev_end, path.clone()),
            None => SourceSpan::new(start, self.prev_end),
        }
    }

    /// True when the next token matches `kind` exactly (payload included,
    /// so this is only useful for punctuators).
    fn peek_is(&mut self, kind: &TokenKind<'static>) -> Result<bool, SyntaxError> {
        Ok(&self.peek()?.kind == kind)
    }

    /// Consumes the next token when it matches `kind`.
    fn skip_if(&mut self, kind: &TokenKind<'static>) -> Result<bool, SyntaxError> {
        if self.peek_is(kind)? {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes the next token, failing unless it matches `kind`.
    fn expect(&mut self, kind: &TokenKind<'static>) -> Result<Token<'src>, SyntaxError> {
        if self.peek_is(kind)? {
            self.advance()
        } else {
            let token = self.peek()?;
            Err(SyntaxError::new(
                format!(
                    "Expected {}, found {}",
                    kind.describe(),
                    token.kind.describe()
                ),
                token.span.clone(),
            ))
        }
    }

    /// Consumes a Name token.
    fn expect_name(&mut self) -> Result<ast::Name<'src>, SyntaxError> {
        let token = self.peek()?;
        match &token.kind {
            TokenKind::Name(_) => {
                let token = self.advance()?;
                let TokenKind::Name(value) = token.kind else {
                    unreachable!("peeked token kind changed between peek and advance");
                };
                Ok(ast::Name {
                    value,
                    span: token.span,
                })
            }
            other => Err(SyntaxError::new(
                format!("Expected Name, found {}", other.describe()),
                token.span.clone(),
            )),
        }
    }

    /// Consumes a Name token with the given text.
    fn expect_keyword(&mut self, keyword: &str) -> Result<(), SyntaxError> {
        let token = self.peek()?;
        if token.kind.as_name() == Some(keyword) {
            self.advance()?;
            Ok(())
        } else {
            Err(SyntaxError::new(
                format!("Expected `{keyword}`, found {}", token.kind.describe()),
                token.span.clone(),
            ))
        }
    }

    /// The next token's name text, when it is a Name.
    fn peek_keyword(&mut self) -> Result<Option<&str>, SyntaxError> {
        Ok(self.peek()?.kind.as_name())
    }

    fn expect_eof(&mut self) -> Result<(), SyntaxError> {
        let token = self.peek()?;
        if matches!(token.kind, TokenKind::Eof) {
            Ok(())
        } else {
            Err(SyntaxError::new(
                format!("Expected <EOF>, found {}", token.kind.describe()),
                token.span.clone(),
            ))
        }
    }

    fn error_at_next(&mut self, message: impl Into<String>) -> SyntaxError {
        match self.peek() {
            Ok(token) => SyntaxError::new(message, token.span.clone()),
            Err(err) => err.clone(),
        }
    }

    // =========================================================================
    // Document
    // =========================================================================

    fn parse_document(mut self) -> Result<ast::Document<'src>, SyntaxError> {
        let start = self.next_start()?;
        let mut definitions = vec![];

        while !self.tokens.at_eof()? {
            definitions.push(self.parse_definition()?);
        }

        if definitions.is_empty() {
            return Err(self.error_at_next("Expected at least one definition"));
        }

        let span = self.span_from(start);
        Ok(ast::Document { definitions, span })
    }

    fn parse_definition(&mut self) -> Result<ast::Definition<'src>, SyntaxError> {
        let token = self.peek()?;
        match &token.kind {
            TokenKind::CurlyBraceOpen => Ok(ast::Definition::OperationDefinition(
                self.parse_anonymous_operation()?,
            )),
            TokenKind::Name(name) => match name.as_ref() {
                "query" | "mutation" | "subscription" => Ok(
                    ast::Definition::OperationDefinition(self.parse_operation_definition()?),
                ),
                "fragment" => Ok(ast::Definition::FragmentDefinition(
                    self.parse_fragment_definition()?,
                )),
                "schema" | "scalar" | "type" | "interface" | "union" | "enum" | "input"
                | "directive" | "extend" => self.parse_type_system_definition(None),
                other => Err(SyntaxError::new(
                    format!("Unexpected Name \"{other}\""),
                    token.span.clone(),
                )),
            },
            // A leading description string attaches to the following
            // type-system definition.
            TokenKind::StringValue { .. } => {
                let description = self.parse_description()?;
                self.parse_type_system_definition(description)
            }
            other => Err(SyntaxError::new(
                format!("Unexpected {}", other.describe()),
                token.span.clone(),
            )),
        }
    }

    fn parse_type_system_definition(
        &mut self,
        description: Option<ast::StringValue<'src>>,
    ) -> Result<ast::Definition<'src>, SyntaxError> {
        if !self.allow_type_system {
            return Err(self.error_at_next(
                "Type system definitions are not allowed in executable documents",
            ));
        }

        match self.peek_keyword()? {
            Some("schema") => Ok(ast::Definition::SchemaDefinition(
                self.parse_schema_definition()?,
            )),
            Some("scalar") => Ok(ast::Definition::TypeDefinition(ast::TypeDefinition::Scalar(
                self.parse_scalar_type_definition(description)?,
            ))),
            Some("type") => Ok(ast::Definition::TypeDefinition(ast::TypeDefinition::Object(
                self.parse_object_type_definition(description)?,
            ))),
            Some("interface") => Ok(ast::Definition::TypeDefinition(
                ast::TypeDefinition::Interface(self.parse_interface_type_definition(description)?),
            )),
            Some("union") => Ok(ast::Definition::TypeDefinition(ast::TypeDefinition::Union(
                self.parse_union_type_definition(description)?,
            ))),
            Some("enum") => Ok(ast::Definition::TypeDefinition(ast::TypeDefinition::Enum(
                self.parse_enum_type_definition(description)?,
            ))),
            Some("input") => Ok(ast::Definition::TypeDefinition(
                ast::TypeDefinition::InputObject(
                    self.parse_input_object_type_definition(description)?,
                ),
            )),
            Some("directive") => Ok(ast::Definition::DirectiveDefinition(
                self.parse_directive_definition(description)?,
            )),
            Some("extend") => {
                if description.is_some() {
                    return Err(
                        self.error_at_next("Type extensions do not accept a description")
                    );
                }
                Ok(ast::Definition::TypeExtension(self.parse_type_extension()?))
            }
            _ => Err(self.error_at_next("Expected a type system definition")),
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    fn parse_anonymous_operation(
        &mut self,
    ) -> Result<ast::OperationDefinition<'src>, SyntaxError> {
        let start = self.next_start()?;
        let selection_set = self.parse_selection_set()?;
        let span = self.span_from(start);
        Ok(ast::OperationDefinition {
            operation: ast::OperationKind::Query,
            name: None,
            variable_definitions: vec![],
            directives: vec![],
            selection_set,
            span,
        })
    }

    fn parse_operation_definition(
        &mut self,
    ) -> Result<ast::OperationDefinition<'src>, SyntaxError> {
        let start = self.next_start()?;
        let operation = self.parse_operation_kind()?;
        let name = match &self.peek()?.kind {
            TokenKind::Name(_) => Some(self.expect_name()?),
            _ => None,
        };
        let variable_definitions = self.parse_variable_definitions()?;
        let directives = self.parse_directives(false)?;
        let selection_set = self.parse_selection_set()?;
        let span = self.span_from(start);
        Ok(ast::OperationDefinition {
            operation,
            name,
            variable_definitions,
            directives,
            selection_set,
            span,
        })
    }

    fn parse_operation_kind(&mut self) -> Result<ast::OperationKind, SyntaxError> {
        match self.peek_keyword()? {
            Some("query") => {
                self.advance()?;
                Ok(ast::OperationKind::Query)
            }
            Some("mutation") => {
                self.advance()?;
                Ok(ast::OperationKind::Mutation)
            }
            Some("subscription") => {
                self.advance()?;
                Ok(ast::OperationKind::Subscription)
            }
            _ => Err(self.error_at_next("Expected `query`, `mutation`, or `subscription`")),
        }
    }

    fn parse_variable_definitions(
        &mut self,
    ) -> Result<Vec<ast::VariableDefinition<'src>>, SyntaxError> {
        if !self.skip_if(&TokenKind::ParenOpen)? {
            return Ok(vec![]);
        }
        let mut definitions = vec![];
        while !self.skip_if(&TokenKind::ParenClose)? {
            definitions.push(self.parse_variable_definition()?);
        }
        if definitions.is_empty() {
            return Err(self.error_at_next("Expected at least one variable definition"));
        }
        Ok(definitions)
    }

    fn parse_variable_definition(
        &mut self,
    ) -> Result<ast::VariableDefinition<'src>, SyntaxError> {
        let start = self.next_start()?;
        self.expect(&TokenKind::Dollar)?;
        let variable = self.expect_name()?;
        self.expect(&TokenKind::Colon)?;
        let var_type = self.parse_type_annotation()?;
        let default_value = if self.skip_if(&TokenKind::Equals)? {
            // Variable default values are const: no variable references.
            Some(self.parse_value(false)?)
        } else {
            None
        };
        let span = self.span_from(start);
        Ok(ast::VariableDefinition {
            variable,
            var_type,
            default_value,
            span,
        })
    }

    // =========================================================================
    // Selections
    // =========================================================================

    fn parse_selection_set(&mut self) -> Result<ast::SelectionSet<'src>, SyntaxError> {
        let start = self.next_start()?;
        self.expect(&TokenKind::CurlyBraceOpen)?;
        let mut selections = vec![];
        while !self.skip_if(&TokenKind::CurlyBraceClose)? {
            selections.push(self.parse_selection()?);
        }
        if selections.is_empty() {
            return Err(self.error_at_next("Expected at least one selection"));
        }
        let span = self.span_from(start);
        Ok(ast::SelectionSet { selections, span })
    }

    fn parse_selection(&mut self) -> Result<ast::Selection<'src>, SyntaxError> {
        if self.peek_is(&TokenKind::Ellipsis)? {
            self.parse_fragment_selection()
        } else {
            Ok(ast::Selection::Field(self.parse_field()?))
        }
    }

    fn parse_field(&mut self) -> Result<ast::Field<'src>, SyntaxError> {
        let start = self.next_start()?;
        let name_or_alias = self.expect_name()?;

        let (alias, name) = if self.skip_if(&TokenKind::Colon)? {
            (Some(name_or_alias), self.expect_name()?)
        } else {
            (None, name_or_alias)
        };

        let arguments = self.parse_arguments(false)?;
        let directives = self.parse_directives(false)?;
        let selection_set = if self.peek_is(&TokenKind::CurlyBraceOpen)? {
            Some(self.parse_selection_set()?)
        } else {
            None
        };
        let span = self.span_from(start);
        Ok(ast::Field {
            alias,
            name,
            arguments,
            directives,
            selection_set,
            span,
        })
    }

    /// Parses a `...` selection: either a fragment spread or an inline
    /// fragment.
    fn parse_fragment_selection(&mut self) -> Result<ast::Selection<'src>, SyntaxError> {
        let start = self.next_start()?;
        self.expect(&TokenKind::Ellipsis)?;

        // `... on Type { ... }` or `... { ... }` is an inline fragment;
        // `...Name` is a spread. `on` is not a valid fragment name.
        match self.peek_keyword()? {
            Some(keyword) if keyword != "on" => {
                let name = self.expect_name()?;
                let directives = self.parse_directives(false)?;
                let span = self.span_from(start);
                Ok(ast::Selection::FragmentSpread(ast::FragmentSpread {
                    name,
                    directives,
                    span,
                }))
            }
            _ => {
                let type_condition = if self.peek_keyword()? == Some("on") {
                    Some(self.parse_type_condition()?)
                } else {
                    None
                };
                let directives = self.parse_directives(false)?;
                let selection_set = self.parse_selection_set()?;
                let span = self.span_from(start);
                Ok(ast::Selection::InlineFragment(ast::InlineFragment {
                    type_condition,
                    directives,
                    selection_set,
                    span,
                }))
            }
        }
    }

    fn parse_fragment_definition(
        &mut self,
    ) -> Result<ast::FragmentDefinition<'src>, SyntaxError> {
        let start = self.next_start()?;
        self.expect_keyword("fragment")?;

        let name = self.expect_name()?;
        if name.as_str() == "on" {
            return Err(SyntaxError::new(
                "A fragment cannot be named `on`",
                name.span,
            ));
        }

        let type_condition = self.parse_type_condition()?;
        let directives = self.parse_directives(false)?;
        let selection_set = self.parse_selection_set()?;
        let span = self.span_from(start);
        Ok(ast::FragmentDefinition {
            name,
            type_condition,
            directives,
            selection_set,
            span,
        })
    }

    fn parse_type_condition(&mut self) -> Result<ast::TypeCondition<'src>, SyntaxError> {
        let start = self.next_start()?;
        self.expect_keyword("on")?;
        let named_type = self.parse_named_type_annotation()?;
        let span = self.span_from(start);
        Ok(ast::TypeCondition { named_type, span })
    }

    // =========================================================================
    // Arguments & directives
    // =========================================================================

    fn parse_arguments(&mut self, const_only: bool) -> Result<Vec<ast::Argument<'src>>, SyntaxError> {
        if !self.skip_if(&TokenKind::ParenOpen)? {
            return Ok(vec![]);
        }
        let mut arguments = vec![];
        while !self.skip_if(&TokenKind::ParenClose)? {
            arguments.push(self.parse_argument(const_only)?);
        }
        if arguments.is_empty() {
            return Err(self.error_at_next("Expected at least one argument"));
        }
        Ok(arguments)
    }

    fn parse_argument(&mut self, const_only: bool) -> Result<ast::Argument<'src>, SyntaxError> {
        let start = self.next_start()?;
        let name = self.expect_name()?;
        self.expect(&TokenKind::Colon)?;
        let value = self.parse_value(!const_only)?;
        let span = self.span_from(start);
        Ok(ast::Argument { name, value, span })
    }

    fn parse_directives(
        &mut self,
        const_only: bool,
    ) -> Result<Vec<ast::DirectiveAnnotation<'src>>, SyntaxError> {
        let mut directives = vec![];
        while self.peek_is(&TokenKind::At)? {
            directives.push(self.parse_directive(const_only)?);
        }
        Ok(directives)
    }

    fn parse_directive(
        &mut self,
        const_only: bool,
    ) -> Result<ast::DirectiveAnnotation<'src>, SyntaxError> {
        let start = self.next_start()?;
        self.expect(&TokenKind::At)?;
        let name = self.expect_name()?;
        let arguments = self.parse_arguments(const_only)?;
        let span = self.span_from(start);
        Ok(ast::DirectiveAnnotation {
            name,
            arguments,
            span,
        })
    }

    // =========================================================================
    // Values
    // =========================================================================

    fn parse_value(&mut self, allow_variables: bool) -> Result<ast::Value<'src>, SyntaxError> {
        let token = self.peek()?;
        match &token.kind {
            TokenKind::Dollar => {
                if !allow_variables {
                    return Err(SyntaxError::new(
                        "Variables are not allowed in constant values",
                        token.span.clone(),
                    ));
                }
                let start = self.next_start()?;
                self.advance()?;
                let name = self.expect_name()?;
                let span = self.span_from(start);
                Ok(ast::Value::Variable(ast::VariableValue { name, span }))
            }
            TokenKind::IntValue(_) => {
                let token = self.advance()?;
                let TokenKind::IntValue(raw) = token.kind else {
                    unreachable!("peeked token kind changed between peek and advance");
                };
                Ok(ast::Value::Int(ast::IntValue {
                    raw,
                    span: token.span,
                }))
            }
            TokenKind::FloatValue(_) => {
                let token = self.advance()?;
                let TokenKind::FloatValue(raw) = token.kind else {
                    unreachable!("peeked token kind changed between peek and advance");
                };
                Ok(ast::Value::Float(ast::FloatValue {
                    raw,
                    span: token.span,
                }))
            }
            TokenKind::StringValue { .. } => {
                let string = self.parse_string_value()?;
                Ok(ast::Value::String(string))
            }
            TokenKind::Name(name) => match name.as_ref() {
                "true" | "false" => {
                    let token = self.advance()?;
                    let value = token.kind.as_name() == Some("true");
                    Ok(ast::Value::Boolean(ast::BooleanValue {
                        value,
                        span: token.span,
                    }))
                }
                "null" => {
                    let token = self.advance()?;
                    Ok(ast::Value::Null(ast::NullValue { span: token.span }))
                }
                _ => {
                    let name = self.expect_name()?;
                    Ok(ast::Value::Enum(ast::EnumValue {
                        value: name.value,
                        span: name.span,
                    }))
                }
            },
            TokenKind::SquareBracketOpen => self.parse_list_value(allow_variables),
            TokenKind::CurlyBraceOpen => self.parse_object_value(allow_variables),
            other => Err(SyntaxError::new(
                format!("Expected a value, found {}", other.describe()),
                token.span.clone(),
            )),
        }
    }

    fn parse_string_value(&mut self) -> Result<ast::StringValue<'src>, SyntaxError> {
        let token = self.advance()?;
        let TokenKind::StringValue { value, block } = token.kind else {
            return Err(SyntaxError::new(
                format!("Expected String, found {}", token.kind.describe()),
                token.span,
            ));
        };
        Ok(ast::StringValue {
            value,
            block,
            span: token.span,
        })
    }

    fn parse_list_value(&mut self, allow_variables: bool) -> Result<ast::Value<'src>, SyntaxError> {
        let start = self.next_start()?;
        self.expect(&TokenKind::SquareBracketOpen)?;
        let mut values = vec![];
        while !self.skip_if(&TokenKind::SquareBracketClose)? {
            values.push(self.parse_value(allow_variables)?);
        }
        let span = self.span_from(start);
        Ok(ast::Value::List(ast::ListValue { values, span }))
    }

    fn parse_object_value(
        &mut self,
        allow_variables: bool,
    ) -> Result<ast::Value<'src>, SyntaxError> {
        let start = self.next_start()?;
        self.expect(&TokenKind::CurlyBraceOpen)?;
        let mut fields = vec![];
        while !self.skip_if(&TokenKind::CurlyBraceClose)? {
            let field_start = self.next_start()?;
            let name = self.expect_name()?;
            self.expect(&TokenKind::Colon)?;
            let value = self.parse_value(allow_variables)?;
            let field_span = self.span_from(field_start);
            fields.push(ast::ObjectField {
                name,
                value,
                span: field_span,
            });
        }
        let span = self.span_from(start);
        Ok(ast::Value::Object(ast::ObjectValue { fields, span }))
    }

    // =========================================================================
    // Type annotations
    // =========================================================================

    fn parse_type_annotation(&mut self) -> Result<ast::TypeAnnotation<'src>, SyntaxError> {
        let start = self.next_start()?;

        let inner = if self.skip_if(&TokenKind::SquareBracketOpen)? {
            let item = self.parse_type_annotation()?;
            self.expect(&TokenKind::SquareBracketClose)?;
            let span = self.span_from(start);
            ast::TypeAnnotation::List(Box::new(ast::ListTypeAnnotation { item, span }))
        } else {
            ast::TypeAnnotation::Named(self.parse_named_type_annotation()?)
        };

        // `!` is the only suffix; post-wrap in NonNull. `T!!` does not
        // parse because a second `!` would follow a NonNull annotation.
        if self.skip_if(&TokenKind::Bang)? {
            let span = self.span_from(start);
            Ok(ast::TypeAnnotation::NonNull(Box::new(
                ast::NonNullTypeAnnotation { inner, span },
            )))
        } else {
            Ok(inner)
        }
    }

    fn parse_named_type_annotation(
        &mut self,
    ) -> Result<ast::NamedTypeAnnotation<'src>, SyntaxError> {
        let name = self.expect_name()?;
        let span = name.span.clone();
        Ok(ast::NamedTypeAnnotation { name, span })
    }

    // =========================================================================
    // Type-system definitions
    // =========================================================================

    /// Parses an optional leading description string.
    fn parse_description(&mut self) -> Result<Option<ast::StringValue<'src>>, SyntaxError> {
        if matches!(self.peek()?.kind, TokenKind::StringValue { .. }) {
            Ok(Some(self.parse_string_value()?))
        } else {
            Ok(None)
        }
    }

    fn parse_schema_definition(&mut self) -> Result<ast::SchemaDefinition<'src>, SyntaxError> {
        let start = self.next_start()?;
        self.expect_keyword("schema")?;
        let directives = self.parse_directives(true)?;
        self.expect(&TokenKind::CurlyBraceOpen)?;
        let mut operation_types = vec![];
        while !self.skip_if(&TokenKind::CurlyBraceClose)? {
            operation_types.push(self.parse_root_operation_type_definition()?);
        }
        if operation_types.is_empty() {
            return Err(self.error_at_next("Expected at least one root operation type"));
        }
        let span = self.span_from(start);
        Ok(ast::SchemaDefinition {
            directives,
            operation_types,
            span,
        })
    }

    fn parse_root_operation_type_definition(
        &mut self,
    ) -> Result<ast::RootOperationTypeDefinition<'src>, SyntaxError> {
        let start = self.next_start()?;
        let operation = self.parse_operation_kind()?;
        self.expect(&TokenKind::Colon)?;
        let named_type = self.parse_named_type_annotation()?;
        let span = self.span_from(start);
        Ok(ast::RootOperationTypeDefinition {
            operation,
            named_type,
            span,
        })
    }

    fn parse_scalar_type_definition(
        &mut self,
        description: Option<ast::StringValue<'src>>,
    ) -> Result<ast::ScalarTypeDefinition<'src>, SyntaxError> {
        let start = self.next_start()?;
        self.expect_keyword("scalar")?;
        let name = self.expect_name()?;
        let directives = self.parse_directives(true)?;
        let span = self.span_from(start);
        Ok(ast::ScalarTypeDefinition {
            description,
            name,
            directives,
            span,
        })
    }

    fn parse_object_type_definition(
        &mut self,
        description: Option<ast::StringValue<'src>>,
    ) -> Result<ast::ObjectTypeDefinition<'src>, SyntaxError> {
        let start = self.next_start()?;
        self.expect_keyword("type")?;
        let name = self.expect_name()?;
        let interfaces = self.parse_implements_interfaces()?;
        let directives = self.parse_directives(true)?;
        let fields = self.parse_fields_definition()?;
        let span = self.span_from(start);
        Ok(ast::ObjectTypeDefinition {
            description,
            name,
            interfaces,
            directives,
            fields,
            span,
        })
    }

    /// Parses `implements A & B` (a leading `&` is tolerated, per spec).
    fn parse_implements_interfaces(
        &mut self,
    ) -> Result<Vec<ast::NamedTypeAnnotation<'src>>, SyntaxError> {
        if self.peek_keyword()? != Some("implements") {
            return Ok(vec![]);
        }
        self.advance()?;
        self.skip_if(&TokenKind::Ampersand)?;
        let mut interfaces = vec![self.parse_named_type_annotation()?];
        while self.skip_if(&TokenKind::Ampersand)? {
            interfaces.push(self.parse_named_type_annotation()?);
        }
        Ok(interfaces)
    }

    /// Parses a brace-delimited field definition list. The braces are
    /// optional: `type Query` with no body is legal SDL (the type is then
    /// expected to gain fields through extensions).
    fn parse_fields_definition(
        &mut self,
    ) -> Result<Vec<ast::FieldDefinition<'src>>, SyntaxError> {
        if !self.skip_if(&TokenKind::CurlyBraceOpen)? {
            return Ok(vec![]);
        }
        let mut fields = vec![];
        while !self.skip_if(&TokenKind::CurlyBraceClose)? {
            fields.push(self.parse_field_definition()?);
        }
        Ok(fields)
    }

    fn parse_field_definition(&mut self) -> Result<ast::FieldDefinition<'src>, SyntaxError> {
        let start = self.next_start()?;
        let description = self.parse_description()?;
        let name = self.expect_name()?;
        let arguments = self.parse_arguments_definition()?;
        self.expect(&TokenKind::Colon)?;
        let field_type = self.parse_type_annotation()?;
        let directives = self.parse_directives(true)?;
        let span = self.span_from(start);
        Ok(ast::FieldDefinition {
            description,
            name,
            arguments,
            field_type,
            directives,
            span,
        })
    }

    fn parse_arguments_definition(
        &mut self,
    ) -> Result<Vec<ast::InputValueDefinition<'src>>, SyntaxError> {
        if !self.skip_if(&TokenKind::ParenOpen)? {
            return Ok(vec![]);
        }
        let mut arguments = vec![];
        while !self.skip_if(&TokenKind::ParenClose)? {
            arguments.push(self.parse_input_value_definition()?);
        }
        if arguments.is_empty() {
            return Err(self.error_at_next("Expected at least one argument definition"));
        }
        Ok(arguments)
    }

    fn parse_input_value_definition(
        &mut self,
    ) -> Result<ast::InputValueDefinition<'src>, SyntaxError> {
        let start = self.next_start()?;
        let description = self.parse_description()?;
        let name = self.expect_name()?;
        self.expect(&TokenKind::Colon)?;
        let value_type = self.parse_type_annotation()?;
        let default_value = if self.skip_if(&TokenKind::Equals)? {
            Some(self.parse_value(false)?)
        } else {
            None
        };
        let directives = self.parse_directives(true)?;
        let span = self.span_from(start);
        Ok(ast::InputValueDefinition {
            description,
            name,
            value_type,
            default_value,
            directives,
            span,
        })
    }

    fn parse_interface_type_definition(
        &mut self,
        description: Option<ast::StringValue<'src>>,
    ) -> Result<ast::InterfaceTypeDefinition<'src>, SyntaxError> {
        let start = self.next_start()?;
        self.expect_keyword("interface")?;
        let name = self.expect_name()?;
        let directives = self.parse_directives(true)?;
        let fields = self.parse_fields_definition()?;
        let span = self.span_from(start);
        Ok(ast::InterfaceTypeDefinition {
            description,
            name,
            directives,
            fields,
            span,
        })
    }

    fn parse_union_type_definition(
        &mut self,
        description: Option<ast::StringValue<'src>>,
    ) -> Result<ast::UnionTypeDefinition<'src>, SyntaxError> {
        let start = self.next_start()?;
        self.expect_keyword("union")?;
        let name = self.expect_name()?;
        let directives = self.parse_directives(true)?;
        let members = if self.skip_if(&TokenKind::Equals)? {
            self.parse_union_members()?
        } else {
            vec![]
        };
        let span = self.span_from(start);
        Ok(ast::UnionTypeDefinition {
            description,
            name,
            directives,
            members,
            span,
        })
    }

    /// Parses `A | B | C` (a leading `|` is tolerated, per spec).
    fn parse_union_members(
        &mut self,
    ) -> Result<Vec<ast::NamedTypeAnnotation<'src>>, SyntaxError> {
        self.skip_if(&TokenKind::Pipe)?;
        let mut members = vec![self.parse_named_type_annotation()?];
        while self.skip_if(&TokenKind::Pipe)? {
            members.push(self.parse_named_type_annotation()?);
        }
        Ok(members)
    }

    fn parse_enum_type_definition(
        &mut self,
        description: Option<ast::StringValue<'src>>,
    ) -> Result<ast::EnumTypeDefinition<'src>, SyntaxError> {
        let start = self.next_start()?;
        self.expect_keyword("enum")?;
        let name = self.expect_name()?;
        let directives = self.parse_directives(true)?;
        let values = self.parse_enum_values_definition()?;
        let span = self.span_from(start);
        Ok(ast::EnumTypeDefinition {
            description,
            name,
            directives,
            values,
            span,
        })
    }

    fn parse_enum_values_definition(
        &mut self,
    ) -> Result<Vec<ast::EnumValueDefinition<'src>>, SyntaxError> {
        if !self.skip_if(&TokenKind::CurlyBraceOpen)? {
            return Ok(vec![]);
        }
        let mut values = vec![];
        while !self.skip_if(&TokenKind::CurlyBraceClose)? {
            values.push(self.parse_enum_value_definition()?);
        }
        Ok(values)
    }

    fn parse_enum_value_definition(
        &mut self,
    ) -> Result<ast::EnumValueDefinition<'src>, SyntaxError> {
        let start = self.next_start()?;
        let description = self.parse_description()?;
        let name = self.expect_name()?;
        if matches!(name.as_str(), "true" | "false" | "null") {
            return Err(SyntaxError::new(
                format!("`{}` is not a valid enum value name", name.as_str()),
                name.span,
            ));
        }
        let directives = self.parse_directives(true)?;
        let span = self.span_from(start);
        Ok(ast::EnumValueDefinition {
            description,
            name,
            directives,
            span,
        })
    }

    fn parse_input_object_type_definition(
        &mut self,
        description: Option<ast::StringValue<'src>>,
    ) -> Result<ast::InputObjectTypeDefinition<'src>, SyntaxError> {
        let start = self.next_start()?;
        self.expect_keyword("input")?;
        let name = self.expect_name()?;
        let directives = self.parse_directives(true)?;
        let fields = self.parse_input_fields_definition()?;
        let span = self.span_from(start);
        Ok(ast::InputObjectTypeDefinition {
            description,
            name,
            directives,
            fields,
            span,
        })
    }

    fn parse_input_fields_definition(
        &mut self,
    ) -> Result<Vec<ast::InputValueDefinition<'src>>, SyntaxError> {
        if !self.skip_if(&TokenKind::CurlyBraceOpen)? {
            return Ok(vec![]);
        }
        let mut fields = vec![];
        while !self.skip_if(&TokenKind::CurlyBraceClose)? {
            fields.push(self.parse_input_value_definition()?);
        }
        Ok(fields)
    }

    fn parse_directive_definition(
        &mut self,
        description: Option<ast::StringValue<'src>>,
    ) -> Result<ast::DirectiveDefinition<'src>, SyntaxError> {
        let start = self.next_start()?;
        self.expect_keyword("directive")?;
        self.expect(&TokenKind::At)?;
        let name = self.expect_name()?;
        let arguments = self.parse_arguments_definition()?;
        self.expect_keyword("on")?;
        let locations = self.parse_directive_locations()?;
        let span = self.span_from(start);
        Ok(ast::DirectiveDefinition {
            description,
            name,
            arguments,
            locations,
            span,
        })
    }

    /// Parses `LOCATION | LOCATION | ...` (a leading `|` is tolerated).
    fn parse_directive_locations(
        &mut self,
    ) -> Result<Vec<ast::DirectiveLocation>, SyntaxError> {
        self.skip_if(&TokenKind::Pipe)?;
        let mut locations = vec![self.parse_directive_location()?];
        while self.skip_if(&TokenKind::Pipe)? {
            locations.push(self.parse_directive_location()?);
        }
        Ok(locations)
    }

    fn parse_directive_location(&mut self) -> Result<ast::DirectiveLocation, SyntaxError> {
        let name = self.expect_name()?;
        ast::DirectiveLocation::from_keyword(name.as_str()).ok_or_else(|| {
            SyntaxError::new(
                format!("Unknown directive location \"{}\"", name.as_str()),
                name.span,
            )
        })
    }

    // =========================================================================
    // Type extensions
    // =========================================================================

    fn parse_type_extension(&mut self) -> Result<ast::TypeExtension<'src>, SyntaxError> {
        let start = self.next_start()?;
        self.expect_keyword("extend")?;

        match self.peek_keyword()? {
            Some("scalar") => {
                self.advance()?;
                let name = self.expect_name()?;
                let directives = self.parse_directives(true)?;
                let span = self.span_from(start);
                Ok(ast::TypeExtension::Scalar(ast::ScalarTypeExtension {
                    name,
                    directives,
                    span,
                }))
            }
            Some("type") => {
                self.advance()?;
                let name = self.expect_name()?;
                let interfaces = self.parse_implements_interfaces()?;
                let directives = self.parse_directives(true)?;
                let fields = self.parse_fields_definition()?;
                let span = self.span_from(start);
                Ok(ast::TypeExtension::Object(ast::ObjectTypeExtension {
                    name,
                    interfaces,
                    directives,
                    fields,
                    span,
                }))
            }
            Some("interface") => {
                self.advance()?;
                let name = self.expect_name()?;
                let directives = self.parse_directives(true)?;
                let fields = self.parse_fields_definition()?;
                let span = self.span_from(start);
                Ok(ast::TypeExtension::Interface(ast::InterfaceTypeExtension {
                    name,
                    directives,
                    fields,
                    span,
                }))
            }
            Some("union") => {
                self.advance()?;
                let name = self.expect_name()?;
                let directives = self.parse_directives(true)?;
                let members = if self.skip_if(&TokenKind::Equals)? {
                    self.parse_union_members()?
                } else {
                    vec![]
                };
                let span = self.span_from(start);
                Ok(ast::TypeExtension::Union(ast::UnionTypeExtension {
                    name,
                    directives,
                    members,
                    span,
                }))
            }
            Some("enum") => {
                self.advance()?;
                let name = self.expect_name()?;
                let directives = self.parse_directives(true)?;
                let values = self.parse_enum_values_definition()?;
                let span = self.span_from(start);
                Ok(ast::TypeExtension::Enum(ast::EnumTypeExtension {
                    name,
                    directives,
                    values,
                    span,
                }))
            }
            Some("input") => {
                self.advance()?;
                let name = self.expect_name()?;
                let directives = self.parse_directives(true)?;
                let fields = self.parse_input_fields_definition()?;
                let span = self.span_from(start);
                Ok(ast::TypeExtension::InputObject(
                    ast::InputObjectTypeExtension {
                        name,
                        directives,
                        fields,
                        span,
                    },
                ))
            }
            _ => Err(self.error_at_next(
                "Expected `scalar`, `type`, `interface`, `union`, `enum`, or `input`",
            )),
        }
    }
}
