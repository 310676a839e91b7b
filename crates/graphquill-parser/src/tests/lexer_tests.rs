use crate::block_string_value;
use crate::Lexer;
use crate::TokenKind;

/// Collects the token kinds of a source string, failing the test on the
/// first lex error.
fn lex_kinds(source: &str) -> Vec<TokenKind<'_>> {
    Lexer::new(source)
        .map(|result| result.expect("lexes without error").kind)
        .collect()
}

fn lex_error(source: &str) -> String {
    let mut lexer = Lexer::new(source);
    loop {
        match lexer.next_token() {
            Ok(token) => {
                if matches!(token.kind, TokenKind::Eof) {
                    panic!("expected a lex error, got clean EOF");
                }
            }
            Err(err) => return err.message().to_string(),
        }
    }
}

mod punctuators_and_names {
    use super::*;
    use std::borrow::Cow;

    #[test]
    fn lexes_punctuators() {
        assert_eq!(lex_kinds("! $ & ( ) : = @ [ ] { } | ..."), vec![
            TokenKind::Bang,
            TokenKind::Dollar,
            TokenKind::Ampersand,
            TokenKind::ParenOpen,
            TokenKind::ParenClose,
            TokenKind::Colon,
            TokenKind::Equals,
            TokenKind::At,
            TokenKind::SquareBracketOpen,
            TokenKind::SquareBracketClose,
            TokenKind::CurlyBraceOpen,
            TokenKind::CurlyBraceClose,
            TokenKind::Pipe,
            TokenKind::Ellipsis,
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn lexes_names_zero_copy() {
        let kinds = lex_kinds("_foo bar9 __typename");
        assert_eq!(kinds[0], TokenKind::Name(Cow::Borrowed("_foo")));
        assert_eq!(kinds[1], TokenKind::Name(Cow::Borrowed("bar9")));
        assert_eq!(kinds[2], TokenKind::Name(Cow::Borrowed("__typename")));
    }

    #[test]
    fn skips_commas_and_bom_as_whitespace() {
        assert_eq!(lex_kinds("\u{FEFF} a, b ,,, c "), vec![
            TokenKind::Name(Cow::Borrowed("a")),
            TokenKind::Name(Cow::Borrowed("b")),
            TokenKind::Name(Cow::Borrowed("c")),
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn emits_comment_tokens() {
        assert_eq!(lex_kinds("a # a comment\nb"), vec![
            TokenKind::Name(Cow::Borrowed("a")),
            TokenKind::Comment(Cow::Borrowed(" a comment")),
            TokenKind::Name(Cow::Borrowed("b")),
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn lone_dots_are_an_error() {
        assert!(lex_error("..").contains("`.`"));
        assert!(lex_error("a . b").contains("`.`"));
    }

    #[test]
    fn rejects_unexpected_characters() {
        assert_eq!(lex_error("a ; b"), "Unexpected character `;`");
        assert_eq!(lex_error("?"), "Unexpected character `?`");
    }

    #[test]
    fn tracks_line_and_column_across_newline_styles() {
        let mut lexer = Lexer::new("a\nb\r\nc\rd");
        let positions: Vec<(usize, usize)> = std::iter::from_fn(|| {
            let token = lexer.next_token().unwrap();
            if matches!(token.kind, TokenKind::Eof) {
                None
            } else {
                Some((
                    token.span.start_inclusive.line(),
                    token.span.start_inclusive.column(),
                ))
            }
        })
        .collect();
        assert_eq!(positions, vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
    }
}

mod numbers {
    use super::*;
    use std::borrow::Cow;

    #[test]
    fn lexes_int_values() {
        assert_eq!(lex_kinds("0 -0 42 -42")[..4], [
            TokenKind::IntValue(Cow::Borrowed("0")),
            TokenKind::IntValue(Cow::Borrowed("-0")),
            TokenKind::IntValue(Cow::Borrowed("42")),
            TokenKind::IntValue(Cow::Borrowed("-42")),
        ]);
    }

    #[test]
    fn lexes_float_values() {
        assert_eq!(lex_kinds("1.5 -0.25 2e10 1.5e-3 4E+2")[..5], [
            TokenKind::FloatValue(Cow::Borrowed("1.5")),
            TokenKind::FloatValue(Cow::Borrowed("-0.25")),
            TokenKind::FloatValue(Cow::Borrowed("2e10")),
            TokenKind::FloatValue(Cow::Borrowed("1.5e-3")),
            TokenKind::FloatValue(Cow::Borrowed("4E+2")),
        ]);
    }

    #[test]
    fn rejects_leading_zeros() {
        assert_eq!(
            lex_error("01"),
            "Invalid number, unexpected digit after 0: `1`"
        );
    }

    #[test]
    fn rejects_trailing_dot() {
        assert!(lex_error("1.").contains("Invalid number"));
    }

    #[test]
    fn rejects_bare_minus() {
        assert!(lex_error("-").contains("Invalid number"));
    }

    #[test]
    fn rejects_empty_exponent() {
        assert!(lex_error("1e").contains("Invalid number"));
    }

    #[test]
    fn rejects_number_running_into_name() {
        assert!(lex_error("1x").contains("Invalid number"));
    }
}

mod strings {
    use super::*;

    fn lex_string(source: &str) -> (String, bool) {
        match lex_kinds(source).into_iter().next() {
            Some(TokenKind::StringValue { value, block }) => (value.into_owned(), block),
            other => panic!("expected a string token, got {other:?}"),
        }
    }

    #[test]
    fn lexes_simple_string() {
        assert_eq!(lex_string(r#""hello""#), ("hello".to_string(), false));
    }

    #[test]
    fn lexes_escapes() {
        assert_eq!(
            lex_string(r#""a\"b\\c\/d\n\t""#),
            ("a\"b\\c/d\n\t".to_string(), false)
        );
    }

    #[test]
    fn lexes_unicode_escapes() {
        assert_eq!(
            lex_string("\"\\u0041\\u00E9\""),
            ("A\u{00E9}".to_string(), false)
        );
    }

    #[test]
    fn rejects_unterminated_string() {
        assert_eq!(lex_error("\"abc"), "Unterminated string");
        assert_eq!(lex_error("\"abc\ndef\""), "Unterminated string");
    }

    #[test]
    fn rejects_bad_escape() {
        assert!(lex_error(r#""\q""#).contains("Invalid character escape sequence"));
    }

    #[test]
    fn rejects_bad_unicode_escape() {
        assert!(lex_error(r#""\uXYZW""#).contains("Invalid unicode escape"));
    }

    #[test]
    fn lexes_block_string_with_trim() {
        // The indentation common to all lines after the first is stripped,
        // as are leading and trailing blank lines.
        let (value, block) = lex_string("\"\"\"\n  hello\n    world\n  \"\"\"");
        assert!(block);
        assert_eq!(value, "hello\n  world");
    }

    #[test]
    fn block_string_preserves_first_line() {
        let (value, _) = lex_string("\"\"\"first\n  second\"\"\"");
        assert_eq!(value, "first\nsecond");
    }

    #[test]
    fn block_string_escaped_triple_quote() {
        let (value, _) = lex_string(r#""""contains \""" quotes""""#);
        assert_eq!(value, "contains \"\"\" quotes");
    }
}

mod block_string_algorithm {
    use super::*;

    #[test]
    fn strips_common_indent_excluding_first_line() {
        assert_eq!(
            block_string_value("\n  hello\n    world\n  "),
            "hello\n  world"
        );
    }

    #[test]
    fn blank_lines_do_not_affect_indent() {
        assert_eq!(block_string_value("\n  a\n\n  b"), "a\n\nb");
    }

    #[test]
    fn strips_leading_and_trailing_blank_lines() {
        assert_eq!(block_string_value("\n\n  x\n\n\n"), "x");
    }

    #[test]
    fn single_line_is_untouched() {
        assert_eq!(block_string_value("  solo  "), "  solo  ");
    }

    #[test]
    fn normalizes_crlf() {
        assert_eq!(block_string_value("\r\n  a\r\n  b\r\n"), "a\nb");
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn int_literals_round_trip(n: i64) {
            let source = n.to_string();
            let kinds = lex_kinds(&source);
            prop_assert_eq!(kinds.len(), 2);
            match &kinds[0] {
                TokenKind::IntValue(raw) => prop_assert_eq!(raw.as_ref(), source.as_str()),
                other => prop_assert!(false, "expected IntValue, got {:?}", other),
            }
        }

        #[test]
        fn names_lex_as_single_token(name in "[_A-Za-z][_A-Za-z0-9]{0,12}") {
            let kinds = lex_kinds(&name);
            prop_assert_eq!(kinds.len(), 2);
            match &kinds[0] {
                TokenKind::Name(value) => prop_assert_eq!(value.as_ref(), name.as_str()),
                other => prop_assert!(false, "expected Name, got {:?}", other),
            }
        }
    }
}
