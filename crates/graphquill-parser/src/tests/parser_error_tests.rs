use crate::parse_executable;
use crate::parse_sdl;
use crate::parse_type;
use crate::parse_value;
use crate::ParseOptions;

#[test]
fn empty_document_is_an_error() {
    let err = parse_executable("").unwrap_err();
    assert!(err.message().contains("at least one definition"));
}

#[test]
fn unclosed_selection_set_fails_at_eof() {
    let err = parse_executable("{ hello ").unwrap_err();
    assert!(err.message().contains("<EOF>"));
}

#[test]
fn empty_selection_set_is_an_error() {
    assert!(parse_executable("{ }").is_err());
}

#[test]
fn missing_colon_in_argument() {
    let err = parse_executable("{ field(arg 5) }").unwrap_err();
    assert!(err.message().contains("Expected `:`"));
}

#[test]
fn stray_top_level_name_is_an_error() {
    let err = parse_executable("notakeyword { f }").unwrap_err();
    assert!(err.message().contains("Unexpected Name \"notakeyword\""));
}

#[test]
fn trailing_tokens_after_value() {
    let err = parse_value("1 2").unwrap_err();
    assert!(err.message().contains("Expected <EOF>"));
}

#[test]
fn trailing_tokens_after_type() {
    assert!(parse_type("Foo Bar").is_err());
}

#[test]
fn unknown_directive_location_is_an_error() {
    let err = parse_sdl("directive @d on NOT_A_LOCATION").unwrap_err();
    assert!(err.message().contains("Unknown directive location"));
}

#[test]
fn extensions_reject_descriptions() {
    let err = parse_sdl("\"doc\" extend type T { f: Int }").unwrap_err();
    assert!(err.message().contains("do not accept a description"));
}

#[test]
fn error_location_is_one_based_and_labeled() {
    let err = crate::parse(
        "{\n  field(:\n}",
        &ParseOptions {
            allow_type_system: false,
            file_path: Some("query.graphql".into()),
        },
    )
    .unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.starts_with("query.graphql:2:9: syntax error:"), "got: {rendered}");
}
