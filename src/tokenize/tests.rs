//! Tests for tokenizer module

use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;
use std::io::Cursor;

fn tokenizer(input: &str, config: TokenizerConfig) -> Tokenizer<Cursor<&[u8]>> {
    Tokenizer::new(Cursor::new(input.as_bytes()), config).unwrap()
}

fn rows(input: &str, config: TokenizerConfig) -> Vec<RawRow> {
    let mut t = tokenizer(input, config);
    let mut out = Vec::new();
    loop {
        match t.next_row() {
            Ok(row) => out.push(row),
            Err(Error::EndOfInput) => break,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    out
}

fn row(fields: &[&str]) -> RawRow {
    fields.iter().map(|s| (*s).to_string()).collect()
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_config_default() {
    let config = TokenizerConfig::default();
    assert_eq!(config.delimiter, ',');
    assert_eq!(config.comment, None);
    assert_eq!(config.fields_per_record, 0);
    assert!(!config.lazy_quotes);
    assert!(!config.trim_leading_space);
}

#[test]
fn test_config_rejects_quote_delimiter() {
    let config = TokenizerConfig {
        delimiter: '"',
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(Error::InvalidConfigValue { .. })
    ));
}

#[test]
fn test_config_rejects_comment_equal_to_delimiter() {
    let config = TokenizerConfig {
        delimiter: ';',
        comment: Some(';'),
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_config_rejects_newline_comment() {
    let config = TokenizerConfig {
        comment: Some('\n'),
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

// ============================================================================
// Splitting Tests
// ============================================================================

#[test]
fn test_simple_rows() {
    let out = rows("a,b,c\n1,2,3\n", TokenizerConfig::default());
    assert_eq!(out, vec![row(&["a", "b", "c"]), row(&["1", "2", "3"])]);
}

#[test]
fn test_last_line_without_newline() {
    let out = rows("a,b\n1,2", TokenizerConfig::default());
    assert_eq!(out, vec![row(&["a", "b"]), row(&["1", "2"])]);
}

#[test]
fn test_crlf_line_endings() {
    let out = rows("a,b\r\n1,2\r\n", TokenizerConfig::default());
    assert_eq!(out, vec![row(&["a", "b"]), row(&["1", "2"])]);
}

#[test]
fn test_empty_fields_preserved() {
    let out = rows(",x,\n", TokenizerConfig::default());
    assert_eq!(out, vec![row(&["", "x", ""])]);
}

#[test]
fn test_empty_lines_skipped() {
    let out = rows("a\n\n\nb\n", TokenizerConfig::default());
    assert_eq!(out, vec![row(&["a"]), row(&["b"])]);
}

#[test]
fn test_custom_delimiter() {
    let config = TokenizerConfig {
        delimiter: ';',
        ..Default::default()
    };
    let out = rows("a;b,c\n", config);
    assert_eq!(out, vec![row(&["a", "b,c"])]);
}

#[test]
fn test_multibyte_delimiter() {
    let config = TokenizerConfig {
        delimiter: '¦',
        ..Default::default()
    };
    let out = rows("é¦ü\n", config);
    assert_eq!(out, vec![row(&["é", "ü"])]);
}

#[test]
fn test_comment_lines_skipped() {
    let config = TokenizerConfig {
        comment: Some('#'),
        ..Default::default()
    };
    let out = rows("# header note\na,b\n#1,2\n3,4\n", config);
    assert_eq!(out, vec![row(&["a", "b"]), row(&["3", "4"])]);
}

#[test]
fn test_comment_marker_mid_line_is_data() {
    let config = TokenizerConfig {
        comment: Some('#'),
        ..Default::default()
    };
    let out = rows("a,#b\n", config);
    assert_eq!(out, vec![row(&["a", "#b"])]);
}

// ============================================================================
// Quoting Tests
// ============================================================================

#[test]
fn test_quoted_field_with_delimiter() {
    let out = rows("\"a,b\",c\n", TokenizerConfig::default());
    assert_eq!(out, vec![row(&["a,b", "c"])]);
}

#[test]
fn test_escaped_quote() {
    let out = rows("\"say \"\"hi\"\"\",x\n", TokenizerConfig::default());
    assert_eq!(out, vec![row(&["say \"hi\"", "x"])]);
}

#[test]
fn test_quoted_field_spans_lines() {
    let out = rows("\"line1\nline2\",x\nnext\n", TokenizerConfig::default());
    assert_eq!(out, vec![row(&["line1\nline2", "x"]), row(&["next"])]);
}

#[test]
fn test_quoted_field_crlf_normalised() {
    let out = rows("\"a\r\nb\"\r\n", TokenizerConfig::default());
    assert_eq!(out, vec![row(&["a\nb"])]);
}

#[test]
fn test_trailing_quoted_empty_field() {
    let out = rows("\"a\",\"\"\n", TokenizerConfig::default());
    assert_eq!(out, vec![row(&["a", ""])]);
}

#[test]
fn test_bare_quote_strict() {
    let mut t = tokenizer("a\"b,c\n", TokenizerConfig::default());
    let err = t.next_row().unwrap_err();
    assert!(matches!(err, Error::MalformedRow { line: 1, .. }));
}

#[test]
fn test_bare_quote_lazy() {
    let config = TokenizerConfig {
        lazy_quotes: true,
        ..Default::default()
    };
    let out = rows("a\"b,c\n", config);
    assert_eq!(out, vec![row(&["a\"b", "c"])]);
}

#[test]
fn test_stray_quote_in_quoted_field_strict() {
    let mut t = tokenizer("x\n\"a\"b,c\n", TokenizerConfig::default());
    t.next_row().unwrap();
    let err = t.next_row().unwrap_err();
    assert!(matches!(err, Error::MalformedRow { line: 2, .. }));
}

#[test]
fn test_stray_quote_in_quoted_field_lazy() {
    let config = TokenizerConfig {
        lazy_quotes: true,
        ..Default::default()
    };
    let out = rows("\"a\"b\",c\n", config);
    assert_eq!(out, vec![row(&["a\"b", "c"])]);
}

#[test]
fn test_unterminated_quote_strict() {
    let mut t = tokenizer("\"abc\n", TokenizerConfig::default());
    assert!(matches!(
        t.next_row(),
        Err(Error::MalformedRow { line: 1, .. })
    ));
}

#[test]
fn test_unterminated_quote_lazy() {
    let config = TokenizerConfig {
        lazy_quotes: true,
        ..Default::default()
    };
    let out = rows("\"abc", config);
    assert_eq!(out, vec![row(&["abc"])]);
}

// ============================================================================
// Trimming and Field Count Tests
// ============================================================================

#[test]
fn test_trim_leading_space() {
    let config = TokenizerConfig {
        trim_leading_space: true,
        ..Default::default()
    };
    let out = rows("  a,   b ,\t\"c\"\n", config);
    assert_eq!(out, vec![row(&["a", "b ", "c"])]);
}

#[test]
fn test_no_trim_by_default() {
    let out = rows(" a, b\n", TokenizerConfig::default());
    assert_eq!(out, vec![row(&[" a", " b"])]);
}

#[test]
fn test_trim_does_not_consume_whitespace_delimiter() {
    let config = TokenizerConfig {
        delimiter: '\t',
        trim_leading_space: true,
        ..Default::default()
    };
    let out = rows("a\t\tb\n", config);
    assert_eq!(out, vec![row(&["a", "", "b"])]);
}

#[test]
fn test_fields_per_record_enforced() {
    let config = TokenizerConfig {
        fields_per_record: 2,
        ..Default::default()
    };
    let mut t = tokenizer("a,b\n1,2,3\n4,5\n", config);
    assert_eq!(t.next_row().unwrap(), row(&["a", "b"]));

    let err = t.next_row().unwrap_err();
    match err {
        Error::MalformedRow { line, message } => {
            assert_eq!(line, 2);
            assert!(message.contains("expected 2, got 3"));
        }
        other => panic!("unexpected error: {other}"),
    }

    // The session keeps going after a malformed row
    assert_eq!(t.next_row().unwrap(), row(&["4", "5"]));
}

#[test]
fn test_invalid_utf8_line_is_malformed() {
    let input: &[u8] = b"a,b\nx\xffy,1\nz,2\n";
    let mut t = Tokenizer::new(Cursor::new(input), TokenizerConfig::default()).unwrap();
    assert_eq!(t.next_row().unwrap(), row(&["a", "b"]));

    let err = t.next_row().unwrap_err();
    assert!(matches!(err, Error::MalformedRow { line: 2, .. }));
    assert!(err.to_string().contains("invalid UTF-8"));

    assert_eq!(t.next_row().unwrap(), row(&["z", "2"]));
    assert!(matches!(t.next_row(), Err(Error::EndOfInput)));
}

#[test]
fn test_fields_per_record_zero_unchecked() {
    let out = rows("a,b\n1\n1,2,3\n", TokenizerConfig::default());
    assert_eq!(out.len(), 3);
    assert_eq!(out[1], row(&["1"]));
}

#[test]
fn test_end_of_input_repeats() {
    let mut t = tokenizer("a\n", TokenizerConfig::default());
    t.next_row().unwrap();
    assert!(matches!(t.next_row(), Err(Error::EndOfInput)));
    assert!(matches!(t.next_row(), Err(Error::EndOfInput)));
}

#[test]
fn test_line_counter() {
    let mut t = tokenizer("a\n\n\"b\nc\"\n", TokenizerConfig::default());
    t.next_row().unwrap();
    assert_eq!(t.line(), 1);
    t.next_row().unwrap();
    assert_eq!(t.line(), 4);
}
