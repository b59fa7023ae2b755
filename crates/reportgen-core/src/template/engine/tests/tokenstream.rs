//! Unit tests for TokenStream

use super::tokenize::{TokenKind, TokenStream};

#[test]
fn test_tokenstream_single_placeholder() {
    let mut stream = TokenStream::new("Hello {{name}} world");

    let token = stream.next().unwrap();
    assert_eq!(token.start, 6);
    assert_eq!(token.length, 8);
    assert!(!token.is_escaped());
    assert_eq!(
        token.kind,
        TokenKind::Placeholder {
            path: "name".to_string()
        }
    );
    assert!(stream.next().is_none());
}

#[test]
fn test_tokenstream_strips_filters_from_path() {
    let token = TokenStream::new(r#"{{ Date | datetimeformat("%Y") }}"#)
        .next()
        .unwrap();
    assert_eq!(
        token.kind,
        TokenKind::Placeholder {
            path: "Date".to_string()
        }
    );
}

#[test]
fn test_tokenstream_escaped_tokens() {
    let mut stream = TokenStream::new(r#"\{{escaped}} {{real}}"#);

    let first = stream.next().unwrap();
    assert_eq!(first.backslash_count, 1);
    assert!(first.is_escaped());

    let second = stream.next().unwrap();
    assert_eq!(second.backslash_count, 0);
    assert!(!second.is_escaped());

    assert!(stream.next().is_none());
}

#[test]
fn test_tokenstream_block_tokens() {
    let kinds: Vec<_> = TokenStream::new("{{each items |item|}} {{item.name}} {{/each}}")
        .map(|t| t.kind)
        .collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::BlockStart {
                keyword: "each".to_string(),
                args: "items |item|".to_string()
            },
            TokenKind::Placeholder {
                path: "item.name".to_string()
            },
            TokenKind::BlockEnd {
                keyword: "each".to_string()
            },
        ]
    );
}

#[test]
fn test_tokenstream_single_braces_are_text() {
    assert_eq!(TokenStream::new("{ a } {b} }}").count(), 0);
}

#[test]
fn test_tokenstream_single_rbrace_inside_token() {
    let token = TokenStream::new("{{a}b}}").next().unwrap();
    assert_eq!(
        token.kind,
        TokenKind::Placeholder {
            path: "a}b".to_string()
        }
    );
}

#[test]
fn test_tokenstream_line_numbers() {
    let mut stream = TokenStream::new("Line 1\n{{token1}}\nLine 3\n{{token2}}");
    assert_eq!(stream.next().unwrap().line, 2);
    assert_eq!(stream.next().unwrap().line, 4);
    assert!(stream.next().is_none());
}
