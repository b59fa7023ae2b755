//! Escape sequence tests for template engine

use super::helpers::simple_context;
use super::*;
use serde_json::json;

#[test]
fn test_render_escape_sequences() {
    let result = render(r#"Literal: \{{ProjectName}}"#, &simple_context()).unwrap();
    assert_eq!(result, "Literal: {{ProjectName}}");
}

#[test]
fn test_render_escaped_undefined_key_is_not_an_error() {
    let result = render(r#"\{{ Unknown }}"#, &simple_context()).unwrap();
    assert_eq!(result, "{{ Unknown }}");
}

#[test]
fn test_error_escaped_placeholder_unclosed() {
    let result = render(r#"Before \{{ProjectName after"#, &simple_context());
    match result {
        Err(TemplateError::MalformedSyntax { message, .. }) => {
            assert!(message.contains("Unclosed"));
        }
        other => panic!("Expected MalformedSyntax error, got {:?}", other),
    }
}

#[test]
fn test_render_double_backslash_escape() {
    let result = render(r#"Backslash: \\{{ProjectName}}"#, &simple_context()).unwrap();
    assert_eq!(result, r#"Backslash: \Alpha"#);
}

#[test]
fn test_render_escaped_end_each_in_loop_body() {
    let context = TemplateContext::new(json!({
        "items": [{"name": "Item1"}, {"name": "Item2"}]
    }));
    let template = r#"{{each items |item|}}{{item.name}}: \{{/each}} more
{{/each}}"#;
    let result = render(template, &context).unwrap();
    assert!(result.contains("Item1: {{/each}} more"));
    assert!(result.contains("Item2: {{/each}} more"));
    assert_eq!(result.lines().count(), 2);
}
