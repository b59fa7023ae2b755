//! Loop rendering tests for template engine

use super::helpers::nested_context;
use super::*;
use serde_json::json;

#[test]
fn test_render_each_loop() {
    let template = r#"{{each Crew |member|}}
- {{member.name}} ({{member.role}})
{{/each}}"#;
    let result = render(template, &nested_context()).unwrap();
    assert!(result.contains("- Ana (Party Chief)"));
    assert!(result.contains("- Ben (Surveyor)"));
}

#[test]
fn test_render_inline_each_with_spaces() {
    let template = "Crew: {{ each Crew |m| }}{{ m.name }};{{ /each }}";
    let result = render(template, &nested_context()).unwrap();
    assert_eq!(result, "Crew: Ana;Ben;");
}

#[test]
fn test_render_nested_each_loops() {
    let context = TemplateContext::new(json!({
        "Lines": [
            {"id": "L1", "fixes": [{"n": 1}, {"n": 2}]},
            {"id": "L2", "fixes": [{"n": 3}]}
        ]
    }));
    let template = "{{each Lines |line|}}[{{line.id}}:{{each line.fixes |f|}}{{f.n}}{{/each}}]{{/each}}";
    let result = render(template, &context).unwrap();
    assert_eq!(result, "[L1:12][L2:3]");
}

#[test]
fn test_loop_variable_shadows_outer_key() {
    let context = TemplateContext::new(json!({
        "item": "outer",
        "items": ["a", "b"]
    }));
    let result = render("{{each items |item|}}{{item}}{{/each}}{{item}}", &context).unwrap();
    assert_eq!(result, "abouter");
}

#[test]
fn test_render_empty_array() {
    let context = TemplateContext::new(json!({ "items": [] }));
    let result = render("{{each items |item|}}{{item}}{{/each}}", &context).unwrap();
    assert_eq!(result, "");
}
