//! Basic rendering tests for template engine

use super::helpers::{nested_context, simple_context};
use super::*;
use serde_json::json;

#[test]
fn test_render_simple_placeholder() {
    let result = render("Project: {{ProjectName}}", &simple_context()).unwrap();
    assert_eq!(result, "Project: Alpha");
}

#[test]
fn test_render_placeholder_with_spaces() {
    let result = render("Project: {{  ProjectName  }}", &simple_context()).unwrap();
    assert_eq!(result, "Project: Alpha");
}

#[test]
fn test_render_nested_key() {
    let result = render("{{ Equipment.MBES.Make }} {{Equipment.MBES.Model}}", &nested_context())
        .unwrap();
    assert_eq!(result, "Kongsberg EM2040");
}

#[test]
fn test_render_scalar_kinds() {
    let context = simple_context();
    assert_eq!(render("{{count}}", &context).unwrap(), "42");
    assert_eq!(render("{{depth}}", &context).unwrap(), "12.5");
    assert_eq!(render("{{enabled}}", &context).unwrap(), "true");
}

#[test]
fn test_render_null_is_blank() {
    let result = render("Client: [{{ClientName}}]", &simple_context()).unwrap();
    assert_eq!(result, "Client: []");
}

#[test]
fn test_filename_pattern() {
    let context = TemplateContext::new(json!({"ProjectName": "Alpha", "Date": "2025-01-01"}));
    let result = render("{{ProjectName}}_{{Date}}.docx", &context).unwrap();
    assert_eq!(result, "Alpha_2025-01-01.docx");
}

#[test]
fn test_render_with_filters() {
    let context = simple_context();
    let result = render(
        r#"{{ Date | datetimeformat("%d %b %Y") }} / {{ ProjectName | upper }}"#,
        &context,
    )
    .unwrap();
    assert_eq!(result, "01 Jan 2025 / ALPHA");
}

#[test]
fn test_render_xml_escape() {
    let context = TemplateContext::new(json!({"Client": "Smith & <Sons>"}));
    let engine = TemplateEngine::with_escape(Escape::Xml);
    let result = engine.render("<w:t>{{Client}}</w:t>", &context).unwrap();
    assert_eq!(result, "<w:t>Smith &amp; &lt;Sons&gt;</w:t>");
}

#[test]
fn test_render_wordprocessing_line_breaks() {
    let context = TemplateContext::new(json!({"Notes": "line one\nline two"}));
    let engine = TemplateEngine::with_escape(Escape::WordprocessingMl);
    let result = engine.render("<w:t>{{Notes}}</w:t>", &context).unwrap();
    assert_eq!(
        result,
        "<w:t>line one</w:t><w:br/><w:t xml:space=\"preserve\">line two</w:t>"
    );
}

#[test]
fn test_render_no_placeholders() {
    let text = "Plain text with a single { brace }.";
    assert_eq!(render(text, &simple_context()).unwrap(), text);
}
