//! In-memory `.docx` fixtures
//!
//! Only the parts a filler looks at are produced; the result is not meant
//! to open in a word processor.

use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const DOCUMENT_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;

const DOCUMENT_CLOSE: &str = "</w:body></w:document>";

/// Zip container holding `parts` verbatim
///
/// A `[Content_Types].xml` entry is written first unless `parts` has one.
pub fn docx_with_parts(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    if !parts.iter().any(|(name, _)| *name == "[Content_Types].xml") {
        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();
    }
    for (name, content) in parts {
        zip.start_file(name.to_string(), options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Document whose body has one single-run paragraph per entry
///
/// Paragraph text is inserted as-is, so it must already be valid XML text.
pub fn docx_with_body(paragraphs: &[&str]) -> Vec<u8> {
    let mut document = String::from(DOCUMENT_OPEN);
    for text in paragraphs {
        document.push_str(r#"<w:p><w:r><w:t xml:space="preserve">"#);
        document.push_str(text);
        document.push_str("</w:t></w:r></w:p>");
    }
    document.push_str(DOCUMENT_CLOSE);
    docx_with_parts(&[("word/document.xml", &document)])
}

/// Content of one entry
///
/// # Panics
///
/// Panics if `bytes` is not a zip container or has no entry `name`.
pub fn docx_part(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("not a zip container");
    let mut entry = archive
        .by_name(name)
        .unwrap_or_else(|e| panic!("no entry {}: {}", name, e));
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    content
}

/// Visible text of `word/document.xml`, one line per paragraph
pub fn docx_text(bytes: &[u8]) -> String {
    let document = docx_part(bytes, "word/document.xml");
    let mut text = String::new();
    let mut in_tag = false;
    let mut tag = String::new();
    for c in document.chars() {
        match c {
            '<' => {
                in_tag = true;
                tag.clear();
            }
            '>' => {
                in_tag = false;
                if tag == "/w:p" || tag == "w:br/" {
                    text.push('\n');
                }
            }
            _ if in_tag => tag.push(c),
            _ => text.push(c),
        }
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docx_with_body_round_trips_text() {
        let bytes = docx_with_body(&["First {{A}}", "Second"]);
        assert!(bytes.starts_with(b"PK\x03\x04"));
        assert_eq!(docx_text(&bytes), "First {{A}}\nSecond");
    }

    #[test]
    fn test_docx_with_parts_adds_content_types() {
        let bytes = docx_with_parts(&[("word/document.xml", "<x/>")]);
        assert!(docx_part(&bytes, "[Content_Types].xml").contains("<Types"));
        assert_eq!(docx_part(&bytes, "word/document.xml"), "<x/>");
    }
}
