//! Placeholder introspection without rendering

use std::collections::BTreeSet;

use super::helpers::parse_each_syntax;
use super::tokenize::{TokenKind, TokenStream};

/// Whether `path` is rooted at one of the currently bound loop variables
fn is_loop_bound(path: &str, bound: &[String]) -> bool {
    let root = path.split('.').next().unwrap_or(path);
    bound.iter().any(|var| var == root)
}

/// Collect every context path a template reads
///
/// The result holds plain placeholders (filters stripped) and the source key
/// of each `{{each}}` block. Paths rooted at a loop variable are skipped since
/// they never reach the context directly. Escaped markers and malformed
/// `each` headers are ignored here; rendering reports those.
pub fn declared_placeholders(template: &str) -> BTreeSet<String> {
    let mut declared = BTreeSet::new();
    let mut bound: Vec<String> = Vec::new();

    for token in TokenStream::new(template).filter(|t| !t.is_escaped()) {
        match token.kind {
            TokenKind::Placeholder { path } => {
                if !path.is_empty() && !is_loop_bound(&path, &bound) {
                    declared.insert(path);
                }
            }
            TokenKind::BlockStart { keyword, args } if keyword == "each" => {
                match parse_each_syntax(&args, token.line) {
                    Ok((key, var)) => {
                        if !is_loop_bound(key, &bound) {
                            declared.insert(key.to_string());
                        }
                        bound.push(var.to_string());
                    }
                    // keep the stack balanced with the matching {{/each}}
                    Err(_) => bound.push(String::new()),
                }
            }
            TokenKind::BlockEnd { keyword } if keyword == "each" => {
                bound.pop();
            }
            _ => {}
        }
    }

    declared
}
