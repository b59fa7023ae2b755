//! Closing-tag matching for `{{each}}` blocks

use super::tokenize::{TokenKind, TokenStream};

/// Find the `{{/each}}` that closes the block whose body starts at `text`
///
/// Returns (position, length) of the closing token. Nested `each` blocks are
/// skipped over and escaped markers such as `\{{/each}}` never close a block.
pub(crate) fn find_each_end(text: &str) -> Option<(usize, usize)> {
    let mut depth = 0usize;

    for token in TokenStream::new(text).filter(|t| !t.is_escaped()) {
        match &token.kind {
            TokenKind::BlockStart { keyword, .. } if keyword == "each" => depth += 1,
            TokenKind::BlockEnd { keyword } if keyword == "each" => {
                if depth == 0 {
                    return Some((token.start, token.length));
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    None
}
