//! Single-pass tokenizer for `{{...}}` markers
//!
//! Used for block matching during rendering and for placeholder introspection
//! (the linter needs every marker a template declares without rendering it).

/// Classification of a `{{...}}` marker
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// `{{key}}`, `{{nested.key}}` or `{{key | filter}}`
    Placeholder {
        /// Dotted path with any filter chain removed
        path: String,
    },

    /// `{{each items |var|}}`
    BlockStart { keyword: String, args: String },

    /// `{{/each}}`
    BlockEnd { keyword: String },
}

/// A single `{{...}}` token with position and classification
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Absolute byte position of `{{`
    pub start: usize,
    /// Total length in bytes including `{{` and `}}`
    pub length: usize,
    /// Backslashes directly before `{{`; odd means the marker is literal text
    pub backslash_count: usize,
    /// Line the token ends on
    pub line: usize,
}

impl Token {
    pub fn is_escaped(&self) -> bool {
        self.backslash_count % 2 == 1
    }
}

/// Scanner state
///
/// ```text
/// Normal ──{──> SeenLBrace ──{──> InToken ──}──> SeenRBrace ──}──> [token] → Normal
/// ```
///
/// Any byte that does not continue a transition falls back to the previous
/// state without moving backwards, so each byte is visited a bounded number
/// of times.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScanState {
    Normal {
        backslash_count: usize,
    },
    SeenLBrace {
        pos: usize,
        backslash_count: usize,
    },
    InToken {
        start: usize,
        content_start: usize,
        backslash_count: usize,
    },
    SeenRBrace {
        start: usize,
        content_start: usize,
        rbrace_pos: usize,
        backslash_count: usize,
    },
}

/// Iterator over the markers of a template
///
/// An unclosed `{{` at the end of input yields no token.
pub(crate) struct TokenStream<'a> {
    bytes: &'a [u8],
    pos: usize,
    state: ScanState,
    line: usize,
    step_count: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            state: ScanState::Normal { backslash_count: 0 },
            line: 1,
            step_count: 0,
        }
    }

    fn classify_content(content: &str) -> TokenKind {
        let trimmed = content.trim();

        if let Some(rest) = trimmed.strip_prefix("each ") {
            TokenKind::BlockStart {
                keyword: "each".to_string(),
                args: rest.trim().to_string(),
            }
        } else if let Some(rest) = trimmed.strip_prefix('/') {
            TokenKind::BlockEnd {
                keyword: rest.trim().to_string(),
            }
        } else {
            let path = trimmed.split('|').next().unwrap_or_default().trim();
            TokenKind::Placeholder {
                path: path.to_string(),
            }
        }
    }

    fn normal(&mut self, byte: u8, backslash_count: usize) {
        self.state = match byte {
            b'\\' => ScanState::Normal {
                backslash_count: backslash_count + 1,
            },
            b'{' => ScanState::SeenLBrace {
                pos: self.pos,
                backslash_count,
            },
            _ => {
                if byte == b'\n' {
                    self.line += 1;
                }
                ScanState::Normal { backslash_count: 0 }
            }
        };
        self.pos += 1;
    }

    /// A non-brace byte is left in place and looked at again in `Normal`
    fn seen_lbrace(&mut self, byte: u8, lbrace_pos: usize, backslash_count: usize) {
        if byte == b'{' {
            self.state = ScanState::InToken {
                start: lbrace_pos,
                content_start: self.pos + 1,
                backslash_count,
            };
            self.pos += 1;
        } else {
            self.state = ScanState::Normal { backslash_count: 0 };
        }
    }

    fn in_token(&mut self, byte: u8, start: usize, content_start: usize, backslash_count: usize) {
        if byte == b'}' {
            self.state = ScanState::SeenRBrace {
                start,
                content_start,
                rbrace_pos: self.pos,
                backslash_count,
            };
        } else if byte == b'\n' {
            self.line += 1;
        }
        self.pos += 1;
    }

    /// Returns the finished token, or `None` when the byte has to be looked
    /// at again inside the token
    fn seen_rbrace(
        &mut self,
        byte: u8,
        start: usize,
        content_start: usize,
        rbrace_pos: usize,
        backslash_count: usize,
    ) -> Option<Token> {
        if byte != b'}' {
            self.state = ScanState::InToken {
                start,
                content_start,
                backslash_count,
            };
            return None;
        }

        let content = std::str::from_utf8(&self.bytes[content_start..rbrace_pos]).unwrap_or("");
        let token = Token {
            kind: Self::classify_content(content),
            start,
            length: self.pos + 1 - start,
            backslash_count,
            line: self.line,
        };
        self.state = ScanState::Normal { backslash_count: 0 };
        self.pos += 1;
        Some(token)
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        // Every byte is visited at most twice; the bound only guards against bugs.
        let max_steps = self.bytes.len().saturating_mul(3);

        loop {
            self.step_count += 1;
            if self.step_count > max_steps || self.pos >= self.bytes.len() {
                return None;
            }

            let byte = self.bytes[self.pos];
            match self.state.clone() {
                ScanState::Normal { backslash_count } => self.normal(byte, backslash_count),
                ScanState::SeenLBrace {
                    pos,
                    backslash_count,
                } => self.seen_lbrace(byte, pos, backslash_count),
                ScanState::InToken {
                    start,
                    content_start,
                    backslash_count,
                } => self.in_token(byte, start, content_start, backslash_count),
                ScanState::SeenRBrace {
                    start,
                    content_start,
                    rbrace_pos,
                    backslash_count,
                } => {
                    if let Some(token) =
                        self.seen_rbrace(byte, start, content_start, rbrace_pos, backslash_count)
                    {
                        return Some(token);
                    }
                }
            }
        }
    }
}
