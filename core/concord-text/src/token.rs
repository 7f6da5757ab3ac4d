/// Byte range of a token in its source text. Always on char boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A word of the source text together with the characters around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub span: Span,
    /// Character (not byte) offsets of the token.
    pub char_start: usize,
    pub char_end: usize,
    pub context: &'a str,
}
