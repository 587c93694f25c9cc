// Word token produced by the tokenizer

/// A candidate word found in a body of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// The word itself, borrowed from the scanned text.
    pub text: &'a str,

    /// Zero-based line number.
    pub line: usize,

    /// Zero-based character offset of the word within its line.
    pub column: usize,

    /// Length of the word in characters.
    pub token_len: usize,
}

impl<'a> Token<'a> {
    /// Create a new token.
    pub fn new(text: &'a str, line: usize, column: usize) -> Self {
        Self {
            text,
            line,
            column,
            token_len: text.chars().count(),
        }
    }
}
