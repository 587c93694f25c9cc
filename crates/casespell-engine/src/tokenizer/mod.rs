// Candidate word extraction
//
// A word is a maximal run of letters from the supported letter set, where
// single joiners (`-`, `'`, `_`) may connect two letter runs. A word never
// starts or ends with a joiner and never holds two joiners in a row.

use std::iter::Enumerate;
use std::str::Split;

use casespell_core::character::{is_joiner, is_word_letter};
use casespell_core::token::Token;

// ============================================================================
// Char-slice primitives
// ============================================================================

/// Compute the length of the word starting at the beginning of `text`.
///
/// Returns 0 when `text` does not start with a letter.
pub fn word_length(text: &[char]) -> usize {
    let textlen = text.len();
    let mut wlen = 0;

    while wlen < textlen && is_word_letter(text[wlen]) {
        wlen += 1;
    }
    if wlen == 0 {
        return 0;
    }

    // A joiner belongs to the word only when a letter follows it.
    while wlen + 1 < textlen && is_joiner(text[wlen]) && is_word_letter(text[wlen + 1]) {
        wlen += 1;
        while wlen < textlen && is_word_letter(text[wlen]) {
            wlen += 1;
        }
    }
    wlen
}

/// Find the next word at or after `pos`.
///
/// Returns `(start, length)` in characters, or `None` when no letter
/// remains. A joiner directly preceding a letter at `pos` is skipped, so
/// `"-abc"` yields the word `"abc"`.
pub fn next_word(text: &[char], pos: usize) -> Option<(usize, usize)> {
    let start = (pos..text.len()).find(|&i| is_word_letter(text[i]))?;
    Some((start, word_length(&text[start..])))
}

// ============================================================================
// Word iterator
// ============================================================================

/// Scan position within one line.
#[derive(Debug, Clone)]
struct LineCursor<'a> {
    line: usize,
    text: &'a str,
    chars: Vec<char>,
    /// Byte offset of every char, plus the line length at the end.
    offsets: Vec<usize>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    fn new(line: usize, text: &'a str) -> Self {
        let (offsets, chars): (Vec<usize>, Vec<char>) = text.char_indices().unzip();
        let mut offsets = offsets;
        offsets.push(text.len());
        Self {
            line,
            text,
            chars,
            offsets,
            pos: 0,
        }
    }

    fn next_token(&mut self) -> Option<Token<'a>> {
        let (start, len) = next_word(&self.chars, self.pos)?;
        self.pos = start + len;
        let word = &self.text[self.offsets[start]..self.offsets[start + len]];
        Some(Token::new(word, self.line, start))
    }
}

/// Lazy iterator over the words of a text, line by line, in discovery order.
///
/// The iterator is `Clone`; a clone restarts from the clone point, and
/// calling [`tokenize`] again restarts from the beginning.
#[derive(Debug, Clone)]
pub struct Words<'a> {
    lines: Enumerate<Split<'a, char>>,
    current: Option<LineCursor<'a>>,
}

impl<'a> Iterator for Words<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(cursor) = self.current.as_mut() {
                if let Some(token) = cursor.next_token() {
                    return Some(token);
                }
            }
            let (line, text) = self.lines.next()?;
            self.current = Some(LineCursor::new(line, text));
        }
    }
}

/// Tokenize `text` into candidate words.
pub fn tokenize(text: &str) -> Words<'_> {
    Words {
        lines: text.split('\n').enumerate(),
        current: None,
    }
}

/// Collect the words of `text` as string slices.
pub fn words(text: &str) -> Vec<&str> {
    tokenize(text).map(|t| t.text).collect()
}
