// Spell decision engine
//
// Decides, for one word, whether it is already known, correct on its own,
// correct as a concatenation of sub-words under a naming convention, or
// misspelled.

use casespell_core::enums::{FormatStyle, Verdict};
use tracing::debug;

use crate::oracle::OracleSet;
use crate::splitter::split;
use crate::store::{DictionaryCache, DictionaryStore};

/// Case-sensitive lookup of user dictionary words.
pub trait KnownWords {
    fn is_known(&self, word: &str) -> bool;
}

impl KnownWords for DictionaryCache {
    fn is_known(&self, word: &str) -> bool {
        self.contains(word)
    }
}

impl KnownWords for DictionaryStore {
    fn is_known(&self, word: &str) -> bool {
        self.contains(word)
    }
}

impl<T: KnownWords> KnownWords for Option<T> {
    fn is_known(&self, word: &str) -> bool {
        self.as_ref().is_some_and(|known| known.is_known(word))
    }
}

impl<T: KnownWords + ?Sized> KnownWords for &T {
    fn is_known(&self, word: &str) -> bool {
        (**self).is_known(word)
    }
}

/// Classifies words against a set of oracles and naming conventions.
#[derive(Debug, Clone, Copy)]
pub struct DecisionEngine<'a> {
    oracles: &'a OracleSet,
    styles: &'a [FormatStyle],
}

impl<'a> DecisionEngine<'a> {
    /// `styles` are tried in the given order; the first that explains a word
    /// wins.
    pub fn new(oracles: &'a OracleSet, styles: &'a [FormatStyle]) -> Self {
        Self { oracles, styles }
    }

    /// Whether the word is correct on its own.
    ///
    /// With no oracle loaded every word is accepted.
    pub fn is_correct(&self, word: &str) -> bool {
        self.oracles.is_empty() || self.oracles.any_correct(word)
    }

    /// Whether `parts` is a real split whose every part is correct.
    pub fn split_is_correct(&self, parts: &[&str]) -> bool {
        parts.len() > 1 && parts.iter().all(|part| self.is_correct(part))
    }

    /// First configured style under which `word` splits into correct parts.
    ///
    /// Sub-words are checked only against the oracles, never against the
    /// user dictionary.
    pub fn learnable_style(&self, word: &str) -> Option<FormatStyle> {
        self.styles
            .iter()
            .copied()
            .find(|&style| self.split_is_correct(&split(word, style)))
    }

    /// Classify one word.
    pub fn classify<K: KnownWords + ?Sized>(&self, word: &str, known: &K) -> Verdict {
        let verdict = if known.is_known(word) {
            Verdict::Known
        } else if self.is_correct(word) {
            Verdict::Correct
        } else if let Some(style) = self.learnable_style(word) {
            Verdict::Learnable(style)
        } else {
            Verdict::Misspelled
        };
        debug!(word, ?verdict, "classified word");
        verdict
    }
}
