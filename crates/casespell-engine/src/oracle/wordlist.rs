// Plain word list oracle

use std::path::Path;

use casespell_core::case::{CaseType, detect_case, with_case};
use hashbrown::HashSet;

use crate::oracle::{CorrectnessOracle, OracleError};

/// An oracle backed by a list of correct word forms.
///
/// Lookup tolerates sentence and shouting case the way hunspell does: a
/// capitalized or all-uppercase word is also correct when its lowercase or
/// capitalized form is listed. Mixed-case words must match exactly.
#[derive(Debug, Clone)]
pub struct WordListOracle {
    language: String,
    words: HashSet<String>,
}

impl WordListOracle {
    pub fn new<I, S>(language: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            language: language.into(),
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a word list: one entry per line.
    ///
    /// A leading entry count, `/FLAGS` suffixes and tab-separated fields are
    /// dropped, so a bare `.dic` reads as a list too. Affix rules are never
    /// applied here; see [`HunspellOracle`](crate::oracle::HunspellOracle).
    pub fn parse(language: impl Into<String>, content: &str) -> Self {
        let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
        let mut lines = content.lines().peekable();
        if lines
            .peek()
            .is_some_and(|first| first.trim().parse::<usize>().is_ok())
        {
            lines.next();
        }

        let words = lines.filter_map(|line| {
            let entry = line.split('\t').next().unwrap_or(line);
            let word = entry.split('/').next().unwrap_or(entry).trim();
            (!word.is_empty()).then_some(word)
        });
        Self::new(language, words)
    }

    /// Read and parse the word list at `path`.
    pub async fn load(language: &str, path: &Path) -> Result<Self, OracleError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| OracleError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::parse(language, &content))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl CorrectnessOracle for WordListOracle {
    fn language(&self) -> &str {
        &self.language
    }

    fn is_correct(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        if self.words.contains(word) {
            return true;
        }
        match detect_case(word) {
            CaseType::FirstUpper => self.words.contains(&with_case(word, CaseType::AllLower)),
            CaseType::AllUpper => {
                self.words.contains(&with_case(word, CaseType::AllLower))
                    || self.words.contains(&with_case(word, CaseType::FirstUpper))
            }
            CaseType::AllLower | CaseType::Complex | CaseType::NoLetters => false,
        }
    }
}
