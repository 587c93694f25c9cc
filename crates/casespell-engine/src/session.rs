// Spellcheck session: settings, oracles and the active dictionary store

use std::path::Path;
use std::sync::Arc;

use casespell_core::enums::{FormatStyle, Verdict};
use hashbrown::HashSet;
use tracing::{debug, error, info, warn};

use crate::config::{ConfigError, Settings, validate_dictionary_path};
use crate::decision::DecisionEngine;
use crate::oracle::OracleSet;
use crate::store::{AddOutcome, DictionaryStore, StoreError, TextEncoding};
use crate::tokenizer::tokenize;

/// Error type for session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no dictionary is open")]
    NoDictionary,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Tally of one scan.
///
/// The counters are per token and always satisfy
/// `words == known + correct + learnable + flagged`. The word lists hold
/// distinct words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Number of word tokens seen.
    pub words: usize,
    /// Tokens found in the user dictionary.
    pub known: usize,
    /// Tokens accepted by an oracle.
    pub correct: usize,
    /// Tokens judged learnable, repeats included.
    pub learnable: usize,
    /// Misspelled tokens, repeats included.
    pub flagged: usize,
    /// Words added to the dictionary, in discovery order.
    pub learned: Vec<String>,
    /// Distinct misspelled words, in discovery order.
    pub misspelled: Vec<String>,
    /// Learnable words whose addition failed.
    pub failed: Vec<String>,
}

/// Everything needed to check text and learn compound words.
///
/// The dictionary store is shared behind an `Arc`: replacing it does not
/// disturb a scan that is still using the previous one.
#[derive(Debug)]
pub struct SpellSession {
    settings: Settings,
    oracles: OracleSet,
    store: Option<Arc<DictionaryStore>>,
    encoding: TextEncoding,
}

impl SpellSession {
    /// A session without a dictionary; call
    /// [`set_dictionary_path`](Self::set_dictionary_path) to open one.
    pub fn new(settings: Settings, oracles: OracleSet) -> Self {
        Self {
            settings,
            oracles,
            store: None,
            encoding: TextEncoding::for_platform(),
        }
    }

    /// Use `encoding` instead of the platform encoding for dictionaries
    /// opened from now on.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn oracles(&self) -> &OracleSet {
        &self.oracles
    }

    pub fn store(&self) -> Option<&Arc<DictionaryStore>> {
        self.store.as_ref()
    }

    /// Validate `path`, open it and make it the active dictionary.
    ///
    /// On any error the previously active dictionary stays in place.
    pub async fn set_dictionary_path(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        validate_dictionary_path(path).await?;
        let store = DictionaryStore::open_with_encoding(path, self.encoding).await?;

        info!(path = %path.display(), words = store.len(), "dictionary is now active");
        self.store = Some(Arc::new(store));
        self.settings.dictionary_path = path.to_string_lossy().into_owned();
        Ok(())
    }

    /// Re-read the active dictionary from disk.
    pub async fn reload_dictionary(&self) -> Result<usize, SessionError> {
        let store = self.store.as_ref().ok_or(SessionError::NoDictionary)?;
        Ok(store.reload().await?)
    }

    pub fn set_oracles(&mut self, oracles: OracleSet) {
        info!(languages = ?oracles.languages(), "oracles replaced");
        self.oracles = oracles;
    }

    pub fn set_format_styles(&mut self, styles: Vec<FormatStyle>) {
        debug!(?styles, "format styles replaced");
        self.settings.format_styles = styles;
    }

    fn engine(&self) -> DecisionEngine<'_> {
        DecisionEngine::new(&self.oracles, &self.settings.format_styles)
    }

    /// Classify one word against the active dictionary and the oracles.
    pub fn classify(&self, word: &str) -> Verdict {
        self.engine().classify(word, &self.store.as_deref())
    }

    /// Check every word of `text` and add learnable words to the dictionary.
    ///
    /// Each distinct learnable word is submitted at most once per scan; a
    /// repeat is still counted in [`ScanReport::learnable`]. A failed
    /// addition is logged and recorded and the scan goes on.
    pub async fn scan_text(&self, text: &str) -> Result<ScanReport, SessionError> {
        let store = Arc::clone(self.store.as_ref().ok_or(SessionError::NoDictionary)?);
        if self.oracles.is_empty() {
            warn!("no oracles loaded, every word is treated as correct");
        }

        let engine = self.engine();
        let mut report = ScanReport::default();
        let mut submitted: HashSet<&str> = HashSet::new();
        let mut reported: HashSet<&str> = HashSet::new();

        for token in tokenize(text) {
            report.words += 1;
            match engine.classify(token.text, &*store) {
                Verdict::Known => report.known += 1,
                Verdict::Correct => report.correct += 1,
                Verdict::Misspelled => {
                    report.flagged += 1;
                    if reported.insert(token.text) {
                        report.misspelled.push(token.text.to_string());
                    }
                }
                Verdict::Learnable(style) => {
                    report.learnable += 1;
                    if !submitted.insert(token.text) {
                        continue;
                    }
                    debug!(word = token.text, %style, line = token.line, "learning word");
                    match store.add_word(token.text).await {
                        Ok(AddOutcome::Added) => report.learned.push(token.text.to_string()),
                        Ok(AddOutcome::AlreadyKnown) => {}
                        Err(e) => {
                            error!(word = token.text, error = %e, "failed to add word to dictionary");
                            report.failed.push(token.text.to_string());
                        }
                    }
                }
            }
        }

        info!(
            words = report.words,
            learned = report.learned.len(),
            misspelled = report.misspelled.len(),
            "scan finished"
        );
        Ok(report)
    }

    /// Add `word` to the active dictionary regardless of its verdict.
    pub async fn add_word(&self, word: &str) -> Result<AddOutcome, SessionError> {
        let store = self.store.as_ref().ok_or(SessionError::NoDictionary)?;
        Ok(store.add_word(word).await?)
    }

    /// Close the active dictionary. Scans still holding it finish normally.
    pub fn teardown(&mut self) -> Option<Arc<DictionaryStore>> {
        let store = self.store.take();
        if let Some(store) = &store {
            info!(path = %store.path().display(), "dictionary closed");
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{CorrectnessOracle, WordListOracle};
    use tempfile::TempDir;

    fn oracles(words: &[&str]) -> OracleSet {
        [Arc::new(WordListOracle::new("en", words.iter().copied())) as Arc<dyn CorrectnessOracle>]
            .into_iter()
            .collect()
    }

    fn dictionary(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    async fn session(dir: &TempDir, words: &[&str]) -> SpellSession {
        let path = dictionary(dir, "Custom Dictionary.txt", "checksum_v1 = xyz\n");
        let mut session = SpellSession::new(Settings::default(), oracles(words))
            .with_encoding(TextEncoding::Utf8);
        session.set_dictionary_path(&path).await.unwrap();
        session
    }

    #[tokio::test]
    async fn scan_learns_compound_words() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir, &["the", "case", "aware", "enhancer"]).await;

        let report = session
            .scan_text("the caseAware enhancer\ncaseAware caseawarenessx")
            .await
            .unwrap();
        assert_eq!(report.words, 5);
        assert_eq!(report.correct, 2);
        assert_eq!(report.learned, vec!["caseAware"]);
        assert_eq!(report.known, 1);
        assert_eq!(report.misspelled, vec!["caseawarenessx"]);
        assert!(report.failed.is_empty());
        assert_eq!((report.learnable, report.flagged), (1, 1));

        let store = session.store().unwrap();
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "caseAware\n");
        assert_eq!(session.classify("caseAware"), Verdict::Known);
    }

    #[tokio::test]
    async fn scan_without_oracles_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, &[]).await;
        session.set_oracles(OracleSet::new());

        let report = session.scan_text("caseAware qwzxBlorp").await.unwrap();
        assert_eq!(report.correct, 2);
        assert!(report.learned.is_empty());

        let store = session.store().unwrap();
        assert!(store.is_empty());
        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            "checksum_v1 = xyz\n"
        );
    }

    #[tokio::test]
    async fn scan_requires_a_dictionary() {
        let session = SpellSession::new(Settings::default(), oracles(&["a"]));
        assert!(matches!(
            session.scan_text("word").await,
            Err(SessionError::NoDictionary)
        ));
        assert!(matches!(
            session.add_word("word").await,
            Err(SessionError::NoDictionary)
        ));
    }

    #[tokio::test]
    async fn failed_addition_is_reported_and_scan_continues() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir, &["case", "aware", "user", "name"]).await;
        std::fs::remove_file(session.store().unwrap().path()).unwrap();

        let report = session
            .scan_text("caseAware userName caseAware")
            .await
            .unwrap();
        assert_eq!(report.words, 3);
        assert_eq!(report.learnable, 3);
        assert_eq!(report.failed, vec!["caseAware", "userName"]);
        assert!(report.learned.is_empty());
    }

    #[tokio::test]
    async fn every_token_is_counted_once() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir, &["case", "aware", "the"]).await;
        std::fs::remove_file(session.store().unwrap().path()).unwrap();

        let report = session
            .scan_text("the caseAware qwzx caseAware qwzx the")
            .await
            .unwrap();
        assert_eq!(report.words, 6);
        assert_eq!(
            report.known + report.correct + report.learnable + report.flagged,
            report.words
        );
        assert_eq!((report.correct, report.learnable, report.flagged), (2, 2, 2));
        assert_eq!(report.failed, vec!["caseAware"]);
        assert_eq!(report.misspelled, vec!["qwzx"]);
    }

    #[tokio::test]
    async fn format_styles_control_learning() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, &["user", "name"]).await;
        assert_eq!(session.classify("user_name"), Verdict::Misspelled);

        session.set_format_styles(vec![FormatStyle::SnakeCase]);
        assert_eq!(
            session.classify("user_name"),
            Verdict::Learnable(FormatStyle::SnakeCase)
        );
        assert_eq!(session.classify("userName"), Verdict::Misspelled);
    }

    #[tokio::test]
    async fn invalid_path_keeps_previous_store() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, &[]).await;
        let before = Arc::clone(session.store().unwrap());

        let err = session
            .set_dictionary_path(dir.path().join("words.json"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Config(ConfigError::UnsupportedExtension(_))
        ));
        let err = session
            .set_dictionary_path(dir.path().join("missing.dic"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Config(ConfigError::DictionaryNotWritable { .. })
        ));
        assert!(Arc::ptr_eq(&before, session.store().unwrap()));
        assert_eq!(session.settings().dictionary_path(), Some(before.path()));
    }

    #[tokio::test]
    async fn switching_dictionaries() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, &[]).await;
        let old = Arc::clone(session.store().unwrap());

        let other = dictionary(&dir, "default.dic", "alpha\n");
        session.set_dictionary_path(&other).await.unwrap();
        assert_eq!(session.store().unwrap().path(), other.as_path());
        assert_eq!(session.classify("alpha"), Verdict::Known);

        // The old store is still usable by whoever holds it.
        assert_eq!(old.add_word("beta").await.unwrap(), AddOutcome::Added);
        assert!(!session.store().unwrap().contains("beta"));
    }

    #[tokio::test]
    async fn manual_add_and_reload() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, &[]).await;
        assert_eq!(session.add_word("Zettelkasten").await.unwrap(), AddOutcome::Added);
        assert_eq!(
            session.add_word("Zettelkasten").await.unwrap(),
            AddOutcome::AlreadyKnown
        );

        let path = session.store().unwrap().path().to_path_buf();
        std::fs::write(&path, "one\ntwo\nthree\n").unwrap();
        assert_eq!(session.reload_dictionary().await.unwrap(), 3);

        assert!(session.teardown().is_some());
        assert!(session.store().is_none());
        assert!(matches!(
            session.reload_dictionary().await,
            Err(SessionError::NoDictionary)
        ));
    }
}
