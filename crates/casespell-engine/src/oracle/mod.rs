// Word correctness oracles
//
// An oracle answers one question: is this exact word form correct in its
// language? The decision engine consults every loaded oracle and accepts a
// word if any of them does.

pub mod hunspell;
pub mod wordlist;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tracing::{error, info};

pub use hunspell::HunspellOracle;
pub use wordlist::WordListOracle;

/// Language codes that word lists can be loaded for.
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "fr", "de", "uk", "ru"];


/// A source of truth for whether a word is spelled correctly.
pub trait CorrectnessOracle: Send + Sync {
    /// Language code of the word list behind this oracle.
    fn language(&self) -> &str;

    /// Whether `word` is correct as written.
    fn is_correct(&self, word: &str) -> bool;
}

/// Error type for loading an oracle.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("unsupported dictionary language: {0}")]
    UnsupportedLanguage(String),

    #[error("no word list for '{language}' in {}", .dir.display())]
    MissingWordList { language: String, dir: PathBuf },

    #[error("hunspell dictionary for '{language}' has no affix file {}", .path.display())]
    MissingAffix { language: String, path: PathBuf },

    #[error("failed to parse dictionary {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("failed to read word list {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

// ---------------------------------------------------------------------------
// OracleSet
// ---------------------------------------------------------------------------

/// The oracles currently in use. An empty set accepts nothing on its own;
/// callers decide what an empty set means.
#[derive(Clone, Default)]
pub struct OracleSet {
    oracles: Vec<Arc<dyn CorrectnessOracle>>,
}

impl OracleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, oracle: Arc<dyn CorrectnessOracle>) {
        self.oracles.push(oracle);
    }

    pub fn len(&self) -> usize {
        self.oracles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.oracles.is_empty()
    }

    /// Language codes of the loaded oracles, in load order.
    pub fn languages(&self) -> Vec<&str> {
        self.oracles.iter().map(|o| o.language()).collect()
    }

    /// Whether at least one oracle accepts `word`.
    pub fn any_correct(&self, word: &str) -> bool {
        self.oracles.iter().any(|o| o.is_correct(word))
    }
}

impl FromIterator<Arc<dyn CorrectnessOracle>> for OracleSet {
    fn from_iter<I: IntoIterator<Item = Arc<dyn CorrectnessOracle>>>(iter: I) -> Self {
        Self {
            oracles: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for OracleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OracleSet")
            .field("languages", &self.languages())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Where the word list for one language comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordListSource {
    /// `<lang>.aff` with its `<lang>.dic`.
    Hunspell { aff: PathBuf, dic: PathBuf },
    /// `<lang>.txt`, one correct form per line.
    Plain(PathBuf),
}

async fn is_file(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|meta| meta.is_file())
}

/// Locate the word list for `language` under `dir`.
///
/// A `.aff`/`.dic` pair wins over a `.txt` list. A `.dic` whose `.aff` is
/// missing is only an error when there is no `.txt` to fall back on.
pub async fn word_list_source(dir: &Path, language: &str) -> Result<WordListSource, OracleError> {
    if !SUPPORTED_LANGUAGES.contains(&language) {
        return Err(OracleError::UnsupportedLanguage(language.to_string()));
    }

    let aff = dir.join(format!("{language}.aff"));
    let dic = dir.join(format!("{language}.dic"));
    let txt = dir.join(format!("{language}.txt"));

    let has_dic = is_file(&dic).await;
    if has_dic && is_file(&aff).await {
        return Ok(WordListSource::Hunspell { aff, dic });
    }
    if is_file(&txt).await {
        return Ok(WordListSource::Plain(txt));
    }
    if has_dic {
        return Err(OracleError::MissingAffix {
            language: language.to_string(),
            path: aff,
        });
    }
    Err(OracleError::MissingWordList {
        language: language.to_string(),
        dir: dir.to_path_buf(),
    })
}

/// Load the oracle for one language from `dir`.
pub async fn load_oracle(dir: &Path, language: &str) -> Result<Arc<dyn CorrectnessOracle>, OracleError> {
    match word_list_source(dir, language).await? {
        WordListSource::Hunspell { aff, dic } => {
            let oracle = HunspellOracle::load(language, &aff, &dic).await?;
            info!(language, path = %dic.display(), "loaded hunspell dictionary");
            Ok(Arc::new(oracle))
        }
        WordListSource::Plain(path) => {
            let oracle = WordListOracle::load(language, &path).await?;
            info!(language, path = %path.display(), words = oracle.len(), "loaded word list");
            Ok(Arc::new(oracle))
        }
    }
}

/// Load an oracle for each of `languages` from `dir`.
///
/// A language that fails to load is logged and skipped; the others are still
/// returned.
pub async fn load_oracles<S: AsRef<str>>(dir: &Path, languages: &[S]) -> OracleSet {
    let mut set = OracleSet::new();
    for language in languages {
        let language = language.as_ref();
        match load_oracle(dir, language).await {
            Ok(oracle) => set.push(oracle),
            Err(e) => error!(language, error = %e, "failed to load word list, skipping"),
        }
    }
    set
}
