// Hunspell dictionary oracle

use std::fmt;
use std::path::Path;

use spellbook::Dictionary;

use crate::oracle::{CorrectnessOracle, OracleError};

/// An oracle backed by a hunspell `.aff`/`.dic` pair.
///
/// Affix rules and hunspell's own case handling apply, so `users` is correct
/// when the `.dic` lists `user/S` and the `.aff` defines suffix `S`.
pub struct HunspellOracle {
    language: String,
    dictionary: Dictionary,
}

impl HunspellOracle {
    /// Build an oracle from the text of an affix file and a dictionary file.
    pub fn new(language: impl Into<String>, aff: &str, dic: &str) -> Result<Self, String> {
        let dictionary = Dictionary::new(aff, dic).map_err(|e| e.to_string())?;
        Ok(Self {
            language: language.into(),
            dictionary,
        })
    }

    /// Read both files and compile the dictionary off the async runtime.
    pub async fn load(language: &str, aff_path: &Path, dic_path: &Path) -> Result<Self, OracleError> {
        let aff = read(aff_path).await?;
        let dic = read(dic_path).await?;

        let owned_language = language.to_string();
        tokio::task::spawn_blocking(move || Self::new(owned_language, &aff, &dic))
            .await
            .map_err(|e| e.to_string())
            .and_then(|result| result)
            .map_err(|message| OracleError::Parse {
                path: dic_path.to_path_buf(),
                message,
            })
    }
}

async fn read(path: &Path) -> Result<String, OracleError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| OracleError::Io {
            path: path.to_path_buf(),
            source,
        })
}

impl CorrectnessOracle for HunspellOracle {
    fn language(&self) -> &str {
        &self.language
    }

    fn is_correct(&self, word: &str) -> bool {
        !word.is_empty() && self.dictionary.check(word)
    }
}

impl fmt::Debug for HunspellOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HunspellOracle")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}
