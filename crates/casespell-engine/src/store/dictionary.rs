// User dictionary: file contents, word cache and the add-word transaction

use std::path::{Path, PathBuf};

use hashbrown::HashSet;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::store::{StoreError, SyncedFile, TextEncoding};

/// Prefix of the metadata line owned by the dictionary's other consumer.
/// It is recomputed by that consumer, so every rewrite drops it.
pub const CHECKSUM_PREFIX: &str = "checksum_v1 = ";

const BOM: char = '\u{FEFF}';

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// The set of words currently in the dictionary file. Case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryCache {
    words: HashSet<String>,
}

impl DictionaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the cache from the dictionary file's text.
    ///
    /// Blank lines and the checksum line are skipped; a leading byte-order
    /// mark and trailing `\r` are not part of any word.
    pub fn from_content(content: &str) -> Self {
        let body = content.strip_prefix(BOM).unwrap_or(content);
        let words = body
            .split('\n')
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty() && !line.starts_with(CHECKSUM_PREFIX))
            .map(str::to_string)
            .collect();
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Returns `true` if the word was not present.
    pub fn insert(&mut self, word: impl Into<String>) -> bool {
        self.words.insert(word.into())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// File content rewrite
// ---------------------------------------------------------------------------

/// Return `content` with every checksum line removed and `word` appended as
/// its own line, unless a line already equals `word`.
///
/// Lines are split on `\n` with any trailing `\r` dropped, as in
/// [`DictionaryCache::from_content`]. The output uses `\r\n` if the file
/// contains one anywhere, else `\n`; a trailing newline and a leading
/// byte-order mark are preserved.
pub fn add_word_to_content(content: &str, word: &str) -> String {
    let (bom, body) = match content.strip_prefix(BOM) {
        Some(rest) => (Some(BOM), rest),
        None => (None, content),
    };
    let newline = if body.contains("\r\n") { "\r\n" } else { "\n" };

    let mut lines: Vec<&str> = if body.is_empty() {
        Vec::new()
    } else {
        body.split('\n').map(|line| line.trim_end_matches('\r')).collect()
    };
    let trailing_newline = lines.len() > 1 && lines.last() == Some(&"");
    if trailing_newline {
        lines.pop();
    }

    lines.retain(|line| !line.starts_with(CHECKSUM_PREFIX));
    if !lines.contains(&word) {
        lines.push(word);
    }

    let mut out = String::with_capacity(body.len() + word.len() + 2 * newline.len());
    out.extend(bom);
    out.push_str(&lines.join(newline));
    if trailing_newline {
        out.push_str(newline);
    }
    out
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Result of [`DictionaryStore::add_word`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The file was rewritten and the word cached.
    Added,
    /// The word was already cached; the file was not touched.
    AlreadyKnown,
}

/// One user dictionary file plus the cache of its words.
#[derive(Debug)]
pub struct DictionaryStore {
    file: SyncedFile,
    cache: RwLock<DictionaryCache>,
}

impl DictionaryStore {
    /// Open the dictionary at `path` with the platform encoding and load its
    /// words.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::open_with_encoding(path, TextEncoding::for_platform()).await
    }

    /// Open the dictionary at `path` with an explicit encoding.
    pub async fn open_with_encoding(
        path: impl Into<PathBuf>,
        encoding: TextEncoding,
    ) -> Result<Self, StoreError> {
        let store = Self {
            file: SyncedFile::with_encoding(path, encoding),
            cache: RwLock::new(DictionaryCache::new()),
        };
        store.reload().await?;
        Ok(store)
    }

    pub fn file(&self) -> &SyncedFile {
        &self.file
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Re-read the file and replace the cache wholesale.
    ///
    /// Returns the number of cached words.
    pub async fn reload(&self) -> Result<usize, StoreError> {
        self.file
            .with_lock(async {
                let content = self.file.read().await?;
                let cache = DictionaryCache::from_content(&content);
                let count = cache.len();
                *self.cache.write() = cache;
                info!(path = %self.path().display(), words = count, "loaded dictionary into cache");
                Ok::<_, StoreError>(count)
            })
            .await
    }

    /// Cache lookup; does not wait for the file lock.
    pub fn contains(&self, word: &str) -> bool {
        self.cache.read().contains(word)
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Sorted snapshot of the cached words.
    pub fn words(&self) -> Vec<String> {
        let mut words: Vec<String> = self.cache.read().iter().map(str::to_string).collect();
        words.sort_unstable();
        words
    }

    /// Snapshot of the cache.
    pub fn cache(&self) -> DictionaryCache {
        self.cache.read().clone()
    }

    /// Append `word` to the dictionary file unless it is already known.
    ///
    /// Membership is checked again after the lock is acquired, since another
    /// caller may have added the word in the meantime. The cache is extended
    /// only after the rewritten file has been stored.
    pub async fn add_word(&self, word: &str) -> Result<AddOutcome, StoreError> {
        if word.trim().is_empty() || word.contains(['\n', '\r']) {
            return Err(StoreError::InvalidWord(word.to_string()));
        }

        self.file
            .with_lock(async {
                let known = self.cache.read().contains(word);
                if known {
                    debug!(word, "word is already in the dictionary cache");
                    return Ok::<_, StoreError>(AddOutcome::AlreadyKnown);
                }

                let content = self.file.read().await?;
                let updated = add_word_to_content(&content, word);
                self.file.write(&updated).await?;

                self.cache.write().insert(word);
                info!(word, path = %self.path().display(), "added word to dictionary");
                Ok(AddOutcome::Added)
            })
            .await
    }
}
