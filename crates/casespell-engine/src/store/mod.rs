// Synchronized user dictionary store
//
// One `DictionaryStore` owns one dictionary file. All file reads that feed a
// rewrite, and all rewrites, run one at a time through a FIFO lock. The
// in-memory cache is only extended after a write has succeeded.

pub mod dictionary;
pub mod encoding;
pub mod synced;

use std::io;
use std::path::{Path, PathBuf};

pub use dictionary::{AddOutcome, CHECKSUM_PREFIX, DictionaryCache, DictionaryStore};
pub use encoding::TextEncoding;
pub use synced::{FileLockGuard, SyncedFile};

/// Error type for dictionary file operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The dictionary file does not exist.
    #[error("dictionary file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The process may not read or replace the dictionary file.
    #[error("permission denied for dictionary file: {}", .path.display())]
    PermissionDenied { path: PathBuf },

    /// The file content is not valid in the store's text encoding.
    #[error("dictionary file {} is not valid {encoding}", .path.display())]
    Encoding {
        path: PathBuf,
        encoding: TextEncoding,
    },

    /// Any other I/O failure.
    #[error("I/O error on dictionary file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The word cannot be stored as a single dictionary line.
    #[error("invalid dictionary word: {0:?}")]
    InvalidWord(String),
}

impl StoreError {
    /// Classify an I/O error raised while working on `path`.
    pub(crate) fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound { path },
            io::ErrorKind::PermissionDenied => StoreError::PermissionDenied { path },
            _ => StoreError::Io { path, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_are_classified_by_kind() {
        let path = Path::new("/tmp/words.txt");
        assert!(matches!(
            StoreError::from_io(path, io::Error::from(io::ErrorKind::NotFound)),
            StoreError::NotFound { .. }
        ));
        assert!(matches!(
            StoreError::from_io(path, io::Error::from(io::ErrorKind::PermissionDenied)),
            StoreError::PermissionDenied { .. }
        ));
        assert!(matches!(
            StoreError::from_io(path, io::Error::other("disk on fire")),
            StoreError::Io { .. }
        ));
    }

    #[test]
    fn error_messages_name_the_file() {
        let err = StoreError::Encoding {
            path: PathBuf::from("default.dic"),
            encoding: TextEncoding::Utf16Le,
        };
        assert_eq!(err.to_string(), "dictionary file default.dic is not valid UTF-16LE");
    }
}
