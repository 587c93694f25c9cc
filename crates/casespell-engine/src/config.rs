// Settings and dictionary path validation

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use casespell_core::enums::FormatStyle;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::store::StoreError;

/// Extensions accepted for the user dictionary file.
pub const DICTIONARY_EXTENSIONS: &[&str] = &["dic", "txt"];

/// Error type for settings and dictionary path problems.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("dictionary path is not set")]
    DictionaryPathUnset,

    #[error("dictionary file must end in .dic or .txt: {}", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error("dictionary file {} is not writable: {source}", .path.display())]
    DictionaryNotWritable {
        path: PathBuf,
        #[source]
        source: StoreError,
    },

    #[error("refresh interval must be at least one second")]
    InvalidInterval,

    #[error("failed to read settings {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write settings {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// User settings, stored as JSON with camelCase keys. Missing keys take
/// their defaults and unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Path of the user dictionary file; empty means unset.
    pub dictionary_path: String,
    /// Seconds between rescans in watch mode.
    pub refresh_interval: u64,
    /// Naming conventions tried, in order, when a word is not correct as is.
    pub format_styles: Vec<FormatStyle>,
    /// Language codes of the word lists to load.
    pub selected_dictionaries: Vec<String>,
    /// Comma separated file extensions eligible for scanning, e.g. `.md,.txt`.
    pub allowed_extensions: String,
    pub debug_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dictionary_path: String::new(),
            refresh_interval: 30,
            format_styles: vec![FormatStyle::CamelCase, FormatStyle::PascalCase],
            selected_dictionaries: vec!["en".to_string()],
            allowed_extensions: ".md,.txt".to_string(),
            debug_mode: false,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Read settings from `path`, or use the defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Write settings as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(write_err)
    }

    /// Check the values that can be checked without touching the file system.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        if let Some(path) = self.dictionary_path() {
            check_dictionary_extension(path)?;
        }
        Ok(())
    }

    /// The configured dictionary path, if set.
    pub fn dictionary_path(&self) -> Option<&Path> {
        let trimmed = self.dictionary_path.trim();
        (!trimmed.is_empty()).then(|| Path::new(trimmed))
    }

    /// Fill in the platform's default dictionary path if none is set.
    ///
    /// Returns `true` if the path was changed.
    pub fn apply_default_dictionary_path(&mut self) -> bool {
        if self.dictionary_path().is_some() {
            return false;
        }
        match default_dictionary_path() {
            Some(path) => {
                info!(path = %path.display(), "default dictionary path set");
                self.dictionary_path = path.to_string_lossy().into_owned();
                true
            }
            None => {
                warn!(
                    os = std::env::consts::OS,
                    "no default dictionary path for this platform, set it manually"
                );
                false
            }
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval)
    }

    /// Allowed extensions, trimmed and lowercased, empty entries dropped.
    pub fn allowed_extensions(&self) -> Vec<String> {
        self.allowed_extensions
            .split(',')
            .map(|ext| ext.trim().to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect()
    }

    /// Whether a file at `path` is eligible for scanning.
    ///
    /// Entries match with or without their leading dot.
    pub fn allows(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let ext = ext.to_lowercase();
        self.allowed_extensions()
            .iter()
            .any(|allowed| allowed.trim_start_matches('.') == ext)
    }
}

// ---------------------------------------------------------------------------
// Dictionary path
// ---------------------------------------------------------------------------

/// Platform default location of the user dictionary.
///
/// Linux uses the editor's custom dictionary, Windows the system spelling
/// dictionary. Other platforms have no default.
pub fn default_dictionary_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    platform_dictionary_path(&home)
}

fn platform_dictionary_path(home: &Path) -> Option<PathBuf> {
    if cfg!(target_os = "linux") {
        Some(home.join(".config").join("obsidian").join("Custom Dictionary.txt"))
    } else if cfg!(windows) {
        Some(
            home.join("AppData")
                .join("Roaming")
                .join("Microsoft")
                .join("Spelling")
                .join("neutral")
                .join("default.dic"),
        )
    } else {
        None
    }
}

fn check_dictionary_extension(path: &Path) -> Result<(), ConfigError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext {
        Some(ext) if DICTIONARY_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(ConfigError::UnsupportedExtension(path.to_path_buf())),
    }
}

/// Check that `path` names an existing, writable `.dic` or `.txt` file.
///
/// The file is opened for writing without truncation; its content is not
/// changed.
pub async fn validate_dictionary_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::DictionaryPathUnset);
    }
    check_dictionary_extension(path)?;

    tokio::fs::OpenOptions::new()
        .write(true)
        .open(path)
        .await
        .map_err(|e| ConfigError::DictionaryNotWritable {
            path: path.to_path_buf(),
            source: StoreError::from_io(path, e),
        })?;
    debug!(path = %path.display(), "dictionary file is writable");
    Ok(())
}
