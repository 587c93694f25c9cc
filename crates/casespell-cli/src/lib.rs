// casespell-cli: shared utilities for the command-line tools.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use casespell_core::enums::FormatStyle;
use casespell_core::token::Token;
use casespell_engine::config::Settings;
use casespell_engine::oracle::load_oracles;
use casespell_engine::session::{ScanReport, SpellSession};
use tracing_subscriber::EnvFilter;

/// Application directory name under the platform config and data dirs.
const APP_DIR: &str = "casespell";

/// Settings file name within the config directory.
const SETTINGS_FILE: &str = "settings.json";

/// Word list directory name within the data directory.
const WORD_LIST_DIR: &str = "dictionaries";

/// Options shared by every tool that opens a dictionary.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CommonArgs {
    /// Settings file [default: <config dir>/casespell/settings.json]
    #[arg(long, env = "CASESPELL_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// User dictionary file, overriding `dictionaryPath` from the settings
    #[arg(short, long)]
    pub dictionary: Option<PathBuf>,

    /// Directory holding `<lang>.aff` + `<lang>.dic` pairs or `<lang>.txt` lists
    #[arg(long, env = "CASESPELL_ORACLE_DIR")]
    pub oracle_dir: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `debug` if `verbose`,
/// else `info`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Settings and session
// ---------------------------------------------------------------------------

/// Default settings file location.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
}

/// Resolve the word list directory.
///
/// Search order:
/// 1. `--oracle-dir` / `CASESPELL_ORACLE_DIR`
/// 2. `<data dir>/casespell/dictionaries`
/// 3. `./dictionaries`
pub fn oracle_dir(args: &CommonArgs) -> PathBuf {
    if let Some(dir) = &args.oracle_dir {
        return dir.clone();
    }
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join(WORD_LIST_DIR))
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from(WORD_LIST_DIR))
}

/// Load settings, apply command-line overrides and validate the result.
///
/// A missing settings file yields the defaults. An unset dictionary path
/// falls back to the platform default.
pub fn load_settings(args: &CommonArgs) -> Result<Settings> {
    let mut settings = match args.settings.clone().or_else(default_settings_path) {
        Some(path) => Settings::load_or_default(&path)?,
        None => Settings::default(),
    };
    if let Some(dictionary) = &args.dictionary {
        settings.dictionary_path = dictionary.to_string_lossy().into_owned();
    }
    settings.apply_default_dictionary_path();
    settings.validate()?;
    Ok(settings)
}

/// Load the configured word lists and open the dictionary.
pub async fn open_session(settings: Settings, args: &CommonArgs) -> Result<SpellSession> {
    let Some(dictionary) = settings.dictionary_path().map(Path::to_path_buf) else {
        bail!("dictionary path is not set; pass --dictionary or set dictionaryPath");
    };

    let dir = oracle_dir(args);
    let oracles = load_oracles(&dir, &settings.selected_dictionaries).await;
    tracing::debug!(dir = %dir.display(), languages = ?oracles.languages(), "oracles ready");

    let mut session = SpellSession::new(settings, oracles);
    session
        .set_dictionary_path(&dictionary)
        .await
        .with_context(|| format!("cannot use dictionary {}", dictionary.display()))?;
    Ok(session)
}

// ---------------------------------------------------------------------------
// Output formatting
// ---------------------------------------------------------------------------

/// `L: word` for each learned word, then `W: word` for each misspelled one.
pub fn report_lines(report: &ScanReport) -> Vec<String> {
    report
        .learned
        .iter()
        .map(|word| format!("L: {word}"))
        .chain(report.misspelled.iter().map(|word| format!("W: {word}")))
        .collect()
}

/// `word<TAB>style<TAB>part part ...`
pub fn split_line(word: &str, style: FormatStyle, parts: &[&str]) -> String {
    format!("{word}\t{style}\t{}", parts.join(" "))
}

/// `line:column word`, both one-based.
pub fn token_line(token: &Token<'_>) -> String {
    format!("{}:{} {}", token.line + 1, token.column + 1, token.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        common: CommonArgs,
    }

    #[test]
    fn common_args_parse() {
        let cli = TestCli::parse_from([
            "test",
            "-d",
            "/x/default.dic",
            "--oracle-dir",
            "/lists",
            "-v",
        ]);
        assert_eq!(cli.common.dictionary, Some(PathBuf::from("/x/default.dic")));
        assert_eq!(oracle_dir(&cli.common), PathBuf::from("/lists"));
        assert!(cli.common.verbose);
    }

    #[test]
    fn dictionary_flag_overrides_settings() {
        let dir = TempDir::new().unwrap();
        let settings_path = dir.path().join("settings.json");
        std::fs::write(
            &settings_path,
            r#"{"dictionaryPath": "/from/settings.txt", "refreshInterval": 5}"#,
        )
        .unwrap();

        let args = CommonArgs {
            settings: Some(settings_path.clone()),
            ..CommonArgs::default()
        };
        let settings = load_settings(&args).unwrap();
        assert_eq!(settings.dictionary_path(), Some(Path::new("/from/settings.txt")));
        assert_eq!(settings.refresh_interval, 5);

        let args = CommonArgs {
            settings: Some(settings_path),
            dictionary: Some(PathBuf::from("/from/flag.dic")),
            ..CommonArgs::default()
        };
        let settings = load_settings(&args).unwrap();
        assert_eq!(settings.dictionary_path(), Some(Path::new("/from/flag.dic")));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let dir = TempDir::new().unwrap();
        let settings_path = dir.path().join("settings.json");
        std::fs::write(&settings_path, r#"{"refreshInterval": 0}"#).unwrap();
        let args = CommonArgs {
            settings: Some(settings_path),
            dictionary: Some(PathBuf::from("/x/words.txt")),
            ..CommonArgs::default()
        };
        assert!(load_settings(&args).is_err());
    }

    #[tokio::test]
    async fn session_needs_a_usable_dictionary() {
        let dir = TempDir::new().unwrap();
        let args = CommonArgs {
            oracle_dir: Some(dir.path().to_path_buf()),
            ..CommonArgs::default()
        };
        let settings = Settings {
            dictionary_path: dir.path().join("missing.txt").to_string_lossy().into_owned(),
            ..Settings::default()
        };
        let err = open_session(settings, &args).await.unwrap_err();
        assert!(err.to_string().starts_with("cannot use dictionary"));

        let dict = dir.path().join("Custom Dictionary.txt");
        std::fs::write(&dict, "alpha\n").unwrap();
        let settings = Settings {
            dictionary_path: dict.to_string_lossy().into_owned(),
            ..Settings::default()
        };
        let session = open_session(settings, &args).await.unwrap();
        assert!(session.store().is_some_and(|store| store.contains("alpha")));
    }

    #[test]
    fn output_formats() {
        let report = ScanReport {
            learned: vec!["caseAware".to_string()],
            misspelled: vec!["qwzx".to_string()],
            ..ScanReport::default()
        };
        assert_eq!(report_lines(&report), vec!["L: caseAware", "W: qwzx"]);
        assert_eq!(
            split_line("getUserID", FormatStyle::CamelCase, &["get", "User", "ID"]),
            "getUserID\tcamelCase\tget User ID"
        );
        assert_eq!(token_line(&Token::new("word", 0, 4)), "1:5 word");
    }
}
