// casespell-scan: Learn compound words from text files.
//
// Scans each file, adds every word that splits into correctly spelled parts
// to the user dictionary, and prints:
//   L: word    (learned)
//   W: word    (misspelled)
//
// With --watch the files are rescanned every `refreshInterval` seconds until
// Ctrl-C.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use casespell_cli::{CommonArgs, init_logging, load_settings, open_session, report_lines};
use casespell_engine::session::SpellSession;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "casespell-scan", about = "Learn case-aware compound words from text files")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Rescan the files every refresh interval until interrupted
    #[arg(long)]
    watch: bool,

    /// Files to scan; only allowed extensions are considered
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

async fn scan_files(session: &SpellSession, files: &[PathBuf]) -> Result<()> {
    for path in files {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) => {
                error!(path = %path.display(), error = %e, "cannot read file, skipping");
                continue;
            }
        };
        let report = session.scan_text(&text).await?;
        info!(
            path = %path.display(),
            words = report.words,
            learned = report.learned.len(),
            failed = report.failed.len(),
            "scanned file"
        );

        let mut out = io::stdout().lock();
        for line in report_lines(&report) {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli.common)?;
    init_logging(cli.common.verbose || settings.debug_mode);

    let files: Vec<PathBuf> = cli
        .files
        .into_iter()
        .filter(|path| {
            let allowed = settings.allows(path);
            if !allowed {
                warn!(path = %path.display(), "extension not allowed, skipping");
            }
            allowed
        })
        .collect();
    if files.is_empty() {
        bail!(
            "no file has an allowed extension ({})",
            settings.allowed_extensions
        );
    }

    let interval = settings.refresh_interval();
    let session = open_session(settings, &cli.common).await?;
    scan_files(&session, &files).await?;

    if !cli.watch {
        return Ok(());
    }

    info!(seconds = interval.as_secs(), "watching for changes");
    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = session.reload_dictionary().await {
                    error!(error = %e, "failed to reload dictionary");
                }
                scan_files(&session, &files).await?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, stopping");
                break;
            }
        }
    }
    Ok(())
}
