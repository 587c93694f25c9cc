// casespell-add: Add words to the user dictionary.
//
// Prints one line per word:
//   A: word    (added)
//   K: word    (already known)

use std::io::{self, Write};

use anyhow::{Result, bail};
use clap::Parser;
use casespell_cli::{CommonArgs, init_logging, load_settings, open_session};
use casespell_engine::store::AddOutcome;
use tracing::error;

#[derive(Parser)]
#[command(name = "casespell-add", about = "Add words to the user dictionary")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Words to add, verbatim
    #[arg(required = true)]
    words: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli.common)?;
    init_logging(cli.common.verbose || settings.debug_mode);
    let session = open_session(settings, &cli.common).await?;

    let mut failed = 0;
    for word in &cli.words {
        match session.add_word(word).await {
            Ok(outcome) => {
                let tag = match outcome {
                    AddOutcome::Added => "A",
                    AddOutcome::AlreadyKnown => "K",
                };
                writeln!(io::stdout(), "{tag}: {word}")?;
            }
            Err(e) => {
                error!(word, error = %e, "could not add word");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} words could not be added", cli.words.len());
    }
    Ok(())
}
