// casespell-split: Split identifiers by naming convention.
//
// Reads words from stdin (one per line) and prints, for each style that
// splits the word:
//   word<TAB>style<TAB>part part ...
// Words no style splits are printed as `word<TAB>-<TAB>word`.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use casespell_cli::split_line;
use casespell_core::enums::FormatStyle;
use casespell_engine::splitter::split;
use clap::Parser;

#[derive(Parser)]
#[command(name = "casespell-split", about = "Split identifiers by naming convention")]
struct Cli {
    /// Style to apply; repeat for several [default: camelCase, PascalCase]
    #[arg(short, long = "style")]
    styles: Vec<FormatStyle>,

    /// Apply every known style
    #[arg(long, conflicts_with = "styles")]
    all: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let styles = if cli.all {
        FormatStyle::ALL.to_vec()
    } else if cli.styles.is_empty() {
        vec![FormatStyle::CamelCase, FormatStyle::PascalCase]
    } else {
        cli.styles
    };

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in io::stdin().lock().lines() {
        let line = line?;
        let word = line.trim();
        if word.is_empty() {
            continue;
        }

        let mut any = false;
        for &style in &styles {
            let parts = split(word, style);
            if parts.len() > 1 {
                writeln!(out, "{}", split_line(word, style, &parts))?;
                any = true;
            }
        }
        if !any {
            writeln!(out, "{word}\t-\t{word}")?;
        }
    }
    out.flush()?;
    Ok(())
}
