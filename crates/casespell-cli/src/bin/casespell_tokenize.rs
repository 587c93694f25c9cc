// casespell-tokenize: Extract candidate words from text.
//
// Reads text from stdin and prints one word per line as
//   line:column word
// with one-based line and column numbers.

use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use casespell_cli::token_line;
use casespell_engine::tokenizer::tokenize;
use clap::Parser;

#[derive(Parser)]
#[command(name = "casespell-tokenize", about = "Extract candidate words from stdin")]
struct Cli {
    /// Print only the number of words
    #[arg(short, long)]
    count: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if cli.count {
        writeln!(out, "{}", tokenize(&input).count())?;
    } else {
        for token in tokenize(&input) {
            writeln!(out, "{}", token_line(&token))?;
        }
    }
    out.flush()?;
    Ok(())
}
