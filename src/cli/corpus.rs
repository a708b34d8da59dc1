//! Corpus maintenance commands (`bingo corpus ...`).

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use bingocard::{Corpus, join_continuations, split_case_boundaries};

use crate::cli::utils::{read_text_arg, write_output};

/// Corpus subcommands.
#[derive(Subcommand, Debug)]
pub enum CorpusCommand {
    /// Repair a scraped corpus so each entry sits on its own line.
    Clean(CleanArgs),
    /// Report entry counts for a corpus.
    Stats(StatsArgs),
}

/// Arguments for `bingo corpus clean`.
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Corpus file (`-` for stdin).
    pub file: PathBuf,
    /// Break lines where a lowercase letter runs into an uppercase one.
    #[arg(long = "split-case")]
    pub split_case: bool,
    /// Join lines starting in lowercase onto the previous line.
    #[arg(long = "join-continuations")]
    pub join_continuations: bool,
    /// Output file (`-` for stdout, the default).
    #[arg(short = 'o', long = "output", default_value = "-")]
    pub output: PathBuf,
}

/// Arguments for `bingo corpus stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Corpus file (`-` for stdin).
    pub file: PathBuf,
}

/// Execute a corpus command.
pub fn handle(command: CorpusCommand) -> Result<()> {
    match command {
        CorpusCommand::Clean(args) => clean(args),
        CorpusCommand::Stats(args) => stats(args),
    }
}

fn clean(args: CleanArgs) -> Result<()> {
    let mut text = read_text_arg(&args.file)?;
    if args.split_case {
        text = split_case_boundaries(&text);
    }
    if args.join_continuations {
        text = join_continuations(&text);
    }
    let corpus = Corpus::from_text(&text);
    let mut output = corpus.entries().join("\n");
    output.push('\n');
    write_output(&args.output, output.as_bytes())?;
    if args.output.as_os_str() != "-" {
        println!(
            "Wrote {} entries to {}",
            corpus.len(),
            args.output.display()
        );
    }
    Ok(())
}

fn stats(args: StatsArgs) -> Result<()> {
    let corpus = Corpus::from_text(&read_text_arg(&args.file)?);
    let mut distinct: Vec<&String> = corpus.entries().iter().collect();
    distinct.sort();
    distinct.dedup();
    println!("Entries:  {}", corpus.len());
    println!("Distinct: {}", distinct.len());
    Ok(())
}
