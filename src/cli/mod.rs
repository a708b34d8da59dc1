//! Command-line interface wiring for the `bingo` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! specialized submodules that encapsulate each command family.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod batch;
pub mod common;
pub mod corpus;
pub mod generate;
pub mod profile;
pub mod render;
pub mod utils;

/// Parsed CLI entrypoint for the `bingo` binary.
#[derive(Parser, Debug)]
#[command(name = "bingo", version, about = "Randomized bingo card generator")]
pub struct Cli {
    /// Log debug detail to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Top-level command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// High-level command families made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sample one card and print a text preview.
    Generate(generate::GenerateArgs),
    #[command(subcommand)]
    Render(render::RenderCommand),
    /// Export many independent cards into a directory.
    Batch(batch::BatchArgs),
    #[command(subcommand)]
    Corpus(corpus::CorpusCommand),
    #[command(subcommand)]
    Profile(profile::ProfileCommand),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate(args) => generate::handle(args),
        Command::Render(cmd) => render::handle(cmd),
        Command::Batch(args) => batch::handle(args),
        Command::Corpus(cmd) => corpus::handle(cmd),
        Command::Profile(cmd) => profile::handle(cmd),
    }
}
