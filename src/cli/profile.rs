//! Profile discovery commands (`bingo profile ...`).

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use bingocard::ProfileRegistry;

/// Profile subcommands.
#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// List all built-in profiles.
    List,
    /// Print a built-in profile as JSON, ready to copy and edit.
    Show(ProfileShowArgs),
}

/// Arguments for `bingo profile show`.
#[derive(Args, Debug)]
pub struct ProfileShowArgs {
    /// Profile name to display.
    pub name: String,
}

/// Execute a profile command.
pub fn handle(command: ProfileCommand) -> Result<()> {
    match command {
        ProfileCommand::List => list(),
        ProfileCommand::Show(args) => show(args),
    }
}

fn list() -> Result<()> {
    println!("Available profiles:");
    for profile in ProfileRegistry::list() {
        println!("  - {}: {}", profile.name, profile.description);
    }
    Ok(())
}

fn show(args: ProfileShowArgs) -> Result<()> {
    let profile = ProfileRegistry::get(&args.name)
        .with_context(|| format!("profile '{}' not found", args.name))?;
    println!("{}", profile.to_json()?);
    Ok(())
}
