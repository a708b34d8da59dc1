//! Rendering commands (`bingo render ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::cli::common::{ProfileArgs, SourceArgs};
use crate::cli::utils::{build_renderer, produce_card, resolve_profile, write_output};

/// Available render subcommands.
#[derive(Subcommand, Debug)]
pub enum RenderCommand {
    /// Render one card as a PNG image.
    Png(RenderArgs),
    /// Render one card as a single-page PDF.
    Pdf(RenderArgs),
}

/// Args shared by `bingo render png` and `bingo render pdf`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[command(flatten)]
    pub profile: ProfileArgs,
    /// Output file (`-` for stdout).
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

/// Execute a render command.
pub fn handle(command: RenderCommand) -> Result<()> {
    match command {
        RenderCommand::Png(args) => render(args, Kind::Png),
        RenderCommand::Pdf(args) => render(args, Kind::Pdf),
    }
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Png,
    Pdf,
}

fn render(args: RenderArgs, kind: Kind) -> Result<()> {
    let profile = resolve_profile(&args.profile)?;
    let renderer = build_renderer(&profile)?;
    let card = produce_card(&args.source, &renderer)?;
    let bytes = match kind {
        Kind::Png => renderer.render_png(&card, profile.dpi),
        Kind::Pdf => renderer.render_pdf(&card, profile.dpi),
    }
    .context("failed to render card")?;
    write_output(&args.output, &bytes)?;
    if args.output.as_os_str() != "-" {
        println!(
            "Rendered card to {} at {} DPI",
            args.output.display(),
            profile.dpi
        );
    }
    Ok(())
}
