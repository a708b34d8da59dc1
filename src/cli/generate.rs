//! Text preview of a single card (`bingo generate`).

use anyhow::Result;
use clap::Args;

use crate::cli::common::{ProfileArgs, SourceArgs};
use crate::cli::utils::{produce_card, resolve_profile};
use bingocard::CardRenderer;

/// Args for `bingo generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[command(flatten)]
    pub profile: ProfileArgs,
    /// Print the card as JSON rows instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Execute `bingo generate`.
pub fn handle(args: GenerateArgs) -> Result<()> {
    let profile = resolve_profile(&args.profile)?;
    // Fonts and emblems are irrelevant to a text preview.
    let renderer = CardRenderer::new(profile.grid.clone(), profile.page)
        .with_titles(profile.column_titles.iter().cloned());
    let card = produce_card(&args.source, &renderer)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(card.cells())?);
    } else {
        print!("{}", card.render_text(renderer.titles(), renderer.grid()));
    }
    Ok(())
}
