//! Shared clap helper types for CLI commands.

use std::path::PathBuf;

use bingocard::{ArtifactFormat, CardStyle, PageGeometry};
use clap::{Args, ValueEnum};

/// Color schemes accepted by `--style`.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum StyleArg {
    Classic,
    Ink,
    Cream,
}

impl From<StyleArg> for CardStyle {
    fn from(value: StyleArg) -> CardStyle {
        match value {
            StyleArg::Classic => CardStyle::Classic,
            StyleArg::Ink => CardStyle::Ink,
            StyleArg::Cream => CardStyle::Cream,
        }
    }
}

/// Artifact encodings for batch export.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum FormatArg {
    Pdf,
    Png,
}

impl From<FormatArg> for ArtifactFormat {
    fn from(value: FormatArg) -> ArtifactFormat {
        match value {
            FormatArg::Pdf => ArtifactFormat::Pdf,
            FormatArg::Png => ArtifactFormat::Png,
        }
    }
}

/// Output page layout options.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum PageLayoutArg {
    Letter,
    A4,
    /// Borderless 600x600 square, handy for on-screen previews.
    Screen,
}

impl From<PageLayoutArg> for PageGeometry {
    fn from(value: PageLayoutArg) -> PageGeometry {
        match value {
            PageLayoutArg::Letter => PageGeometry::letter(),
            PageLayoutArg::A4 => PageGeometry::a4(),
            PageLayoutArg::Screen => PageGeometry::screen(600.0),
        }
    }
}

/// Profile selection and per-run overrides shared by card-producing commands.
#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// Built-in profile name (see `bingo profile list`).
    #[arg(long, default_value = "oscar", conflicts_with = "profile_file")]
    pub profile: String,
    /// JSON profile file.
    #[arg(long = "profile-file")]
    pub profile_file: Option<PathBuf>,
    /// Comma-separated column titles, e.g. `B,I,N,G,O`.
    #[arg(long)]
    pub titles: Option<String>,
    /// Visual style applied to the card.
    #[arg(long, value_enum)]
    pub style: Option<StyleArg>,
    /// Output page layout.
    #[arg(long = "pagesize", value_enum)]
    pub pagesize: Option<PageLayoutArg>,
    /// Dots per inch used when rasterising.
    #[arg(long)]
    pub dpi: Option<u32>,
    /// TrueType/OpenType font for cell text.
    #[arg(long = "cell-font")]
    pub cell_font: Option<PathBuf>,
    /// TrueType/OpenType font for column titles.
    #[arg(long = "title-font")]
    pub title_font: Option<PathBuf>,
    /// Image drawn in reserved cells.
    #[arg(long)]
    pub emblem: Option<PathBuf>,
}

/// Where card contents come from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Corpus file with one entry per line (`-` for stdin).
    #[arg(short = 'c', long = "corpus", required_unless_present = "grid")]
    pub corpus: Option<PathBuf>,
    /// Comma-separated fixed grid file used instead of sampling.
    #[arg(long, conflicts_with = "seed")]
    pub grid: Option<PathBuf>,
    /// Seed the generator for reproducible cards.
    #[arg(long)]
    pub seed: Option<u64>,
}
