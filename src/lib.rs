//! Core library for randomized bingo card generation and export.

mod corpus;
mod document;
mod error;
mod export;
mod fit;
mod grid;
mod image;
mod page;
mod profile;
mod sampler;

pub use corpus::{Corpus, join_continuations, split_case_boundaries};
pub use document::write_pdf;
pub use error::CardError;
pub use export::{
    ArtifactFormat, ArtifactNaming, ArtifactRecord, ArtifactSink, BatchJob, BatchManifest,
    BatchReport, CancelToken, DirectorySink, export_many, parse_count,
};
pub use fit::{
    BoxSize, FitParams, FitResult, TextMeasure, fit_text, measure_block, wrap_text,
};
pub use grid::{Card, DEFAULT_GRID_SIZE, GridGeometry, load_fixed_grid};
pub use crate::image::{Canvas, CardLayout, CardRenderer, CardStyle, Face, Surface};
pub use page::{Frame, MAX_DPI, MIN_DPI, Margins, PageGeometry, pixels_per_unit};
pub use profile::{CardProfile, DEFAULT_DPI, ProfileRegistry};
pub use sampler::{fill, fill_with};

/// Load a corpus from `path` and sample one card for `grid`.
pub fn generate_card(path: &std::path::Path, grid: &GridGeometry) -> Result<Card, CardError> {
    let corpus = Corpus::load(path)?;
    Ok(fill(&corpus, grid))
}
