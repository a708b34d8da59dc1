//! Convenience helpers shared across command handlers.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bingocard::{Card, CardProfile, CardRenderer, Corpus, ProfileRegistry, fill_with, load_fixed_grid};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::cli::common::{ProfileArgs, SourceArgs};

/// Resolve plain-text input from a file, or stdin when the path is `-`.
pub fn read_text_arg(from: &Path) -> Result<String> {
    if from.as_os_str() == "-" {
        return read_stdin();
    }
    fs::read_to_string(from).with_context(|| format!("failed to read {}", from.display()))
}

/// Read the entire stdin stream into memory.
pub fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read from stdin")?;
    Ok(buffer)
}

/// Persist bytes either to a file or stdout when `-` is provided.
pub fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    if path.as_os_str() == "-" {
        io::stdout().write_all(content)?;
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Load a corpus file, or read one from stdin for `-`.
pub fn load_corpus(path: &Path) -> Result<Corpus> {
    if path.as_os_str() == "-" {
        return Ok(Corpus::from_text(&read_stdin()?));
    }
    Corpus::load(path).with_context(|| format!("failed to load corpus {}", path.display()))
}

/// Pick the base profile and apply command-line overrides on top of it.
pub fn resolve_profile(args: &ProfileArgs) -> Result<CardProfile> {
    let mut profile = match &args.profile_file {
        Some(path) => CardProfile::load(path)?,
        None => ProfileRegistry::get(&args.profile)
            .with_context(|| format!("profile '{}' not found", args.profile))?,
    };
    if let Some(titles) = &args.titles {
        profile.column_titles = titles.split(',').map(|t| t.trim().to_string()).collect();
    }
    if let Some(style) = args.style {
        profile.style = style.into();
    }
    if let Some(pagesize) = args.pagesize {
        profile.page = pagesize.into();
    }
    if let Some(dpi) = args.dpi {
        profile.dpi = dpi.clamp(bingocard::MIN_DPI, bingocard::MAX_DPI);
    }
    override_path(&mut profile.cell_font, &args.cell_font);
    override_path(&mut profile.title_font, &args.title_font);
    override_path(&mut profile.emblem, &args.emblem);
    debug!(profile = %profile.name, dpi = profile.dpi, "resolved profile");
    Ok(profile)
}

fn override_path(slot: &mut Option<PathBuf>, value: &Option<PathBuf>) {
    if value.is_some() {
        slot.clone_from(value);
    }
}

/// Build the renderer a profile describes, with path context on failure.
pub fn build_renderer(profile: &CardProfile) -> Result<CardRenderer> {
    profile
        .renderer()
        .with_context(|| format!("failed to prepare renderer for profile '{}'", profile.name))
}

/// Generator for a run: seeded when asked, otherwise from OS entropy.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Produce the card a command should show: a fixed grid when given,
/// otherwise a fresh sample from the corpus.
pub fn produce_card(source: &SourceArgs, renderer: &CardRenderer) -> Result<Card> {
    if let Some(path) = &source.grid {
        let text = read_text_arg(path)?;
        return Ok(load_fixed_grid(&text, renderer.grid()));
    }
    let corpus_path = source
        .corpus
        .as_deref()
        .context("a corpus file is required unless --grid is given")?;
    let corpus = load_corpus(corpus_path)?;
    let mut rng = make_rng(source.seed);
    Ok(fill_with(&corpus, renderer.grid(), &mut rng))
}
