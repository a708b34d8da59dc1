//! Batch export (`bingo batch`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use bingocard::{
    ArtifactFormat, ArtifactNaming, ArtifactSink, BatchJob, BatchManifest, CancelToken,
    DirectorySink, export_many, parse_count,
};

use crate::cli::common::{FormatArg, ProfileArgs};
use crate::cli::utils::{build_renderer, load_corpus, make_rng, resolve_profile};

/// Args for `bingo batch`.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Corpus file with one entry per line (`-` for stdin).
    #[arg(short = 'c', long = "corpus")]
    pub corpus: PathBuf,
    /// Number of cards to export.
    #[arg(short = 'n', long)]
    pub count: String,
    /// Output directory, created when missing.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Encoding for each card.
    #[arg(long, value_enum, default_value_t = FormatArg::Pdf)]
    pub format: FormatArg,
    /// File name prefix; defaults to the profile's base name.
    #[arg(long)]
    pub base: Option<String>,
    /// Seed the generator for a reproducible batch.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Skip writing `{base}_manifest.json`.
    #[arg(long = "no-manifest")]
    pub no_manifest: bool,
    #[command(flatten)]
    pub profile: ProfileArgs,
}

/// Execute `bingo batch`.
pub fn handle(args: BatchArgs) -> Result<()> {
    let count = parse_count(&args.count)?;
    let profile = resolve_profile(&args.profile)?;
    let renderer = build_renderer(&profile)?;
    let corpus = load_corpus(&args.corpus)?;

    let format: ArtifactFormat = args.format.into();
    let base = args.base.unwrap_or_else(|| profile.base_name.clone());
    let naming = ArtifactNaming::new(base, format.extension());
    let mut sink = DirectorySink::create(&args.output).with_context(|| {
        format!("failed to create output directory {}", args.output.display())
    })?;

    let job = BatchJob {
        corpus: &corpus,
        renderer: &renderer,
        naming: &naming,
        format,
        dpi: profile.dpi,
    };
    let mut rng = make_rng(args.seed);
    let report = export_many(&job, count, &mut rng, &mut sink, &CancelToken::new())?;

    if !args.no_manifest {
        let manifest = BatchManifest::new(report.clone(), count, format);
        let json = serde_json::to_string_pretty(&manifest)?;
        sink.write(&naming.manifest_name(), json.as_bytes())
            .with_context(|| format!("failed to write {}", naming.manifest_name()))?;
    }

    println!(
        "Exported {} card(s) to {} as {}_N.{}",
        report.written,
        sink.root().display(),
        naming.base(),
        format.extension()
    );
    Ok(())
}
