//! Batch export: sample, render and persist many independent cards.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::corpus::Corpus;
use crate::error::CardError;
use crate::image::CardRenderer;
use crate::sampler::fill_with;

/// Encoding used for each exported card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    #[default]
    Pdf,
    Png,
}

impl ArtifactFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ArtifactFormat::Pdf => "pdf",
            ArtifactFormat::Png => "png",
        }
    }
}

/// Artifact names of the form `{base}_{index}.{ext}` with 1-based, unpadded indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNaming {
    base: String,
    extension: String,
}

impl ArtifactNaming {
    pub fn new(base: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            extension: extension.into(),
        }
    }

    pub fn name(&self, index: usize) -> String {
        format!("{}_{}.{}", self.base, index, self.extension)
    }

    pub fn manifest_name(&self) -> String {
        format!("{}_manifest.json", self.base)
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

/// Destination for exported artifacts.
pub trait ArtifactSink {
    fn write(&mut self, name: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Writes artifacts as files inside a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    /// Use `root` as the output directory, creating it if needed.
    pub fn create(root: &Path) -> io::Result<Self> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactSink for DirectorySink {
    fn write(&mut self, name: &str, bytes: &[u8]) -> io::Result<()> {
        fs::write(self.root.join(name), bytes)
    }
}

/// Cooperative cancellation flag checked between batch iterations.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Everything a batch needs apart from the generator and the sink.
#[derive(Debug, Clone, Copy)]
pub struct BatchJob<'a> {
    pub corpus: &'a Corpus,
    pub renderer: &'a CardRenderer,
    pub naming: &'a ArtifactNaming,
    pub format: ArtifactFormat,
    pub dpi: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub name: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub written: usize,
    pub cancelled: bool,
    pub artifacts: Vec<ArtifactRecord>,
}

/// Summary persisted next to a finished batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchManifest {
    pub generated_at: DateTime<Utc>,
    pub requested: usize,
    pub format: ArtifactFormat,
    #[serde(flatten)]
    pub report: BatchReport,
}

impl BatchManifest {
    pub fn new(report: BatchReport, requested: usize, format: ArtifactFormat) -> Self {
        Self {
            generated_at: Utc::now(),
            requested,
            format,
            report,
        }
    }
}

/// Validate a user-supplied batch size. Anything but a positive integer is
/// rejected with [`CardError::InvalidCount`].
pub fn parse_count(raw: &str) -> Result<usize, CardError> {
    match raw.trim().parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(CardError::InvalidCount(raw.to_string())),
    }
}

/// Export `count` independently sampled cards through `sink`.
///
/// Stops at the first write failure with [`CardError::WriteFailure`];
/// artifacts already written are left in place. A cancelled token ends the
/// batch cleanly before the next card is started.
pub fn export_many<R, S>(
    job: &BatchJob<'_>,
    count: usize,
    rng: &mut R,
    sink: &mut S,
    cancel: &CancelToken,
) -> Result<BatchReport, CardError>
where
    R: Rng,
    S: ArtifactSink + ?Sized,
{
    if count == 0 {
        return Err(CardError::InvalidCount(count.to_string()));
    }

    let mut report = BatchReport::default();
    for index in 1..=count {
        if cancel.is_cancelled() {
            info!(written = report.written, requested = count, "batch cancelled");
            report.cancelled = true;
            break;
        }

        let card = fill_with(job.corpus, job.renderer.grid(), rng);
        let bytes = match job.format {
            ArtifactFormat::Pdf => job.renderer.render_pdf(&card, job.dpi)?,
            ArtifactFormat::Png => job.renderer.render_png(&card, job.dpi)?,
        };
        let name = job.naming.name(index);
        if let Err(source) = sink.write(&name, &bytes) {
            warn!(%name, written = report.written, error = %source, "batch aborted");
            return Err(CardError::WriteFailure {
                name,
                written: report.written,
                source,
            });
        }

        info!(%name, bytes = bytes.len(), "wrote card");
        report.artifacts.push(ArtifactRecord {
            sha256: hex_digest(&bytes),
            name,
        });
        report.written += 1;
    }
    Ok(report)
}

fn hex_digest(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
