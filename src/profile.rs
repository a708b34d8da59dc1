use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CardError;
use crate::grid::GridGeometry;
use crate::image::{CardRenderer, CardStyle, Face};
use crate::page::PageGeometry;

pub const DEFAULT_DPI: u32 = 150;

/// Everything needed to turn a card into a page: titles, grid shape, page
/// size, look and output naming. Stored as JSON; missing fields take the
/// defaults of the `oscar` profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardProfile {
    pub name: String,
    pub description: String,
    pub column_titles: Vec<String>,
    pub grid: GridGeometry,
    pub page: PageGeometry,
    pub style: CardStyle,
    /// Base for batch artifact names (`{base_name}_{n}.pdf`).
    pub base_name: String,
    pub dpi: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_font: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_font: Option<PathBuf>,
    /// Image for reserved cells; the built-in star badge when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emblem: Option<PathBuf>,
}

impl Default for CardProfile {
    fn default() -> Self {
        Self {
            name: "oscar".to_string(),
            description: "Awards-night card: O S C A R columns, star in the middle.".to_string(),
            column_titles: titles(&["O", "S", "C", "A", "R"]),
            grid: GridGeometry::default(),
            page: PageGeometry::letter(),
            style: CardStyle::Classic,
            base_name: "OSCAR".to_string(),
            dpi: DEFAULT_DPI,
            cell_font: None,
            title_font: None,
            emblem: None,
        }
    }
}

impl CardProfile {
    /// Read a profile from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CardError> {
        let raw = fs::read_to_string(path).map_err(|err| CardError::Profile {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        let profile: CardProfile = serde_json::from_str(&raw).map_err(|err| CardError::Profile {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        debug!(path = %path.display(), name = %profile.name, "loaded profile");
        Ok(profile)
    }

    pub fn to_json(&self) -> Result<String, CardError> {
        serde_json::to_string_pretty(self).map_err(|err| CardError::Encode(err.to_string()))
    }

    /// Build a renderer, loading any fonts and emblem the profile names.
    pub fn renderer(&self) -> Result<CardRenderer, CardError> {
        let cell_face = match &self.cell_font {
            Some(path) => Face::load(path)?,
            None => Face::Block,
        };
        let title_face = match &self.title_font {
            Some(path) => Face::load(path)?,
            None => cell_face.clone(),
        };
        let mut renderer = CardRenderer::new(self.grid.clone(), self.page)
            .with_titles(self.column_titles.iter().cloned())
            .with_style(self.style)
            .with_faces(cell_face, title_face);
        if let Some(path) = &self.emblem {
            let emblem = image::open(path).map_err(|source| CardError::Image {
                path: path.clone(),
                source,
            })?;
            renderer = renderer.with_emblem(emblem.to_rgba8());
        }
        Ok(renderer)
    }
}

fn titles(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Built-in profiles selectable by name.
pub struct ProfileRegistry;

impl ProfileRegistry {
    pub fn list() -> Vec<CardProfile> {
        vec![oscar(), bingo(), mini()]
    }

    /// Resolve a profile by name (case-insensitive).
    pub fn get(name: &str) -> Result<CardProfile, CardError> {
        Self::list()
            .into_iter()
            .find(|profile| profile.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| CardError::Profile {
                path: PathBuf::from(name),
                reason: format!(
                    "unknown profile; available: {}",
                    Self::list()
                        .iter()
                        .map(|p| p.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })
    }
}

fn oscar() -> CardProfile {
    CardProfile::default()
}

fn bingo() -> CardProfile {
    CardProfile {
        name: "bingo".to_string(),
        description: "Classic B I N G O layout with a free center square.".to_string(),
        column_titles: titles(&["B", "I", "N", "G", "O"]),
        base_name: "BINGO".to_string(),
        ..CardProfile::default()
    }
}

fn mini() -> CardProfile {
    CardProfile {
        name: "mini".to_string(),
        description: "3x3 quick-play card on a borderless square page.".to_string(),
        column_titles: titles(&["1", "2", "3"]),
        grid: GridGeometry::centered(3, 3).unwrap_or_default(),
        page: PageGeometry::screen(600.0),
        base_name: "MINI".to_string(),
        ..CardProfile::default()
    }
}
