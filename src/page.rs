//! Physical page geometry in layout units (1/72 inch).

use serde::{Deserialize, Serialize};

pub const UNITS_PER_INCH: f32 = 72.0;
pub const MIN_DPI: u32 = 72;
pub const MAX_DPI: u32 = 1200;

/// Axis-aligned rectangle in layout units, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Shrink by `amount` on every side, never below zero size.
    pub fn inset(&self, amount: f32) -> Self {
        Self {
            x: self.x + amount,
            y: self.y + amount,
            width: (self.width - 2.0 * amount).max(0.0),
            height: (self.height - 2.0 * amount).max(0.0),
        }
    }

    /// Largest frame with the given aspect ratio that fits inside, centered.
    pub fn fit_aspect(&self, width: f32, height: f32) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::new(self.x, self.y, 0.0, 0.0);
        }
        let scale = (self.width / width).min(self.height / height);
        let w = width * scale;
        let h = height * scale;
        Self {
            x: self.x + (self.width - w) / 2.0,
            y: self.y + (self.height - h) / 2.0,
            width: w,
            height: h,
        }
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Output surface dimensions plus the proportions used for the title band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
    /// Title band height as a multiple of the title font size.
    pub header_ratio: f32,
    /// Inner padding between the printable area and the card content.
    pub border: f32,
}

impl PageGeometry {
    /// US Letter portrait, 0.5" margins.
    pub fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margins: Margins::uniform(36.0),
            header_ratio: 1.1,
            border: 16.0,
        }
    }

    /// A4 portrait, 0.5" margins.
    pub fn a4() -> Self {
        Self {
            width: 595.0,
            height: 842.0,
            ..Self::letter()
        }
    }

    /// Borderless square surface for quick on-screen previews.
    pub fn screen(side: f32) -> Self {
        Self {
            width: side,
            height: side,
            margins: Margins::uniform(0.0),
            header_ratio: 1.0,
            border: 16.0,
        }
    }

    /// Page area inside the margins.
    pub fn printable(&self) -> Frame {
        Frame {
            x: self.margins.left,
            y: self.margins.top,
            width: (self.width - self.margins.left - self.margins.right).max(0.0),
            height: (self.height - self.margins.top - self.margins.bottom).max(0.0),
        }
    }

    /// Raster dimensions of the full page at `dpi` (clamped to a sane range).
    pub fn pixel_size(&self, dpi: u32) -> (u32, u32) {
        let scale = pixels_per_unit(dpi);
        (
            ((self.width * scale).round() as u32).max(1),
            ((self.height * scale).round() as u32).max(1),
        )
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}

pub fn pixels_per_unit(dpi: u32) -> f32 {
    dpi.clamp(MIN_DPI, MAX_DPI) as f32 / UNITS_PER_INCH
}
