//! Font faces used to measure and draw card text.

use std::fmt;
use std::fs;
use std::path::Path;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use super::glyphs::{GLYPH_COLUMNS, GLYPH_ROWS, block_glyph};
use crate::error::CardError;
use crate::fit::TextMeasure;

/// Glyph advance in block modules (glyph width plus one column gap).
const BLOCK_ADVANCE: f32 = (GLYPH_COLUMNS + 1) as f32;
/// Line pitch in block modules (glyph height plus two rows of leading).
const BLOCK_LINE: f32 = (GLYPH_ROWS + 2) as f32;

/// A text face. `Block` is the built-in 5x7 face and needs no font files;
/// `Outline` wraps a TrueType/OpenType font.
#[derive(Clone, Default)]
pub enum Face {
    #[default]
    Block,
    Outline(FontArc),
}

impl Face {
    /// Load a TTF/OTF font from disk.
    pub fn load(path: &Path) -> Result<Self, CardError> {
        let bytes = fs::read(path).map_err(|err| CardError::Font {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        FontArc::try_from_vec(bytes)
            .map(Face::Outline)
            .map_err(|err| CardError::Font {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })
    }

    /// Draw one line of text with its top-left corner at `(x, y)` pixels.
    pub(crate) fn draw(
        &self,
        image: &mut RgbaImage,
        x: f32,
        y: f32,
        text: &str,
        size_px: f32,
        color: Rgba<u8>,
    ) {
        match self {
            Face::Block => draw_block(image, x, y, text, size_px, color),
            Face::Outline(font) => draw_text_mut(
                image,
                color,
                x.round() as i32,
                y.round() as i32,
                PxScale::from(size_px),
                font,
                text,
            ),
        }
    }
}

impl fmt::Debug for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Block => write!(f, "Face::Block"),
            Face::Outline(_) => write!(f, "Face::Outline(..)"),
        }
    }
}

impl TextMeasure for Face {
    fn advance(&self, text: &str, size: f32) -> f32 {
        match self {
            Face::Block => text.chars().count() as f32 * BLOCK_ADVANCE * block_module(size),
            Face::Outline(font) => kerned_advance(font, text, size),
        }
    }

    fn line_height(&self, size: f32) -> f32 {
        match self {
            Face::Block => BLOCK_LINE * block_module(size),
            Face::Outline(font) => {
                let scaled = font.as_scaled(PxScale::from(size));
                scaled.height() + scaled.line_gap()
            }
        }
    }
}

/// Pen advance for `text`, including pair kerning the way `draw_text_mut`
/// lays glyphs out.
fn kerned_advance<F: Font>(font: &F, text: &str, size: f32) -> f32 {
    let scaled = font.as_scaled(PxScale::from(size));
    let mut width = 0.0;
    let mut previous = None;
    for ch in text.chars() {
        let id = font.glyph_id(ch);
        if let Some(prev) = previous {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        previous = Some(id);
    }
    width
}

/// Size of one glyph pixel; a block glyph is exactly `size` tall.
fn block_module(size: f32) -> f32 {
    size / GLYPH_ROWS as f32
}

fn draw_block(image: &mut RgbaImage, x: f32, y: f32, text: &str, size_px: f32, color: Rgba<u8>) {
    let module = block_module(size_px);
    let dot = module.ceil().max(1.0) as u32;
    for (idx, ch) in text.chars().enumerate() {
        let origin_x = x + idx as f32 * BLOCK_ADVANCE * module;
        for (row, bits) in block_glyph(ch).iter().enumerate() {
            for col in 0..GLYPH_COLUMNS {
                if bits & (1 << (GLYPH_COLUMNS - 1 - col)) == 0 {
                    continue;
                }
                let px = (origin_x + col as f32 * module).floor() as i32;
                let py = (y + row as f32 * module).floor() as i32;
                draw_filled_rect_mut(image, Rect::at(px, py).of_size(dot, dot), color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn block_metrics_scale_with_size() {
        let face = Face::Block;
        assert_eq!(face.advance("AB", 7.0), 12.0);
        assert_eq!(face.advance("", 7.0), 0.0);
        assert_eq!(face.line_height(14.0), 18.0);
    }

    #[test]
    fn block_draw_marks_pixels() {
        let mut image = RgbaImage::from_pixel(40, 20, Rgba([255, 255, 255, 255]));
        let ink = Rgba([0, 0, 0, 255]);
        Face::Block.draw(&mut image, 2.0, 2.0, "I", 14.0, ink);
        assert!(image.pixels().any(|p| *p == ink));
        Face::Block.draw(&mut image, 100.0, 100.0, "off page", 14.0, ink);
    }

    #[test]
    fn outline_advance_includes_kerning() {
        // Only meaningful where a system TrueType font is installed.
        let candidates = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
        ];
        let Some(path) = candidates.iter().map(Path::new).find(|p| p.exists()) else {
            return;
        };
        let face = Face::load(path).unwrap();
        let Face::Outline(font) = &face else {
            panic!("expected an outline face");
        };
        let scaled = font.as_scaled(PxScale::from(40.0));
        let (a, v) = (font.glyph_id('A'), font.glyph_id('V'));
        let expected = scaled.h_advance(a) + scaled.kern(a, v) + scaled.h_advance(v);
        assert_eq!(face.advance("AV", 40.0), expected);
        assert_eq!(face.advance("", 40.0), 0.0);
    }

    #[test]
    fn missing_font_file_is_reported() {
        let err = Face::load(Path::new("/no/such/font.ttf")).unwrap_err();
        assert!(matches!(err, CardError::Font { .. }));
    }
}
