//! Drawing targets for the card renderer.

use image::imageops::{self, FilterType, overlay};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use super::face::Face;
use crate::page::{Frame, PageGeometry, pixels_per_unit};

/// Something the renderer can draw on. Coordinates and sizes are in layout
/// units with the origin at the top-left of the page.
pub trait Surface {
    fn fill(&mut self, color: Rgba<u8>);
    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba<u8>);
    /// Draw a single line of text with its top-left corner at `at`.
    fn draw_text(&mut self, face: &Face, text: &str, at: (f32, f32), size: f32, color: Rgba<u8>);
    /// Draw `image` stretched over `frame`.
    fn draw_image(&mut self, image: &RgbaImage, frame: Frame);
}

/// Raster surface covering a whole page at a fixed DPI.
pub struct Canvas {
    image: RgbaImage,
    scale: f32,
}

impl Canvas {
    pub fn for_page(page: &PageGeometry, dpi: u32) -> Self {
        let (width, height) = page.pixel_size(dpi);
        Self {
            image: RgbaImage::new(width, height),
            scale: pixels_per_unit(dpi),
        }
    }

    /// Pixels per layout unit.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn px(&self, value: f32) -> f32 {
        value * self.scale
    }
}

impl Surface for Canvas {
    fn fill(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba<u8>) {
        let half = width / 2.0;
        if from.0 == to.0 || from.1 == to.1 {
            // Axis-aligned strokes become rectangles; ends are extended by
            // half the width so adjoining strokes close their corners.
            let left = self.px(from.0.min(to.0) - half);
            let top = self.px(from.1.min(to.1) - half);
            let right = self.px(from.0.max(to.0) + half);
            let bottom = self.px(from.1.max(to.1) + half);
            let w = (right - left).round().max(1.0) as u32;
            let h = (bottom - top).round().max(1.0) as u32;
            draw_filled_rect_mut(
                &mut self.image,
                Rect::at(left.round() as i32, top.round() as i32).of_size(w, h),
                color,
            );
        } else {
            let start = (self.px(from.0), self.px(from.1));
            let end = (self.px(to.0), self.px(to.1));
            draw_line_segment_mut(&mut self.image, start, end, color);
        }
    }

    fn draw_text(&mut self, face: &Face, text: &str, at: (f32, f32), size: f32, color: Rgba<u8>) {
        let (x, y, size_px) = (self.px(at.0), self.px(at.1), self.px(size));
        face.draw(&mut self.image, x, y, text, size_px, color);
    }

    fn draw_image(&mut self, image: &RgbaImage, frame: Frame) {
        let width = self.px(frame.width).round() as u32;
        let height = self.px(frame.height).round() as u32;
        if width == 0 || height == 0 || image.width() == 0 || image.height() == 0 {
            return;
        }
        let scaled = imageops::resize(image, width, height, FilterType::Triangle);
        let (x, y) = (
            self.px(frame.x).round() as i64,
            self.px(frame.y).round() as i64,
        );
        overlay(&mut self.image, &scaled, x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const INK: Rgba<u8> = Rgba([77, 77, 77, 255]);

    fn small_canvas() -> Canvas {
        Canvas::for_page(&PageGeometry::screen(100.0), 144)
    }

    #[test]
    fn canvas_matches_page_pixels() {
        let canvas = small_canvas();
        assert_eq!(canvas.image().dimensions(), (200, 200));
        assert_eq!(canvas.scale(), 2.0);
    }

    #[test]
    fn vertical_stroke_covers_its_width() {
        let mut canvas = small_canvas();
        canvas.fill(WHITE);
        canvas.stroke_line((50.0, 10.0), (50.0, 90.0), 2.0, INK);
        let image = canvas.image();
        assert_eq!(*image.get_pixel(99, 100), INK);
        assert_eq!(*image.get_pixel(101, 100), INK);
        assert_eq!(*image.get_pixel(104, 100), WHITE);
        assert_eq!(*image.get_pixel(100, 10), WHITE);
    }

    #[test]
    fn image_is_scaled_into_frame() {
        let mut canvas = small_canvas();
        canvas.fill(WHITE);
        let red = Rgba([255, 0, 0, 255]);
        let swatch = RgbaImage::from_pixel(4, 4, red);
        canvas.draw_image(&swatch, Frame::new(10.0, 10.0, 20.0, 20.0));
        let image = canvas.into_image();
        let inside = image.get_pixel(40, 40);
        assert!(inside[0] > 200 && inside[1] < 50, "got {:?}", inside);
        assert_eq!(*image.get_pixel(70, 70), WHITE);
    }
}
