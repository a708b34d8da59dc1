use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_polygon_mut};
use imageproc::point::Point;
use serde::{Deserialize, Serialize};

use super::face::Face;
use super::surface::{Canvas, Surface};
use crate::document::write_pdf;
use crate::error::CardError;
use crate::fit::{BoxSize, FitParams, TextMeasure, fit_text};
use crate::grid::{Card, GridGeometry};
use crate::page::{Frame, PageGeometry};

/// Title font size is the shorter content side divided by this.
const TITLE_DIVISOR: f32 = 6.5;
/// Gap between the top of the title band and the title glyphs.
const TITLE_OFFSET: f32 = 4.0;
const GRID_STROKE: f32 = 2.0;
const CELL_INSET: f32 = 8.0;
const IMAGE_PADDING: f32 = 8.0;
/// Cell text starts at `cell_width / START_DIVISOR` and shrinks from there.
const START_DIVISOR: f32 = 10.0;
const MIN_CELL_FONT: f32 = 6.0;
const CELL_FONT_STEP: f32 = 0.5;
const EMBLEM_SIZE: u32 = 128;

/// Color schemes for rendered cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStyle {
    /// White page, charcoal ink.
    #[default]
    Classic,
    /// White page, black ink; best for monochrome printers.
    Ink,
    /// Warm paper tone.
    Cream,
}

impl CardStyle {
    fn palette(self) -> Palette {
        match self {
            CardStyle::Classic => Palette {
                background: rgba(0xff, 0xff, 0xff, 0xff),
                ink: rgba(0x4d, 0x4d, 0x4d, 0xff),
                accent: rgba(0xc9, 0xa2, 0x27, 0xff),
            },
            CardStyle::Ink => Palette {
                background: rgba(0xff, 0xff, 0xff, 0xff),
                ink: rgba(0x00, 0x00, 0x00, 0xff),
                accent: rgba(0x00, 0x00, 0x00, 0xff),
            },
            CardStyle::Cream => Palette {
                background: rgba(0xfd, 0xf6, 0xe3, 0xff),
                ink: rgba(0x3b, 0x2f, 0x24, 0xff),
                accent: rgba(0xb5, 0x76, 0x1e, 0xff),
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Palette {
    background: Rgba<u8>,
    ink: Rgba<u8>,
    accent: Rgba<u8>,
}

fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba<u8> {
    Rgba([r, g, b, a])
}

/// Resolved positions of the title band and the grid on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLayout {
    pub title_size: f32,
    pub header: Frame,
    pub grid: Frame,
    pub cell_width: f32,
    pub cell_height: f32,
}

impl CardLayout {
    pub fn cell(&self, row: usize, col: usize) -> Frame {
        Frame::new(
            self.grid.x + col as f32 * self.cell_width,
            self.grid.y + row as f32 * self.cell_height,
            self.cell_width,
            self.cell_height,
        )
    }
}

/// Draws cards for one grid shape and page size.
#[derive(Debug, Clone)]
pub struct CardRenderer {
    grid: GridGeometry,
    page: PageGeometry,
    titles: Vec<String>,
    style: CardStyle,
    cell_face: Face,
    title_face: Face,
    emblem: Option<RgbaImage>,
}

impl CardRenderer {
    pub fn new(grid: GridGeometry, page: PageGeometry) -> Self {
        Self {
            grid,
            page,
            titles: Vec::new(),
            style: CardStyle::default(),
            cell_face: Face::Block,
            title_face: Face::Block,
            emblem: None,
        }
    }

    pub fn with_titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.titles = titles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_style(mut self, style: CardStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_faces(mut self, cell: Face, title: Face) -> Self {
        self.cell_face = cell;
        self.title_face = title;
        self
    }

    /// Image drawn in reserved cells instead of the built-in emblem.
    pub fn with_emblem(mut self, emblem: RgbaImage) -> Self {
        self.emblem = Some(emblem);
        self
    }

    pub fn grid(&self) -> &GridGeometry {
        &self.grid
    }

    pub fn page(&self) -> &PageGeometry {
        &self.page
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Title band above a square grid, both centered in the printable area.
    pub fn layout(&self) -> CardLayout {
        let printable = self.page.printable();
        let available_w = (printable.width - 2.0 * self.page.border).max(0.0);
        let available_h = (printable.height - 2.0 * self.page.border).max(0.0);

        let title_size = available_w.min(available_h) / TITLE_DIVISOR;
        let header_h = title_size * self.page.header_ratio;
        let side = available_w.min(available_h - header_h).max(0.0);

        let x = printable.x + (printable.width - side) / 2.0;
        let y = printable.y + (printable.height - side - header_h) / 2.0;

        CardLayout {
            title_size,
            header: Frame::new(x, y, side, header_h),
            grid: Frame::new(x, y + header_h, side, side),
            cell_width: side / self.grid.columns() as f32,
            cell_height: side / self.grid.rows() as f32,
        }
    }

    /// Draw `card` onto `surface`: background, titles, grid lines, then the
    /// emblem in reserved cells and fitted text everywhere else.
    pub fn render<S: Surface + ?Sized>(&self, card: &Card, surface: &mut S) {
        let palette = self.style.palette();
        let layout = self.layout();
        let rows = self.grid.rows();
        let columns = self.grid.columns();

        surface.fill(palette.background);

        for (col, title) in self.titles.iter().take(columns).enumerate() {
            let width = self.title_face.advance(title, layout.title_size);
            let x = layout.grid.x + col as f32 * layout.cell_width + (layout.cell_width - width) / 2.0;
            surface.draw_text(
                &self.title_face,
                title,
                (x, layout.header.y + TITLE_OFFSET),
                layout.title_size,
                palette.ink,
            );
        }

        let grid = layout.grid;
        for col in 0..=columns {
            let x = grid.x + col as f32 * layout.cell_width;
            surface.stroke_line((x, grid.y), (x, grid.max_y()), GRID_STROKE, palette.ink);
        }
        for row in 0..=rows {
            let y = grid.y + row as f32 * layout.cell_height;
            surface.stroke_line((grid.x, y), (grid.max_x(), y), GRID_STROKE, palette.ink);
        }

        let fallback;
        let emblem = match &self.emblem {
            Some(image) => image,
            None => {
                fallback = default_emblem(palette);
                &fallback
            }
        };

        for &(row, col) in self.grid.reserved() {
            let target = layout
                .cell(row, col)
                .inset(CELL_INSET + IMAGE_PADDING)
                .fit_aspect(emblem.width() as f32, emblem.height() as f32);
            surface.draw_image(emblem, target);
        }

        for row in 0..rows {
            for col in 0..columns {
                let text = card.get(row, col);
                if self.grid.is_reserved(row, col) || text.is_empty() {
                    continue;
                }
                let inner = layout.cell(row, col).inset(CELL_INSET);
                self.draw_cell_text(surface, text, inner, layout.cell_width, palette.ink);
            }
        }
    }

    fn draw_cell_text<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        text: &str,
        inner: Frame,
        cell_width: f32,
        color: Rgba<u8>,
    ) {
        let params = FitParams::new(cell_width / START_DIVISOR, MIN_CELL_FONT, CELL_FONT_STEP);
        let fit = fit_text(
            &self.cell_face,
            text,
            BoxSize::new(inner.width, inner.height),
            params,
        );
        let line_height = self.cell_face.line_height(fit.font_size);
        let mut y = inner.y + fit.vertical_offset;
        for line in &fit.lines {
            let width = self.cell_face.advance(line, fit.font_size);
            let x = inner.x + (inner.width - width) / 2.0;
            surface.draw_text(&self.cell_face, line, (x, y), fit.font_size, color);
            y += line_height;
        }
    }

    /// Rasterize the full page at `dpi`.
    pub fn render_image(&self, card: &Card, dpi: u32) -> RgbaImage {
        let mut canvas = Canvas::for_page(&self.page, dpi);
        self.render(card, &mut canvas);
        canvas.into_image()
    }

    pub fn render_png(&self, card: &Card, dpi: u32) -> Result<Vec<u8>, CardError> {
        let image = self.render_image(card, dpi);
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, ImageFormat::Png)
            .map_err(|err| CardError::Encode(err.to_string()))?;
        Ok(bytes.into_inner())
    }

    /// Single-page PDF of `card`.
    pub fn render_pdf(&self, card: &Card, dpi: u32) -> Result<Vec<u8>, CardError> {
        let image = self.render_image(card, dpi);
        write_pdf(&[image], &self.page)
    }
}

/// Ring-and-star badge used when no emblem image is configured.
fn default_emblem(palette: Palette) -> RgbaImage {
    let size = EMBLEM_SIZE;
    let mut image = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));
    let center = (size as i32 / 2, size as i32 / 2);
    let radius = size as i32 / 2 - 2;
    draw_filled_circle_mut(&mut image, center, radius, palette.accent);
    draw_filled_circle_mut(&mut image, center, radius - radius / 6, palette.background);

    let star = star_points(center, (radius as f32) * 0.7, (radius as f32) * 0.3);
    draw_polygon_mut(&mut image, &star, palette.accent);
    image
}

fn star_points(center: (i32, i32), outer: f32, inner: f32) -> Vec<Point<i32>> {
    (0..10)
        .map(|idx| {
            let radius = if idx % 2 == 0 { outer } else { inner };
            let angle = std::f32::consts::PI * (idx as f32 / 5.0) - std::f32::consts::FRAC_PI_2;
            Point::new(
                center.0 + (radius * angle.cos()).round() as i32,
                center.1 + (radius * angle.sin()).round() as i32,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::load_fixed_grid;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Fill,
        Line,
        Text { text: String, at: (f32, f32), size: f32 },
        Image(Frame),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Surface for Recorder {
        fn fill(&mut self, _color: Rgba<u8>) {
            self.ops.push(Op::Fill);
        }

        fn stroke_line(&mut self, _from: (f32, f32), _to: (f32, f32), width: f32, _color: Rgba<u8>) {
            assert_eq!(width, GRID_STROKE);
            self.ops.push(Op::Line);
        }

        fn draw_text(&mut self, _face: &Face, text: &str, at: (f32, f32), size: f32, _color: Rgba<u8>) {
            self.ops.push(Op::Text {
                text: text.to_string(),
                at,
                size,
            });
        }

        fn draw_image(&mut self, _image: &RgbaImage, frame: Frame) {
            self.ops.push(Op::Image(frame));
        }
    }

    fn renderer() -> CardRenderer {
        CardRenderer::new(GridGeometry::default(), PageGeometry::letter())
            .with_titles(["O", "S", "C", "A", "R"])
    }

    fn sample_card() -> Card {
        let text = "a,b,c,d,e\nf,g,h,i,j\nk,l,FREE,m,n\no,p,q,r,s\nt,u,v,w,x";
        load_fixed_grid(text, &GridGeometry::default())
    }

    #[test]
    fn letter_layout_matches_page_arithmetic() {
        let layout = renderer().layout();
        // printable 540x720, minus 16 border each side -> 508x688
        assert_eq!(layout.title_size, 508.0 / 6.5);
        let header = layout.title_size * 1.1;
        assert_eq!(layout.grid.width, 508.0);
        assert_eq!(layout.grid.height, 508.0);
        assert_eq!(layout.cell_width, 508.0 / 5.0);
        assert_eq!(layout.grid.x, 36.0 + (540.0 - 508.0) / 2.0);
        assert_eq!(layout.grid.y, layout.header.y + header);
    }

    #[test]
    fn draw_order_is_background_titles_lines_cells() {
        let mut recorder = Recorder::default();
        renderer().render(&sample_card(), &mut recorder);
        let ops = recorder.ops;

        assert_eq!(ops[0], Op::Fill);
        assert!(ops[1..6].iter().all(|op| matches!(op, Op::Text { .. })));
        assert!(ops[6..18].iter().all(|op| *op == Op::Line));
        assert!(matches!(ops[18], Op::Image(_)), "emblems come before cell text");
        assert!(ops[19..].iter().all(|op| matches!(op, Op::Text { .. })));
        assert_eq!(ops[19..].len(), 24, "one line per single-letter cell");
    }

    #[test]
    fn reserved_cell_gets_image_and_never_text() {
        let renderer = renderer();
        let layout = renderer.layout();
        let center = layout.cell(2, 2);
        let mut recorder = Recorder::default();
        renderer.render(&sample_card(), &mut recorder);

        for op in &recorder.ops[18..] {
            match op {
                Op::Image(frame) => {
                    assert!(frame.x >= center.x + CELL_INSET + IMAGE_PADDING - 0.001);
                    assert!(frame.max_x() <= center.max_x() - CELL_INSET - IMAGE_PADDING + 0.001);
                    assert!((frame.width - frame.height).abs() < 0.001, "square emblem keeps aspect");
                }
                Op::Text { at, .. } => {
                    let inside_center = at.0 >= center.x
                        && at.0 <= center.max_x()
                        && at.1 >= center.y
                        && at.1 <= center.max_y();
                    assert!(!inside_center, "text drawn in reserved cell at {:?}", at);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn cell_text_starts_at_tenth_of_cell_width() {
        let mut recorder = Recorder::default();
        let renderer = renderer();
        renderer.render(&sample_card(), &mut recorder);
        let expected = renderer.layout().cell_width / START_DIVISOR;
        let sizes: Vec<f32> = recorder.ops[18..]
            .iter()
            .filter_map(|op| match op {
                Op::Text { size, .. } => Some(*size),
                _ => None,
            })
            .collect();
        assert!(sizes.iter().all(|s| *s == expected));
    }

    #[test]
    fn titles_beyond_column_count_are_dropped() {
        let renderer = CardRenderer::new(GridGeometry::centered(3, 3).unwrap(), PageGeometry::letter())
            .with_titles(["A", "B", "C", "D", "E"]);
        let mut recorder = Recorder::default();
        renderer.render(&Card::blank(renderer.grid()), &mut recorder);
        let titles = recorder
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Text { .. }))
            .count();
        assert_eq!(titles, 3);
    }

    #[test]
    fn rendering_is_deterministic() {
        let renderer = renderer().with_style(CardStyle::Cream);
        let card = sample_card();
        let first = renderer.render_image(&card, 72);
        let second = renderer.render_image(&card, 72);
        assert_eq!(first.dimensions(), (612, 792));
        assert!(first.as_raw() == second.as_raw());
        assert_eq!(renderer.render_png(&card, 72).unwrap(), renderer.render_png(&card, 72).unwrap());
    }

    #[test]
    fn raster_has_background_and_ink() {
        let renderer = renderer();
        let image = renderer.render_image(&sample_card(), 72);
        let palette = CardStyle::Classic.palette();
        assert_eq!(*image.get_pixel(1, 1), palette.background);
        let layout = renderer.layout();
        let x = layout.grid.x.round() as u32;
        let y = (layout.grid.y + layout.cell_height / 2.0).round() as u32;
        assert_eq!(*image.get_pixel(x, y), palette.ink);
    }
}
