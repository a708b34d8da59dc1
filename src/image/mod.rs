//! Raster rendering of cards: faces, drawing surfaces and the card renderer.

mod face;
mod glyphs;
mod paint;
mod surface;

pub use face::Face;
pub use paint::{CardLayout, CardRenderer, CardStyle};
pub use surface::{Canvas, Surface};
