//! Glyph rasterization backend for glyphcii, built on ab_glyph.

pub mod rasterizer;

pub use rasterizer::{FontRasterizer, KNOWN_FONT_PATHS, find_system_font};
