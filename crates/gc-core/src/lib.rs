//! Configuration, types, and shared structures for glyphcii.
//!
//! This crate contains the shared types, collaborator traits, error type and
//! configuration logic used across the glyphcii workspace.

pub mod charset;
pub mod config;
pub mod error;
pub mod frame;
pub mod glyph;
pub mod traits;

pub use charset::{Category, CharsetFlags};
pub use config::{AppConfig, ConversionRequest, ConversionSettings};
pub use error::ConvertError;
pub use frame::{CharGrid, PixelBuffer};
pub use glyph::{CharBrightness, DisplayChar};
pub use traits::{GlyphRasterizer, ImageRasterizer};
