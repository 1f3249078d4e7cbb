//! Image sources for glyphcii: decoding and resizing to RGBA pixel buffers.

pub mod image;
pub mod resize;

pub use resize::Resizer;
