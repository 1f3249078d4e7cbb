//! Glyph-brightness matching engine for glyphcii.
//!
//! Profiles candidate glyphs per quadrant, scores 2×2 image blocks the same way,
//! and picks the nearest glyph for every block.

pub mod cache;
pub mod composer;
pub mod converter;
pub mod matcher;
pub mod profiler;
pub mod quadrant;
pub mod renderer;

#[cfg(test)]
mod test_support;

pub use cache::CharsetCache;
pub use converter::Converter;
pub use matcher::BlockMatcher;
pub use profiler::{GlyphProfiler, ProfileOptions};
