use gc_core::charset::CharsetFlags;
use gc_core::error::Result;
use gc_core::glyph::DisplayChar;
use gc_core::traits::GlyphRasterizer;

use crate::cache::CharsetCache;
use crate::profiler::GlyphProfiler;

/// Union of the enabled categories, in the order space, keyboard, lines, blocks.
///
/// Missing categories are profiled and cached on the way. All flags off gives an
/// empty set; matching against it is the caller's error to report.
///
/// # Errors
/// Propagates profiling errors from the cache.
pub fn active_set<G: GlyphRasterizer>(
    cache: &mut CharsetCache,
    profiler: &GlyphProfiler<G>,
    flags: &CharsetFlags,
) -> Result<Vec<DisplayChar>> {
    let mut out = Vec::new();
    for category in flags.enabled() {
        let entry = cache.get(category, profiler, false)?;
        out.extend_from_slice(&entry);
    }
    Ok(out)
}
