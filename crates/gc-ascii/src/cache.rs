use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use gc_core::charset::{Category, CodepointRange, ranges_len};
use gc_core::error::{ConvertError, Result};
use gc_core::glyph::DisplayChar;
use gc_core::traits::GlyphRasterizer;

use crate::profiler::GlyphProfiler;

/// Cache des profils de glyphes, une entrée par catégorie.
///
/// Entries are immutable once built: a category is profiled on first access and
/// returned as the same shared slice until it is invalidated. Mutation goes through
/// `&mut self`, so a rebuild can never overlap a read of the same cache.
///
/// # Example
/// ```
/// use gc_core::charset::Category;
/// use gc_core::glyph::{CharBrightness, DisplayChar};
/// use gc_ascii::cache::CharsetCache;
///
/// let mut cache = CharsetCache::new();
/// let first = cache
///     .get_or_build(Category::Space, || Ok(vec![DisplayChar::new(' ', CharBrightness::uniform(255.0))]))
///     .unwrap();
/// let again = cache.get_or_build(Category::Space, || unreachable!()).unwrap();
/// assert!(std::sync::Arc::ptr_eq(&first, &again));
/// ```
#[derive(Debug, Default)]
pub struct CharsetCache {
    entries: HashMap<Category, Arc<[DisplayChar]>>,
}

impl CharsetCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the entry for `category`, building it with `build` if absent.
    ///
    /// A failed build leaves the cache unchanged.
    ///
    /// # Errors
    /// Propagates the error returned by `build`.
    pub fn get_or_build<F>(&mut self, category: Category, build: F) -> Result<Arc<[DisplayChar]>>
    where
        F: FnOnce() -> Result<Vec<DisplayChar>>,
    {
        if let Some(entry) = self.entries.get(&category) {
            return Ok(Arc::clone(entry));
        }
        let entry: Arc<[DisplayChar]> = build()?.into();
        self.entries.insert(category, Arc::clone(&entry));
        Ok(entry)
    }

    /// Profiled characters of `category`, built from its fixed ranges.
    ///
    /// With `force_refresh` the entry is rebuilt even if present.
    ///
    /// # Errors
    /// Propagates profiling errors; the previous entry is dropped on refresh.
    pub fn get<G: GlyphRasterizer>(
        &mut self,
        category: Category,
        profiler: &GlyphProfiler<G>,
        force_refresh: bool,
    ) -> Result<Arc<[DisplayChar]>> {
        self.get_with_ranges(category, category.ranges(), profiler, force_refresh)
    }

    /// Same as [`CharsetCache::get`] with caller-supplied ranges used on build.
    ///
    /// # Errors
    /// Propagates profiling errors.
    pub fn get_with_ranges<G: GlyphRasterizer>(
        &mut self,
        category: Category,
        ranges: &[CodepointRange],
        profiler: &GlyphProfiler<G>,
        force_refresh: bool,
    ) -> Result<Arc<[DisplayChar]>> {
        if force_refresh {
            self.invalidate(category);
        }
        self.get_or_build(category, || {
            let start = Instant::now();
            let chars = profile_ranges(profiler, ranges)?;
            log::debug!(
                "Charset '{category}' profilé ({} caractères, police {}) en {:?}",
                chars.len(),
                profiler.rasterizer().family(),
                start.elapsed()
            );
            Ok(chars)
        })
    }

    /// Drop the entry for `category`. Returns whether one was present.
    pub fn invalidate(&mut self, category: Category) -> bool {
        self.entries.remove(&category).is_some()
    }

    /// Drop every entry (font or profiling options changed).
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn contains(&self, category: Category) -> bool {
        self.entries.contains_key(&category)
    }

    /// Number of cached categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Profile every codepoint of every inclusive range, ascending, range after range.
///
/// # Errors
/// [`ConvertError::InvalidInput`] for a codepoint that is not a Unicode scalar value;
/// profiling errors otherwise.
pub fn profile_ranges<G: GlyphRasterizer>(
    profiler: &GlyphProfiler<G>,
    ranges: &[CodepointRange],
) -> Result<Vec<DisplayChar>> {
    let mut out = Vec::with_capacity(ranges_len(ranges));
    for &(min, max) in ranges {
        for codepoint in min..=max {
            let ch = char::from_u32(codepoint).ok_or_else(|| {
                ConvertError::InvalidInput(format!("U+{codepoint:04X} n'est pas un caractère"))
            })?;
            out.push(DisplayChar::new(ch, profiler.profile_char(ch)?));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiler::ProfileOptions;
    use crate::test_support::QuadrantGlyphs;

    fn profiler() -> GlyphProfiler<QuadrantGlyphs> {
        GlyphProfiler::new(
            QuadrantGlyphs::new(),
            ProfileOptions {
                font_size: 16.0,
                ..ProfileOptions::default()
            },
        )
    }

    #[test]
    fn repeated_get_returns_same_entry_without_profiling() {
        let profiler = profiler();
        let mut cache = CharsetCache::new();
        let first = cache.get(Category::Keyboard, &profiler, false).unwrap();
        let calls = profiler.rasterizer().calls.get();
        assert_eq!(calls, 94);

        let second = cache.get(Category::Keyboard, &profiler, false).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(profiler.rasterizer().calls.get(), calls);
    }

    #[test]
    fn force_refresh_rebuilds_with_expected_length() {
        let profiler = profiler();
        let mut cache = CharsetCache::new();
        let first = cache.get(Category::Lines, &profiler, false).unwrap();
        let refreshed = cache.get(Category::Lines, &profiler, true).unwrap();
        assert!(!Arc::ptr_eq(&first, &refreshed));
        assert_eq!(refreshed.len(), Category::Lines.len());
        assert_eq!(profiler.rasterizer().calls.get(), 2 * 129);
    }

    #[test]
    fn ranges_are_concatenated_in_order() {
        let chars = profile_ranges(&profiler(), &[(9617, 9619), (9600, 9600)]).unwrap();
        let got: String = chars.iter().map(DisplayChar::ch).collect();
        assert_eq!(got, "░▒▓▀");
    }

    #[test]
    fn lines_category_ends_with_white_square() {
        let mut cache = CharsetCache::new();
        let lines = cache.get(Category::Lines, &profiler(), false).unwrap();
        assert_eq!(lines.first().map(DisplayChar::ch), Some('─'));
        assert_eq!(lines.last().map(DisplayChar::ch), Some('□'));
    }

    #[test]
    fn surrogate_codepoints_are_rejected() {
        let err = profile_ranges(&profiler(), &[(0xD800, 0xD800)]).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidInput(_)));
    }

    #[test]
    fn failed_build_is_not_cached() {
        let mut cache = CharsetCache::new();
        let res = cache.get_or_build(Category::Blocks, || Err(ConvertError::EmptyCharset));
        assert!(res.is_err());
        assert!(!cache.contains(Category::Blocks));
    }

    #[test]
    fn invalidate_drops_entries() {
        let profiler = profiler();
        let mut cache = CharsetCache::new();
        cache.get(Category::Space, &profiler, false).unwrap();
        cache.get(Category::Blocks, &profiler, false).unwrap();
        assert_eq!(cache.len(), 2);
        assert!(cache.invalidate(Category::Space));
        assert!(!cache.invalidate(Category::Space));
        cache.invalidate_all();
        assert!(cache.is_empty());
    }
}
