use std::time::Instant;

use gc_core::charset::CharsetFlags;
use gc_core::config::ConversionRequest;
use gc_core::error::{ConvertError, Result};
use gc_core::frame::{CharGrid, PixelBuffer};
use gc_core::glyph::DisplayChar;
use gc_core::traits::{GlyphRasterizer, ImageRasterizer};

use crate::cache::CharsetCache;
use crate::composer;
use crate::profiler::{GlyphProfiler, ProfileOptions};
use crate::renderer;

/// Converter orchestre une passe complète image → texte.
///
/// Owns the glyph profiler, the charset cache and the image backend. Each call to
/// [`Converter::convert`] reads its [`ConversionRequest`] as an immutable snapshot
/// and either returns the whole text or fails without output.
///
/// # Example
/// ```
/// use gc_core::config::{ConversionRequest, ConversionSettings};
/// use gc_core::charset::CharsetFlags;
/// use gc_core::error::Result;
/// use gc_core::frame::PixelBuffer;
/// use gc_core::traits::{GlyphRasterizer, ImageRasterizer, glyph_box};
/// use gc_ascii::converter::Converter;
/// use gc_ascii::profiler::ProfileOptions;
///
/// struct Blank;
/// impl GlyphRasterizer for Blank {
///     fn render_glyph(&self, _ch: char, size: f32) -> Result<PixelBuffer> {
///         let (w, h) = glyph_box(size);
///         Ok(PixelBuffer::new(w, h))
///     }
///     fn family(&self) -> &str { "blank" }
/// }
///
/// struct Stretch;
/// impl ImageRasterizer for Stretch {
///     fn resize_to_buffer(&mut self, _img: &PixelBuffer, w: u32, h: u32) -> Result<PixelBuffer> {
///         Ok(PixelBuffer::filled(w, h, [255, 255, 255, 255]))
///     }
/// }
///
/// let mut converter = Converter::new(Blank, Stretch, ProfileOptions { font_size: 8.0, ..Default::default() });
/// let request = ConversionRequest {
///     settings: ConversionSettings { width: 3, height: 2, ..Default::default() },
///     charsets: CharsetFlags { keyboard: false, lines: false, blocks: false, space: true },
/// };
/// let text = converter.convert(&PixelBuffer::new(10, 10), &request).unwrap();
/// assert_eq!(text, "   \n   ");
/// ```
pub struct Converter<G, I> {
    profiler: GlyphProfiler<G>,
    images: I,
    cache: CharsetCache,
}

impl<G: GlyphRasterizer, I: ImageRasterizer> Converter<G, I> {
    #[must_use]
    pub fn new(glyphs: G, images: I, options: ProfileOptions) -> Self {
        Self {
            profiler: GlyphProfiler::new(glyphs, options),
            images,
            cache: CharsetCache::new(),
        }
    }

    #[must_use]
    pub fn profiler(&self) -> &GlyphProfiler<G> {
        &self.profiler
    }

    #[must_use]
    pub fn cache(&self) -> &CharsetCache {
        &self.cache
    }

    #[must_use]
    pub fn images(&self) -> &I {
        &self.images
    }

    /// Convert `image` to text according to `request`.
    ///
    /// # Errors
    /// [`ConvertError::Dimension`] for an empty output grid,
    /// [`ConvertError::EmptyCharset`] when no category is enabled (checked before
    /// the image backend is called), profiling or backend errors otherwise.
    pub fn convert(&mut self, image: &PixelBuffer, request: &ConversionRequest) -> Result<String> {
        self.convert_grid(image, request).map(|grid| grid.to_text())
    }

    /// Same as [`Converter::convert`], returning the character grid.
    ///
    /// # Errors
    /// See [`Converter::convert`].
    pub fn convert_grid(
        &mut self,
        image: &PixelBuffer,
        request: &ConversionRequest,
    ) -> Result<CharGrid> {
        let settings = &request.settings;
        if settings.width == 0 || settings.height == 0 {
            return Err(ConvertError::Dimension {
                width: settings.width,
                height: settings.height,
            });
        }

        if !request.charsets.any() {
            return Err(ConvertError::EmptyCharset);
        }

        let start = Instant::now();
        let active = self.active_set(&request.charsets)?;
        if active.is_empty() {
            return Err(ConvertError::EmptyCharset);
        }

        let (px_w, px_h) = block_buffer_size(settings.width, settings.height)?;
        log::debug!(
            "Conversion {}×{} depuis {}×{} ({} candidats)",
            settings.width,
            settings.height,
            image.width,
            image.height,
            active.len()
        );
        let buffer = self.images.resize_to_buffer(image, px_w, px_h)?;
        let grid = renderer::render_grid(&buffer, &active, settings)?;

        log::info!(
            "Conversion {}×{} terminée en {:?}",
            settings.width,
            settings.height,
            start.elapsed()
        );
        Ok(grid)
    }

    /// Active search set for `flags`, building missing categories.
    ///
    /// # Errors
    /// Propagates profiling errors.
    pub fn active_set(&mut self, flags: &CharsetFlags) -> Result<Vec<DisplayChar>> {
        composer::active_set(&mut self.cache, &self.profiler, flags)
    }

    /// Drop every cached profile; the next pass re-profiles what it needs.
    pub fn refresh_charsets(&mut self) {
        log::debug!("Invalidation du cache de charsets");
        self.cache.invalidate_all();
    }

    /// Swap the glyph backend (font change) and drop the now stale profiles.
    pub fn set_glyph_rasterizer(&mut self, glyphs: G) {
        let options = *self.profiler.options();
        self.profiler = GlyphProfiler::new(glyphs, options);
        self.refresh_charsets();
    }

    /// Change profiling options; cached profiles are dropped only if they changed.
    pub fn set_profile_options(&mut self, options: ProfileOptions) {
        if *self.profiler.options() == options {
            return;
        }
        self.profiler.set_options(options);
        self.refresh_charsets();
    }
}

/// Pixel size of the buffer holding `width × height` 2×2 blocks.
fn block_buffer_size(width: u32, height: u32) -> Result<(u32, u32)> {
    match (width.checked_mul(2), height.checked_mul(2)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(ConvertError::Dimension { width, height }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{NearestResizer, QuadrantGlyphs};
    use gc_core::charset::Category;
    use gc_core::config::ConversionSettings;

    fn converter() -> Converter<QuadrantGlyphs, NearestResizer> {
        Converter::new(
            QuadrantGlyphs::new(),
            NearestResizer::default(),
            ProfileOptions {
                font_size: 16.0,
                ..ProfileOptions::default()
            },
        )
    }

    fn request(width: u32, height: u32, charsets: CharsetFlags) -> ConversionRequest {
        ConversionRequest {
            settings: ConversionSettings {
                width,
                height,
                ..ConversionSettings::default()
            },
            charsets,
        }
    }

    #[test]
    fn black_image_picks_fully_inked_glyph() {
        let mut converter = converter();
        let image = PixelBuffer::filled(7, 5, [0, 0, 0, 255]);
        let keyboard = CharsetFlags {
            keyboard: true,
            ..CharsetFlags::none()
        };
        // '/' (0x2F) is the first keyboard glyph with all four quadrants inked.
        let text = converter.convert(&image, &request(3, 2, keyboard)).unwrap();
        assert_eq!(text, "///\n///");
        assert_eq!(converter.images().calls, 1);
    }

    #[test]
    fn left_half_dark_picks_left_glyph() {
        let mut converter = converter();
        let mut image = PixelBuffer::filled(2, 2, [255, 255, 255, 255]);
        image.set_pixel(0, 0, [0, 0, 0, 255]);
        image.set_pixel(0, 1, [0, 0, 0, 255]);
        let text = converter
            .convert(&image, &request(1, 1, CharsetFlags::all()))
            .unwrap();
        // Low nibble 0101 (TL + BL): first such codepoint is '%' (0x25).
        assert_eq!(text, "%");
    }

    #[test]
    fn empty_charset_fails_before_resizing() {
        let mut converter = converter();
        let image = PixelBuffer::filled(4, 4, [0, 0, 0, 255]);
        let err = converter
            .convert(&image, &request(2, 2, CharsetFlags::none()))
            .unwrap_err();
        assert_eq!(err, ConvertError::EmptyCharset);
        assert_eq!(converter.images().calls, 0);
        assert_eq!(converter.profiler().rasterizer().calls.get(), 0);
        assert!(converter.cache().is_empty());
    }

    #[test]
    fn zero_sized_request_is_a_dimension_error() {
        let mut converter = converter();
        let image = PixelBuffer::filled(4, 4, [0, 0, 0, 255]);
        assert!(matches!(
            converter.convert(&image, &request(0, 3, CharsetFlags::all())),
            Err(ConvertError::Dimension { .. })
        ));
    }

    #[test]
    fn backend_error_fails_the_pass_and_next_pass_succeeds() {
        let mut converter = converter();
        let flags = CharsetFlags::all();
        assert!(matches!(
            converter.convert(&PixelBuffer::new(0, 0), &request(2, 2, flags)),
            Err(ConvertError::Raster(_))
        ));
        let image = PixelBuffer::filled(4, 4, [255, 255, 255, 255]);
        assert_eq!(converter.convert(&image, &request(2, 2, flags)).unwrap(), "  \n  ");
    }

    #[test]
    fn passes_reuse_profiles_until_refresh() {
        let mut converter = converter();
        let image = PixelBuffer::filled(4, 4, [255, 255, 255, 255]);
        let flags = CharsetFlags::all();
        converter.convert(&image, &request(2, 2, flags)).unwrap();
        let calls = converter.profiler().rasterizer().calls.get();
        converter.convert(&image, &request(1, 1, flags)).unwrap();
        assert_eq!(converter.profiler().rasterizer().calls.get(), calls);

        converter.set_profile_options(*converter.profiler().options());
        assert!(converter.cache().contains(Category::Keyboard));

        converter.set_profile_options(ProfileOptions {
            font_size: 32.0,
            ..ProfileOptions::default()
        });
        assert!(converter.cache().is_empty());

        converter.set_glyph_rasterizer(QuadrantGlyphs::new());
        assert!(converter.cache().is_empty());
        converter.convert(&image, &request(1, 1, flags)).unwrap();
        assert_eq!(converter.profiler().rasterizer().calls.get(), 230);
    }
}
