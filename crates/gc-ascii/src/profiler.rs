use gc_core::config::FontConfig;
use gc_core::error::{ConvertError, Result};
use gc_core::glyph::CharBrightness;
use gc_core::traits::{GlyphRasterizer, glyph_box};

use crate::quadrant::region_quadrants;

/// Paramètres de profilage des glyphes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfileOptions {
    /// Taille de rendu en pixels.
    pub font_size: f32,
    /// Exposant de la courbe `(b / 255)^weight * 255`.
    pub weight: f32,
    /// Apply the `weight` curve. Off by default: historical profiles ignore it.
    pub apply_weight_curve: bool,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            font_size: 128.0,
            weight: 0.5,
            apply_weight_curve: false,
        }
    }
}

impl From<&FontConfig> for ProfileOptions {
    fn from(font: &FontConfig) -> Self {
        Self {
            font_size: font.size,
            weight: font.weight,
            apply_weight_curve: font.apply_weight_curve,
        }
    }
}

/// Calcule le profil de luminosité (4 quadrants) d'un caractère.
///
/// # Example
/// ```
/// use gc_core::traits::{GlyphRasterizer, glyph_box};
/// use gc_core::frame::PixelBuffer;
/// use gc_core::error::Result;
/// use gc_ascii::profiler::{GlyphProfiler, ProfileOptions};
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
/// let profiler = GlyphProfiler::new(Blank, ProfileOptions::default());
/// let b = profiler.profile(" ", 32.0, 1.0).unwrap();
/// assert_eq!(b.0, [255.0; 4]);
/// assert!(profiler.profile("ab", 32.0, 1.0).is_err());
/// ```
pub struct GlyphProfiler<G> {
    rasterizer: G,
    options: ProfileOptions,
}

impl<G: GlyphRasterizer> GlyphProfiler<G> {
    #[must_use]
    pub fn new(rasterizer: G, options: ProfileOptions) -> Self {
        Self {
            rasterizer,
            options,
        }
    }

    #[must_use]
    pub fn options(&self) -> &ProfileOptions {
        &self.options
    }

    /// Replace the options. Profiles computed earlier are not updated.
    pub fn set_options(&mut self, options: ProfileOptions) {
        self.options = options;
    }

    #[must_use]
    pub fn rasterizer(&self) -> &G {
        &self.rasterizer
    }

    /// Profile `text`, which must be exactly one character.
    ///
    /// # Errors
    /// [`ConvertError::InvalidInput`] if `text` is not a single character or the
    /// font size is not a positive finite number; [`ConvertError::Raster`] if the
    /// backend fails or returns a buffer of the wrong size.
    pub fn profile(&self, text: &str, font_size: f32, weight: f32) -> Result<CharBrightness> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => self.profile_glyph(ch, font_size, weight),
            _ => Err(ConvertError::InvalidInput(format!(
                "{text:?} n'est pas un caractère unique"
            ))),
        }
    }

    /// Profile `ch` with the profiler's own options.
    ///
    /// # Errors
    /// See [`GlyphProfiler::profile`].
    pub fn profile_char(&self, ch: char) -> Result<CharBrightness> {
        self.profile_glyph(ch, self.options.font_size, self.options.weight)
    }

    fn profile_glyph(&self, ch: char, font_size: f32, weight: f32) -> Result<CharBrightness> {
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(ConvertError::InvalidInput(format!(
                "taille de police invalide : {font_size}"
            )));
        }

        let expected = glyph_box(font_size);
        let buffer = self.rasterizer.render_glyph(ch, font_size)?;
        if (buffer.width, buffer.height) != expected {
            return Err(ConvertError::Raster(format!(
                "glyphe {ch:?} rendu en {}×{}, {}×{} attendu",
                buffer.width, buffer.height, expected.0, expected.1
            )));
        }

        let brightness = region_quadrants(&buffer);
        if self.options.apply_weight_curve {
            return Ok(brightness.map(|b| (b / 255.0).powf(f64::from(weight)) * 255.0));
        }
        Ok(brightness)
    }
}
