use crate::error::Result;
use crate::frame::PixelBuffer;

/// Rend un caractère unique dans un buffer RGBA.
///
/// Contract: the returned buffer is `(round(font_size * 0.5), round(font_size))`,
/// glyph top-left aligned with a top baseline, black ink on a transparent background.
///
/// Implémenté par : `gc_font::FontRasterizer`.
///
/// # Example
/// ```
/// use gc_core::traits::{GlyphRasterizer, glyph_box};
/// use gc_core::frame::PixelBuffer;
/// use gc_core::error::Result;
///
/// struct Blank;
/// impl GlyphRasterizer for Blank {
///     fn render_glyph(&self, _ch: char, font_size: f32) -> Result<PixelBuffer> {
///         let (w, h) = glyph_box(font_size);
///         Ok(PixelBuffer::new(w, h))
///     }
///     fn family(&self) -> &str { "blank" }
/// }
/// assert_eq!(Blank.render_glyph('a', 16.0).unwrap().width, 8);
/// ```
pub trait GlyphRasterizer {
    /// Render `ch` at `font_size` pixels.
    ///
    /// # Errors
    /// Backend-specific failures are reported as [`crate::error::ConvertError::Raster`].
    fn render_glyph(&self, ch: char, font_size: f32) -> Result<PixelBuffer>;

    /// Font family name, for logs.
    fn family(&self) -> &str;
}

/// Redimensionne une image source vers un buffer RGBA de taille demandée.
///
/// The resampling filter is the backend's choice.
///
/// Implémenté par : `gc_source::resize::Resizer`.
pub trait ImageRasterizer {
    /// Produce a `width × height` RGBA buffer from `image`.
    ///
    /// # Errors
    /// Backend-specific failures are reported as [`crate::error::ConvertError::Raster`].
    fn resize_to_buffer(
        &mut self,
        image: &PixelBuffer,
        width: u32,
        height: u32,
    ) -> Result<PixelBuffer>;
}

/// Fixed monospace glyph box `(round(size * 0.5), round(size))`.
///
/// The half-width ratio approximates common monospace fonts; glyphs are not measured.
///
/// # Example
/// ```
/// use gc_core::traits::glyph_box;
/// assert_eq!(glyph_box(128.0), (64, 128));
/// assert_eq!(glyph_box(3.0), (2, 3));
/// ```
#[must_use]
pub fn glyph_box(font_size: f32) -> (u32, u32) {
    let width = (font_size * 0.5).round().max(0.0) as u32;
    let height = font_size.round().max(0.0) as u32;
    (width, height)
}
