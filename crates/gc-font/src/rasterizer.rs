use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontVec, PxScale, point};
use anyhow::{Context, Result};
use gc_core::error::Result as ConvertResult;
use gc_core::frame::PixelBuffer;
use gc_core::traits::{GlyphRasterizer, glyph_box};

/// Emplacements usuels de polices monospace, essayés dans l'ordre.
pub const KNOWN_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansMono-Regular.ttf",
    "/System/Library/Fonts/Menlo.ttc",
    "/Library/Fonts/Courier New.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
    "C:\\Windows\\Fonts\\cour.ttf",
];

/// First existing file of [`KNOWN_FONT_PATHS`].
#[must_use]
pub fn find_system_font() -> Option<PathBuf> {
    KNOWN_FONT_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

/// Rasterise un glyphe unique en noir sur fond transparent.
///
/// The glyph is placed at the top-left of a fixed `(size / 2, size)` box with its
/// ascent on the top edge. Coverage becomes alpha; colour channels stay black.
/// Glyphs missing from the font (`.notdef`) render as an empty box.
pub struct FontRasterizer {
    font: FontVec,
    family: String,
}

impl FontRasterizer {
    /// Parse a TTF/OTF font from memory.
    ///
    /// # Errors
    /// Retourne une erreur si la police fournie est invalide.
    ///
    /// # Example
    /// ```
    /// use gc_font::FontRasterizer;
    /// assert!(FontRasterizer::from_bytes(vec![0; 16], "junk").is_err());
    /// ```
    pub fn from_bytes(data: Vec<u8>, family: impl Into<String>) -> Result<Self> {
        let family = family.into();
        let font = FontVec::try_from_vec(data)
            .with_context(|| format!("Police invalide : {family}"))?;
        Ok(Self { font, family })
    }

    /// Load a font file; the family name is the file stem.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid font.
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Impossible de lire la police {}", path.display()))?;
        let family = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("font")
            .to_string();
        let rasterizer = Self::from_bytes(data, family)?;
        log::info!("Police chargée : {}", path.display());
        Ok(rasterizer)
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn render_glyph(&self, ch: char, font_size: f32) -> ConvertResult<PixelBuffer> {
        let (width, height) = glyph_box(font_size);
        let mut buffer = PixelBuffer::new(width, height);

        // glyph_id 0 = .notdef : pas de boîte « tofu » dans les profils.
        let gid = self.font.glyph_id(ch);
        if gid.0 == 0 {
            log::trace!("Glyphe absent de {} : {ch:?}", self.family);
            return Ok(buffer);
        }

        let scale = PxScale::from(font_size);
        let ascent_px = self.font.ascent_unscaled() * scale.y / self.font.height_unscaled();
        let glyph = gid.with_scale_and_position(scale, point(0.0, ascent_px));

        if let Some(outline) = self.font.outline_glyph(glyph) {
            let bounds = outline.px_bounds();
            #[allow(clippy::cast_possible_wrap)]
            outline.draw(|x, y, v| {
                let px = x as i32 + bounds.min.x as i32;
                let py = y as i32 + bounds.min.y as i32;
                if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                    return;
                }
                let idx = (py as usize * width as usize + px as usize) * 4;
                let alpha = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
                let slot = &mut buffer.data[idx + 3];
                *slot = (*slot).max(alpha);
            });
        }

        Ok(buffer)
    }

    fn family(&self) -> &str {
        &self.family
    }
}
