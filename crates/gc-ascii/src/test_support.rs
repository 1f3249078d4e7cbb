//! Synthetic backends for unit tests.

use std::cell::Cell;

use gc_core::error::{ConvertError, Result};
use gc_core::frame::PixelBuffer;
use gc_core::traits::{GlyphRasterizer, ImageRasterizer, glyph_box};

const INK: [u8; 4] = [0, 0, 0, 255];

/// Inks whole quadrants from the low four bits of the codepoint:
/// bit0 = TL, bit1 = TR, bit2 = BL, bit3 = BR.
#[derive(Default)]
pub struct QuadrantGlyphs {
    pub calls: Cell<usize>,
}

impl QuadrantGlyphs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GlyphRasterizer for QuadrantGlyphs {
    fn render_glyph(&self, ch: char, font_size: f32) -> Result<PixelBuffer> {
        self.calls.set(self.calls.get() + 1);
        let (w, h) = glyph_box(font_size);
        let mut fb = PixelBuffer::new(w, h);
        let (hw, hh) = (w / 2, h / 2);
        let bits = u32::from(ch) & 0b1111;
        for (bit, (qx, qy)) in [(0, 0), (hw, 0), (0, hh), (hw, hh)].into_iter().enumerate() {
            if bits & (1 << bit) == 0 {
                continue;
            }
            for y in qy..qy + hh {
                for x in qx..qx + hw {
                    fb.set_pixel(x, y, INK);
                }
            }
        }
        Ok(fb)
    }

    fn family(&self) -> &str {
        "quadrants"
    }
}

/// Inks the left half of the top-left quadrant only.
pub struct HalfInkGlyphs;

impl GlyphRasterizer for HalfInkGlyphs {
    fn render_glyph(&self, _ch: char, font_size: f32) -> Result<PixelBuffer> {
        let (w, h) = glyph_box(font_size);
        let mut fb = PixelBuffer::new(w, h);
        for y in 0..h / 2 {
            for x in 0..w / 4 {
                fb.set_pixel(x, y, INK);
            }
        }
        Ok(fb)
    }

    fn family(&self) -> &str {
        "half-ink"
    }
}

/// Returns a buffer one pixel too small.
pub struct WrongSizeGlyphs;

impl GlyphRasterizer for WrongSizeGlyphs {
    fn render_glyph(&self, _ch: char, font_size: f32) -> Result<PixelBuffer> {
        let (w, h) = glyph_box(font_size);
        Ok(PixelBuffer::new(w.saturating_sub(1), h))
    }

    fn family(&self) -> &str {
        "broken"
    }
}

/// Nearest-neighbour resize, counting calls.
#[derive(Default)]
pub struct NearestResizer {
    pub calls: usize,
}

impl ImageRasterizer for NearestResizer {
    fn resize_to_buffer(
        &mut self,
        image: &PixelBuffer,
        width: u32,
        height: u32,
    ) -> Result<PixelBuffer> {
        self.calls += 1;
        if image.width == 0 || image.height == 0 {
            return Err(ConvertError::Raster("image vide".into()));
        }
        let mut out = PixelBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let sx = x * image.width / width;
                let sy = y * image.height / height;
                let (r, g, b, a) = image.pixel(sx, sy);
                out.set_pixel(x, y, [r, g, b, a]);
            }
        }
        Ok(out)
    }
}
