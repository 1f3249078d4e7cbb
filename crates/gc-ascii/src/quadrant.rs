use gc_core::frame::PixelBuffer;
use gc_core::glyph::CharBrightness;

/// Luminosité moyenne d'un sous-rectangle, formule « glyphe ».
///
/// Per pixel accumulates `r + g + b * (a / 255) + 3 * (255 - a)` and divides the total
/// by `pixel_count * 3`. Transparent pixels therefore score as bright background.
/// The blue channel is the only one scaled by alpha; matching quality depends on
/// this exact formula.
///
/// Empty rectangles (`w == 0`, `h == 0`, or fully outside the buffer) return `0.0`.
/// Rectangles overhanging the buffer are clipped.
///
/// # Example
/// ```
/// use gc_core::frame::PixelBuffer;
/// use gc_ascii::quadrant::average_brightness;
///
/// let transparent = PixelBuffer::new(4, 4);
/// assert_eq!(average_brightness(&transparent, 0, 0, 4, 4), 255.0);
/// let ink = PixelBuffer::filled(4, 4, [0, 0, 0, 255]);
/// assert_eq!(average_brightness(&ink, 0, 0, 2, 2), 0.0);
/// assert_eq!(average_brightness(&ink, 0, 0, 0, 2), 0.0);
/// ```
#[must_use]
pub fn average_brightness(buffer: &PixelBuffer, x: u32, y: u32, w: u32, h: u32) -> f64 {
    let x_end = x.saturating_add(w).min(buffer.width);
    let y_end = y.saturating_add(h).min(buffer.height);
    if x >= x_end || y >= y_end {
        return 0.0;
    }

    let mut total = 0.0f64;
    for py in y..y_end {
        for px in x..x_end {
            let (r, g, b, a) = buffer.pixel(px, py);
            let alpha = f64::from(a) / 255.0;
            total += f64::from(r)
                + f64::from(g)
                + f64::from(b) * alpha
                + f64::from(255 - a) * 3.0;
        }
    }

    let count = f64::from(x_end - x) * f64::from(y_end - y);
    total / (count * 3.0)
}

/// Luminosité d'un pixel isolé, composé sur fond blanc.
///
/// `((r + g + b) / 3) * (a / 255) + (255 - a)`.
///
/// # Example
/// ```
/// use gc_ascii::quadrant::pixel_brightness;
/// assert_eq!(pixel_brightness(0, 0, 0, 255), 0.0);
/// assert_eq!(pixel_brightness(255, 255, 255, 255), 255.0);
/// assert_eq!(pixel_brightness(0, 0, 0, 0), 255.0);
/// ```
#[inline(always)]
#[must_use]
pub fn pixel_brightness(r: u8, g: u8, b: u8, a: u8) -> f64 {
    let mean = (f64::from(r) + f64::from(g) + f64::from(b)) / 3.0;
    mean * f64::from(a) / 255.0 + f64::from(255 - a)
}

/// Brightness vector of the 2×2 block at block coordinates `(bx, by)`.
///
/// The caller guarantees the block lies inside the buffer.
#[inline(always)]
#[must_use]
pub fn block_brightness(buffer: &PixelBuffer, bx: u32, by: u32) -> CharBrightness {
    let x = bx * 2;
    let y = by * 2;
    let at = |px, py| {
        let (r, g, b, a) = buffer.pixel(px, py);
        pixel_brightness(r, g, b, a)
    };
    CharBrightness::new(at(x, y), at(x + 1, y), at(x, y + 1), at(x + 1, y + 1))
}

/// Split a whole buffer into four equal quadrants and score each with
/// [`average_brightness`].
///
/// Quadrant size is `(width / 2, height / 2)` with integer halving, so an odd
/// buffer leaves its last column/row out and a 1-pixel buffer yields empty quadrants.
#[must_use]
pub fn region_quadrants(buffer: &PixelBuffer) -> CharBrightness {
    let hw = buffer.width / 2;
    let hh = buffer.height / 2;
    CharBrightness::new(
        average_brightness(buffer, 0, 0, hw, hh),
        average_brightness(buffer, hw, 0, hw, hh),
        average_brightness(buffer, 0, hh, hw, hh),
        average_brightness(buffer, hw, hh, hw, hh),
    )
}
