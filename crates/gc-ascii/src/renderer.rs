use gc_core::config::ConversionSettings;
use gc_core::error::{ConvertError, Result};
use gc_core::frame::{CharGrid, PixelBuffer};
use gc_core::glyph::DisplayChar;
use rayon::prelude::*;

use crate::matcher::BlockMatcher;
use crate::quadrant::block_brightness;

/// Check that `buffer` splits into exactly `settings.width × settings.height` 2×2 blocks.
///
/// # Errors
/// [`ConvertError::Dimension`] if the grid is empty, the buffer has an odd side,
/// or the buffer is not `2 * width × 2 * height`.
pub fn validate_dimensions(buffer: &PixelBuffer, settings: &ConversionSettings) -> Result<()> {
    if settings.width == 0 || settings.height == 0 {
        return Err(ConvertError::Dimension {
            width: settings.width,
            height: settings.height,
        });
    }
    let bad_buffer = ConvertError::Dimension {
        width: buffer.width,
        height: buffer.height,
    };
    if buffer.width == 0 || buffer.height == 0 || buffer.width % 2 != 0 || buffer.height % 2 != 0
    {
        return Err(bad_buffer);
    }
    if u64::from(buffer.width) != u64::from(settings.width) * 2
        || u64::from(buffer.height) != u64::from(settings.height) * 2
    {
        return Err(bad_buffer);
    }
    Ok(())
}

/// Match every 2×2 block of `buffer` against `active_set`.
///
/// Rows are processed in parallel; the result does not depend on scheduling.
///
/// # Errors
/// [`ConvertError::Dimension`] (see [`validate_dimensions`]) or
/// [`ConvertError::EmptyCharset`]. Nothing is returned on failure.
///
/// # Example
/// ```
/// use gc_core::config::ConversionSettings;
/// use gc_core::frame::PixelBuffer;
/// use gc_core::glyph::{CharBrightness, DisplayChar};
/// use gc_ascii::renderer::render_grid;
///
/// let buffer = PixelBuffer::filled(4, 2, [255, 255, 255, 255]);
/// let set = [DisplayChar::new('.', CharBrightness::uniform(250.0))];
/// let settings = ConversionSettings { width: 2, height: 1, ..Default::default() };
/// let grid = render_grid(&buffer, &set, &settings).unwrap();
/// assert_eq!(grid.to_text(), "..");
/// ```
pub fn render_grid(
    buffer: &PixelBuffer,
    active_set: &[DisplayChar],
    settings: &ConversionSettings,
) -> Result<CharGrid> {
    validate_dimensions(buffer, settings)?;
    if active_set.is_empty() {
        return Err(ConvertError::EmptyCharset);
    }

    let matcher = BlockMatcher::from_settings(settings);
    let columns = settings.width as usize;
    let mut cells = vec![' '; columns * settings.height as usize];

    cells
        .par_chunks_mut(columns)
        .enumerate()
        .try_for_each(|(by, row)| -> Result<()> {
            for (bx, cell) in row.iter_mut().enumerate() {
                let block = block_brightness(buffer, bx as u32, by as u32);
                *cell = matcher.match_block(&block, active_set)?;
            }
            Ok(())
        })?;

    CharGrid::from_cells(settings.width, settings.height, cells)
}

/// [`render_grid`] joined as text: one line per row, `\n` separated.
///
/// # Errors
/// Same as [`render_grid`].
pub fn render(
    buffer: &PixelBuffer,
    active_set: &[DisplayChar],
    settings: &ConversionSettings,
) -> Result<String> {
    render_grid(buffer, active_set, settings).map(|grid| grid.to_text())
}
