use crate::error::{ConvertError, Result};

/// Buffer de pixels RGBA, row-major, 4 bytes par pixel.
///
/// Produit par les backends de rasterisation, consommé en lecture seule.
///
/// # Example
/// ```
/// use gc_core::frame::PixelBuffer;
/// let fb = PixelBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelBuffer {
    /// Crée un buffer transparent aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use gc_core::frame::PixelBuffer;
    /// let fb = PixelBuffer::new(100, 50);
    /// assert_eq!(fb.width, 100);
    /// assert_eq!(fb.height, 50);
    /// assert_eq!(fb.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Buffer where every pixel has the same RGBA value.
    ///
    /// # Example
    /// ```
    /// use gc_core::frame::PixelBuffer;
    /// let fb = PixelBuffer::filled(2, 2, [0, 0, 0, 255]);
    /// assert_eq!(fb.pixel(1, 1), (0, 0, 0, 255));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * 4);
        for _ in 0..count {
            data.extend_from_slice(&rgba);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Wrap raw RGBA bytes.
    ///
    /// # Errors
    /// Returns [`ConvertError::InvalidInput`] if `data.len() != width * height * 4`.
    ///
    /// # Example
    /// ```
    /// use gc_core::frame::PixelBuffer;
    /// assert!(PixelBuffer::from_rgba(1, 1, vec![1, 2, 3, 4]).is_ok());
    /// assert!(PixelBuffer::from_rgba(2, 1, vec![1, 2, 3, 4]).is_err());
    /// ```
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(ConvertError::InvalidInput(format!(
                "buffer RGBA de {} octets, {expected} attendus pour {width}×{height}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    ///
    /// # Example
    /// ```
    /// use gc_core::frame::PixelBuffer;
    /// let fb = PixelBuffer::new(10, 10);
    /// assert_eq!(fb.pixel(0, 0), (0, 0, 0, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        if idx + 3 >= self.data.len() {
            return (0, 0, 0, 0);
        }
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// Write pixel (x, y). Out-of-bounds writes are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&rgba);
    }
}

/// Grille de sortie : un caractère par bloc 2×2, row-major.
///
/// # Example
/// ```
/// use gc_core::frame::CharGrid;
/// let grid = CharGrid::from_cells(2, 2, vec!['@', ' ', ' ', ' ']).unwrap();
/// assert_eq!(grid.rows().next(), Some(&['@', ' '][..]));
/// assert_eq!(grid.to_text(), "@ \n  ");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharGrid {
    /// Flat array of characters, row-major.
    pub cells: Vec<char>,
    /// Width in characters.
    pub width: u32,
    /// Height in characters.
    pub height: u32,
}

impl CharGrid {
    /// Build a grid from already matched cells.
    ///
    /// # Errors
    /// Returns [`ConvertError::Dimension`] if `cells.len() != width * height`.
    pub fn from_cells(width: u32, height: u32, cells: Vec<char>) -> Result<Self> {
        if cells.len() != width as usize * height as usize {
            return Err(ConvertError::Dimension { width, height });
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Iterate over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Join each row into a line and the lines with `\n` (no trailing newline).
    #[must_use]
    pub fn to_text(&self) -> String {
        if self.width == 0 || self.height == 0 {
            return String::new();
        }
        let mut out = String::with_capacity(self.cells.len() * 3 + self.height as usize);
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter());
        }
        out
    }
}
