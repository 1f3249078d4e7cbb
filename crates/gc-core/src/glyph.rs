/// Brightness of the four quadrants of a region: `[top_left, top_right, bottom_left, bottom_right]`.
///
/// Scale is roughly 0–255 but values are not clamped.
///
/// # Example
/// ```
/// use gc_core::glyph::CharBrightness;
/// let b = CharBrightness::uniform(255.0);
/// assert_eq!(b.top_right(), 255.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CharBrightness(pub [f64; 4]);

impl CharBrightness {
    /// Index of the top-left quadrant.
    pub const TOP_LEFT: usize = 0;
    /// Index of the top-right quadrant.
    pub const TOP_RIGHT: usize = 1;
    /// Index of the bottom-left quadrant.
    pub const BOTTOM_LEFT: usize = 2;
    /// Index of the bottom-right quadrant.
    pub const BOTTOM_RIGHT: usize = 3;

    #[must_use]
    pub const fn new(top_left: f64, top_right: f64, bottom_left: f64, bottom_right: f64) -> Self {
        Self([top_left, top_right, bottom_left, bottom_right])
    }

    /// Same value in every quadrant.
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self([value; 4])
    }

    #[must_use]
    pub fn top_left(&self) -> f64 {
        self.0[Self::TOP_LEFT]
    }

    #[must_use]
    pub fn top_right(&self) -> f64 {
        self.0[Self::TOP_RIGHT]
    }

    #[must_use]
    pub fn bottom_left(&self) -> f64 {
        self.0[Self::BOTTOM_LEFT]
    }

    #[must_use]
    pub fn bottom_right(&self) -> f64 {
        self.0[Self::BOTTOM_RIGHT]
    }

    /// Apply `f` to every quadrant.
    #[must_use]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self(self.0.map(f))
    }

    /// Sum of absolute per-quadrant differences.
    ///
    /// # Example
    /// ```
    /// use gc_core::glyph::CharBrightness;
    /// let a = CharBrightness::new(0.0, 10.0, 20.0, 30.0);
    /// let b = CharBrightness::uniform(10.0);
    /// assert_eq!(a.l1_distance(&b), 10.0 + 0.0 + 10.0 + 20.0);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn l1_distance(&self, other: &Self) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).abs())
            .sum()
    }
}

/// A candidate character and its quadrant brightness profile.
///
/// Built once per (character, font, size, weight) and never mutated afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayChar {
    ch: char,
    brightness: CharBrightness,
}

impl DisplayChar {
    #[must_use]
    pub const fn new(ch: char, brightness: CharBrightness) -> Self {
        Self { ch, brightness }
    }

    #[must_use]
    pub const fn ch(&self) -> char {
        self.ch
    }

    #[must_use]
    pub const fn brightness(&self) -> &CharBrightness {
        &self.brightness
    }
}
