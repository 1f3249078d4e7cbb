use gc_core::config::ConversionSettings;
use gc_core::error::{ConvertError, Result};
use gc_core::glyph::{CharBrightness, DisplayChar};

/// Recherche du caractère le plus proche d'un bloc (distance L1 sur 4 quadrants).
///
/// The block vector is adjusted before comparison:
/// `(invert ? 255 - b : b) * contrast + brightness`. Candidate profiles are never
/// adjusted. Ties keep the first candidate in iteration order.
///
/// # Example
/// ```
/// use gc_core::glyph::{CharBrightness, DisplayChar};
/// use gc_ascii::matcher::BlockMatcher;
///
/// let set = [
///     DisplayChar::new(' ', CharBrightness::uniform(255.0)),
///     DisplayChar::new('#', CharBrightness::uniform(0.0)),
/// ];
/// let matcher = BlockMatcher::new(1.0, 0.0, false);
/// assert_eq!(matcher.match_block(&CharBrightness::uniform(20.0), &set).unwrap(), '#');
/// assert_eq!(matcher.match_block(&CharBrightness::uniform(240.0), &set).unwrap(), ' ');
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockMatcher {
    contrast: f64,
    brightness: f64,
    invert_colour: bool,
}

impl Default for BlockMatcher {
    fn default() -> Self {
        Self::new(1.0, 0.0, false)
    }
}

impl BlockMatcher {
    #[must_use]
    pub const fn new(contrast: f64, brightness: f64, invert_colour: bool) -> Self {
        Self {
            contrast,
            brightness,
            invert_colour,
        }
    }

    /// Matcher for `settings`, widened to `f64` like the brightness vectors.
    #[must_use]
    pub fn from_settings(settings: &ConversionSettings) -> Self {
        Self::new(
            f64::from(settings.contrast),
            f64::from(settings.brightness),
            settings.invert_colour,
        )
    }

    /// Block vector after inversion, contrast and brightness offset.
    ///
    /// # Example
    /// ```
    /// use gc_core::glyph::CharBrightness;
    /// use gc_ascii::matcher::BlockMatcher;
    /// let m = BlockMatcher::new(2.0, 10.0, true);
    /// assert_eq!(m.adjust(&CharBrightness::uniform(55.0)).0, [410.0; 4]);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn adjust(&self, block: &CharBrightness) -> CharBrightness {
        block.map(|b| {
            let b = if self.invert_colour { 255.0 - b } else { b };
            b * self.contrast + self.brightness
        })
    }

    /// Best matching character of `candidates` for `block`.
    ///
    /// # Errors
    /// [`ConvertError::EmptyCharset`] if `candidates` is empty.
    pub fn match_block(&self, block: &CharBrightness, candidates: &[DisplayChar]) -> Result<char> {
        let adjusted = self.adjust(block);
        let (first, rest) = candidates
            .split_first()
            .ok_or(ConvertError::EmptyCharset)?;

        let mut best = first.ch();
        let mut best_distance = adjusted.l1_distance(first.brightness());
        for candidate in rest {
            let distance = adjusted.l1_distance(candidate.brightness());
            if distance < best_distance {
                best = candidate.ch();
                best_distance = distance;
            }
        }
        Ok(best)
    }
}

/// One-shot form of [`BlockMatcher::match_block`].
///
/// # Errors
/// [`ConvertError::EmptyCharset`] if `candidates` is empty.
pub fn find_best_match(
    block: &CharBrightness,
    candidates: &[DisplayChar],
    contrast: f64,
    brightness: f64,
    invert_colour: bool,
) -> Result<char> {
    BlockMatcher::new(contrast, brightness, invert_colour).match_block(block, candidates)
}
