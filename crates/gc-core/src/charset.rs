use serde::{Deserialize, Serialize};

/// Inclusive codepoint range `(min, max)`.
pub type CodepointRange = (u32, u32);

/// Espace seul.
pub const RANGES_SPACE: &[CodepointRange] = &[(32, 32)];

/// Caractères imprimables du clavier (sans l'espace).
pub const RANGES_KEYBOARD: &[CodepointRange] = &[(33, 126)];

/// Box drawing U+2500–U+257F, plus □ (U+25A1).
pub const RANGES_LINES: &[CodepointRange] = &[(9472, 9599), (9633, 9633)];

/// Blocs ▀ ▄ █ et ombrages ░ ▒ ▓.
pub const RANGES_BLOCKS: &[CodepointRange] =
    &[(9600, 9600), (9604, 9604), (9608, 9608), (9617, 9619)];

/// Catégorie de caractères candidats. Ensemble fermé.
///
/// # Example
/// ```
/// use gc_core::charset::Category;
/// assert_eq!(Category::Keyboard.len(), 94);
/// assert_eq!(Category::ALL.iter().map(|c| c.len()).sum::<usize>(), 230);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Space,
    Keyboard,
    Lines,
    Blocks,
}

impl Category {
    /// Every category, in active-set order.
    pub const ALL: [Category; 4] = [
        Category::Space,
        Category::Keyboard,
        Category::Lines,
        Category::Blocks,
    ];

    /// The fixed codepoint ranges of this category.
    #[must_use]
    pub const fn ranges(self) -> &'static [CodepointRange] {
        match self {
            Category::Space => RANGES_SPACE,
            Category::Keyboard => RANGES_KEYBOARD,
            Category::Lines => RANGES_LINES,
            Category::Blocks => RANGES_BLOCKS,
        }
    }

    /// Number of characters in this category.
    #[must_use]
    pub fn len(self) -> usize {
        ranges_len(self.ranges())
    }

    /// Always false: every category holds at least one character.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Category::Space => "space",
            Category::Keyboard => "keyboard",
            Category::Lines => "lines",
            Category::Blocks => "blocks",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Total number of codepoints covered by `ranges` (`Σ max - min + 1`).
///
/// Reversed ranges count as empty.
#[must_use]
pub fn ranges_len(ranges: &[CodepointRange]) -> usize {
    ranges
        .iter()
        .map(|&(min, max)| if max >= min { (max - min) as usize + 1 } else { 0 })
        .sum()
}

/// Catégories actives pour une passe de conversion.
///
/// # Example
/// ```
/// use gc_core::charset::{CharsetFlags, Category};
/// let flags = CharsetFlags { lines: false, ..CharsetFlags::default() };
/// assert_eq!(flags.enabled().collect::<Vec<_>>(),
///            vec![Category::Space, Category::Keyboard, Category::Blocks]);
/// ```
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CharsetFlags {
    pub space: bool,
    pub keyboard: bool,
    pub lines: bool,
    pub blocks: bool,
}

impl Default for CharsetFlags {
    fn default() -> Self {
        Self::all()
    }
}

impl CharsetFlags {
    #[must_use]
    pub const fn all() -> Self {
        Self {
            space: true,
            keyboard: true,
            lines: true,
            blocks: true,
        }
    }

    #[must_use]
    pub const fn none() -> Self {
        Self {
            space: false,
            keyboard: false,
            lines: false,
            blocks: false,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self, category: Category) -> bool {
        match category {
            Category::Space => self.space,
            Category::Keyboard => self.keyboard,
            Category::Lines => self.lines,
            Category::Blocks => self.blocks,
        }
    }

    /// Enabled categories in the fixed order space, keyboard, lines, blocks.
    pub fn enabled(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(move |c| self.is_enabled(*c))
    }

    #[must_use]
    pub fn any(&self) -> bool {
        self.enabled().next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_category_sizes() {
        assert_eq!(Category::Space.len(), 1);
        assert_eq!(Category::Keyboard.len(), 94);
        assert_eq!(Category::Lines.len(), 129);
        assert_eq!(Category::Blocks.len(), 6);
    }

    #[test]
    fn reversed_range_is_empty() {
        assert_eq!(ranges_len(&[(10, 5)]), 0);
        assert_eq!(ranges_len(&[(5, 5), (1, 3)]), 4);
    }

    #[test]
    fn no_flags_means_nothing_enabled() {
        assert!(!CharsetFlags::none().any());
        assert_eq!(CharsetFlags::all().enabled().count(), 4);
    }
}
