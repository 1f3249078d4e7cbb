use thiserror::Error;

/// Errors raised by the conversion engine.
///
/// Every variant is deterministic: retrying with the same input reproduces it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Input rejected before any work was done (not a single character, bad font size...).
    #[error("Entrée invalide : {0}")]
    InvalidInput(String),

    /// Matching attempted with no candidate character.
    #[error("Aucun caractère actif : activez au moins une catégorie de charset")]
    EmptyCharset,

    /// Pixel buffer or grid dimensions unusable (odd, zero, or inconsistent).
    #[error("Dimensions invalides : {width}×{height}")]
    Dimension {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// A rasterization backend failed or returned an unexpected buffer.
    #[error("Erreur de rasterisation : {0}")]
    Raster(String),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
