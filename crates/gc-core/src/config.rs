use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::CharsetFlags;

/// Réglages d'une passe de conversion. Valeur immuable, lue seule pendant la passe.
///
/// `width` et `height` sont exprimés en caractères de sortie.
///
/// # Example
/// ```
/// use gc_core::config::ConversionSettings;
/// let s = ConversionSettings::default();
/// assert_eq!(s.contrast, 1.0);
/// assert_eq!((s.width, s.height), (128, 64));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct ConversionSettings {
    /// Multiplicateur appliqué à la luminosité des blocs.
    pub contrast: f32,
    /// Offset ajouté après le contraste.
    pub brightness: f32,
    /// Inverser la luminosité des blocs (`255 - b`).
    pub invert_colour: bool,
    /// Largeur de sortie en caractères.
    pub width: u32,
    /// Hauteur de sortie en caractères.
    pub height: u32,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            contrast: 1.0,
            brightness: 0.0,
            invert_colour: false,
            width: 128,
            height: 64,
        }
    }
}

/// Snapshot built by the caller at trigger time and handed to the converter.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConversionRequest {
    pub settings: ConversionSettings,
    pub charsets: CharsetFlags,
}

/// Glyph profiling parameters.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct FontConfig {
    /// Fichier TTF/OTF. `None` = recherche dans les emplacements connus.
    pub path: Option<PathBuf>,
    /// Taille de rendu des glyphes en pixels.
    pub size: f32,
    /// Exposant de la courbe de luminosité des glyphes.
    pub weight: f32,
    /// Appliquer réellement la courbe `weight` (désactivé : comportement historique).
    pub apply_weight_curve: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: None,
            size: 128.0,
            weight: 0.5,
            apply_weight_curve: false,
        }
    }
}

/// Configuration complète, chargée depuis TOML.
///
/// # Example
/// ```
/// use gc_core::config::AppConfig;
/// let config = AppConfig::default();
/// assert!(config.charsets.keyboard);
/// assert_eq!(config.font.size, 128.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    pub conversion: ConversionSettings,
    pub charsets: CharsetFlags,
    pub font: FontConfig,
}

impl AppConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        let c = &mut self.conversion;
        c.contrast = if c.contrast.is_finite() {
            c.contrast.clamp(0.0, 10.0)
        } else {
            1.0
        };
        c.brightness = if c.brightness.is_finite() {
            c.brightness.clamp(-255.0, 255.0)
        } else {
            0.0
        };
        c.width = c.width.clamp(1, 4096);
        c.height = c.height.clamp(1, 4096);

        let f = &mut self.font;
        f.size = if f.size.is_finite() {
            f.size.clamp(1.0, 1024.0)
        } else {
            128.0
        };
        f.weight = if f.weight.is_finite() {
            f.weight.clamp(0.01, 10.0)
        } else {
            0.5
        };
    }

    /// Snapshot for one conversion pass.
    #[must_use]
    pub fn request(&self) -> ConversionRequest {
        ConversionRequest {
            settings: self.conversion,
            charsets: self.charsets,
        }
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize, Default)]
struct ConfigFile {
    conversion: Option<ConversionSection>,
    charsets: Option<CharsetsSection>,
    font: Option<FontSection>,
}

#[derive(Deserialize)]
struct ConversionSection {
    contrast: Option<f32>,
    brightness: Option<f32>,
    invert_colour: Option<bool>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Deserialize)]
struct CharsetsSection {
    space: Option<bool>,
    keyboard: Option<bool>,
    lines: Option<bool>,
    blocks: Option<bool>,
}

#[derive(Deserialize)]
struct FontSection {
    path: Option<PathBuf>,
    size: Option<f32>,
    weight: Option<f32>,
    apply_weight_curve: Option<bool>,
}

/// Parse TOML text and merge it onto the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML for this schema.
///
/// # Example
/// ```
/// use gc_core::config::parse_config;
/// let config = parse_config("[conversion]\nwidth = 40\n").unwrap();
/// assert_eq!(config.conversion.width, 40);
/// assert_eq!(config.conversion.height, 64);
/// ```
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = AppConfig::default();

    if let Some(c) = file.conversion {
        let s = &mut config.conversion;
        if let Some(v) = c.contrast {
            s.contrast = v;
        }
        if let Some(v) = c.brightness {
            s.brightness = v;
        }
        if let Some(v) = c.invert_colour {
            s.invert_colour = v;
        }
        if let Some(v) = c.width {
            s.width = v;
        }
        if let Some(v) = c.height {
            s.height = v;
        }
    }

    if let Some(c) = file.charsets {
        let flags = &mut config.charsets;
        if let Some(v) = c.space {
            flags.space = v;
        }
        if let Some(v) = c.keyboard {
            flags.keyboard = v;
        }
        if let Some(v) = c.lines {
            flags.lines = v;
        }
        if let Some(v) = c.blocks {
            flags.blocks = v;
        }
    }

    if let Some(f) = file.font {
        let font = &mut config.font;
        if f.path.is_some() {
            font.path = f.path;
        }
        if let Some(v) = f.size {
            font.size = v;
        }
        if let Some(v) = f.weight {
            font.weight = v;
        }
        if let Some(v) = f.apply_weight_curve {
            font.apply_weight_curve = v;
        }
    }

    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use gc_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Configuration invalide dans {}", path.display()))?;
    log::debug!("Config chargée depuis {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_sections_merge_onto_defaults() {
        let config = parse_config(
            r#"
[conversion]
contrast = 1.5
invert_colour = true

[charsets]
lines = false

[font]
path = "/tmp/mono.ttf"
apply_weight_curve = true
"#,
        )
        .unwrap();
        assert_eq!(config.conversion.contrast, 1.5);
        assert!(config.conversion.invert_colour);
        assert_eq!(config.conversion.width, 128);
        assert!(!config.charsets.lines);
        assert!(config.charsets.blocks);
        assert_eq!(config.font.path, Some(PathBuf::from("/tmp/mono.ttf")));
        assert!(config.font.apply_weight_curve);
        assert_eq!(config.font.weight, 0.5);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = parse_config(
            "[conversion]\ncontrast = 99.0\nbrightness = -1000.0\nwidth = 0\n[font]\nsize = 0.0\n",
        )
        .unwrap();
        assert_eq!(config.conversion.contrast, 10.0);
        assert_eq!(config.conversion.brightness, -255.0);
        assert_eq!(config.conversion.width, 1);
        assert_eq!(config.font.size, 1.0);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(parse_config("[conversion\nwidth = ").is_err());
        assert!(parse_config("[conversion]\nwidth = \"large\"\n").is_err());
    }

    #[test]
    fn load_config_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[conversion]\nheight = 12").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.conversion.height, 12);
    }

    #[test]
    fn load_config_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn request_snapshots_settings_and_flags() {
        let mut config = AppConfig::default();
        config.charsets.space = false;
        let request = config.request();
        assert_eq!(request.settings, config.conversion);
        assert!(!request.charsets.space);
    }
}
