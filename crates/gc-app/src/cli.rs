use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use gc_core::config::{AppConfig, load_config};

/// glyphcii — Image to ASCII/Unicode art by glyph brightness matching.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF).
    #[arg(long)]
    pub image: PathBuf,

    /// Police TTF/OTF. Prioritaire sur `font.path` de la config.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Largeur de sortie en caractères.
    #[arg(long)]
    pub width: Option<u32>,

    /// Hauteur de sortie en caractères.
    #[arg(long)]
    pub height: Option<u32>,

    /// Multiplicateur de contraste.
    #[arg(long)]
    pub contrast: Option<f32>,

    /// Offset de luminosité (-255..255).
    #[arg(long, allow_negative_numbers = true)]
    pub brightness: Option<f32>,

    /// Inverser la luminosité de l'image.
    #[arg(long, default_value_t = false)]
    pub invert: bool,

    /// Exclure l'espace.
    #[arg(long, default_value_t = false)]
    pub no_space: bool,

    /// Exclure les caractères clavier (ASCII imprimable).
    #[arg(long, default_value_t = false)]
    pub no_keyboard: bool,

    /// Exclure les traits de boîte.
    #[arg(long, default_value_t = false)]
    pub no_lines: bool,

    /// Exclure les blocs et ombrages.
    #[arg(long, default_value_t = false)]
    pub no_blocks: bool,

    /// Fichier de sortie. Défaut : stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Re-rendre à chaque modification du fichier de configuration.
    #[arg(long, default_value_t = false)]
    pub watch: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config.
    ///
    /// Flags only ever switch things on (`--invert`) or off (`--no-*`); a flag left
    /// out keeps the config value.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        let conv = &mut config.conversion;
        if let Some(w) = self.width {
            conv.width = w;
        }
        if let Some(h) = self.height {
            conv.height = h;
        }
        if let Some(c) = self.contrast {
            conv.contrast = c;
        }
        if let Some(b) = self.brightness {
            conv.brightness = b;
        }
        if self.invert {
            conv.invert_colour = true;
        }

        let flags = &mut config.charsets;
        flags.space &= !self.no_space;
        flags.keyboard &= !self.no_keyboard;
        flags.lines &= !self.no_lines;
        flags.blocks &= !self.no_blocks;

        if let Some(ref font) = self.font {
            config.font.path = Some(font.clone());
        }
    }

    /// Config file (or defaults), CLI overrides, then clamping.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn effective_config(&self) -> Result<AppConfig> {
        let mut config = if self.config.exists() {
            load_config(&self.config)?
        } else {
            log::warn!(
                "Config introuvable : {}. Utilisation des défauts.",
                self.config.display()
            );
            AppConfig::default()
        };
        self.apply_overrides(&mut config);
        config.clamp_all();
        Ok(config)
    }
}
