use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gc_ascii::converter::Converter;
use gc_ascii::profiler::ProfileOptions;
use gc_core::config::{AppConfig, FontConfig};
use gc_core::frame::PixelBuffer;
use gc_font::{FontRasterizer, find_system_font};
use gc_source::Resizer;

use crate::cli::Cli;

/// Résout la police : `--font`, puis `font.path`, puis les emplacements connus.
///
/// # Errors
/// Returns an error if no font is given and none of the known locations exists.
pub fn resolve_font(cli_font: Option<&Path>, font: &FontConfig) -> Result<PathBuf> {
    if let Some(path) = cli_font.or(font.path.as_deref()) {
        return Ok(path.to_path_buf());
    }
    find_system_font().context(
        "Aucune police trouvée. Utilisez --font ou `font.path` dans la configuration.",
    )
}

/// Image chargée, police et config courantes, plus le convertisseur qui les relie.
pub struct Session {
    converter: Converter<FontRasterizer, Resizer>,
    image: PixelBuffer,
    font_path: PathBuf,
    config: AppConfig,
}

impl Session {
    /// # Errors
    /// Returns an error if the font cannot be loaded.
    pub fn new(image: PixelBuffer, font_path: PathBuf, config: AppConfig) -> Result<Self> {
        let glyphs = FontRasterizer::from_path(&font_path)?;
        let converter = Converter::new(glyphs, Resizer::new(), ProfileOptions::from(&config.font));
        Ok(Self {
            converter,
            image,
            font_path,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// One conversion pass with the current config.
    ///
    /// # Errors
    /// Propagates conversion errors.
    pub fn render(&mut self) -> Result<String> {
        let request = self.config.request();
        Ok(self.converter.convert(&self.image, &request)?)
    }

    /// Switch to a new config. A different font path reloads the font and drops the
    /// cached profiles; on error the session is left as it was.
    ///
    /// # Errors
    /// Returns an error if the new font cannot be loaded.
    pub fn apply_config(&mut self, config: AppConfig, font_path: PathBuf) -> Result<()> {
        if font_path != self.font_path {
            let glyphs = FontRasterizer::from_path(&font_path)?;
            self.converter.set_glyph_rasterizer(glyphs);
            log::info!("Police changée : {}", font_path.display());
            self.font_path = font_path;
        }
        self.converter
            .set_profile_options(ProfileOptions::from(&config.font));
        self.config = config;
        Ok(())
    }
}

/// Écrit le texte dans `path`, ou sur stdout si absent. Ajoute un saut de ligne final.
///
/// # Errors
/// Returns an error if the output cannot be written.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, format!("{text}\n"))
            .with_context(|| format!("Impossible d'écrire {}", path.display())),
        None => {
            let mut out = std::io::stdout().lock();
            writeln!(out, "{text}")?;
            out.flush()?;
            Ok(())
        }
    }
}

/// Boucle de rechargement : une passe par signal, jusqu'à fermeture du canal.
///
/// Bursts of events (editors often write twice) collapse into one pass. A failed
/// pass is logged and the previous output is left untouched.
pub fn watch_loop(cli: &Cli, session: &mut Session, rx: &flume::Receiver<()>) {
    while rx.recv().is_ok() {
        while rx.try_recv().is_ok() {}
        match reload_and_render(cli, session) {
            Ok(text) => {
                if let Err(e) = write_output(cli.output.as_deref(), &text) {
                    log::warn!("Sortie non écrite : {e:#}");
                }
            }
            Err(e) => log::warn!("Rechargement échoué, sortie précédente conservée : {e:#}"),
        }
    }
}

fn reload_and_render(cli: &Cli, session: &mut Session) -> Result<String> {
    let config = cli.effective_config()?;
    let font_path = resolve_font(cli.font.as_deref(), &config.font)?;
    session.apply_config(config, font_path)?;
    let text = session.render()?;
    let conv = &session.config().conversion;
    log::info!(
        "Config rechargée depuis {} ({}×{})",
        cli.config.display(),
        conv.width,
        conv.height
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gc_core::charset::CharsetFlags;

    fn small_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.conversion.width = 2;
        config.conversion.height = 2;
        config.charsets = CharsetFlags {
            space: true,
            ..CharsetFlags::none()
        };
        config.font.size = 16.0;
        config
    }

    #[test]
    fn cli_font_wins_over_config() {
        let font = FontConfig {
            path: Some(PathBuf::from("/from/config.ttf")),
            ..FontConfig::default()
        };
        let path = resolve_font(Some(Path::new("/from/cli.ttf")), &font).unwrap();
        assert_eq!(path, PathBuf::from("/from/cli.ttf"));
        let path = resolve_font(None, &font).unwrap();
        assert_eq!(path, PathBuf::from("/from/config.ttf"));
    }

    #[test]
    fn output_file_gets_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_output(Some(&path), "ab\ncd").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ab\ncd\n");
    }

    #[test]
    fn missing_font_fails_session() {
        let image = PixelBuffer::filled(4, 4, [255, 255, 255, 255]);
        let res = Session::new(image, PathBuf::from("/nonexistent/font.ttf"), small_config());
        assert!(res.is_err());
    }

    #[test]
    fn session_renders_and_survives_bad_font_switch() {
        let Some(font) = find_system_font() else {
            return;
        };
        let image = PixelBuffer::filled(8, 8, [255, 255, 255, 255]);
        let Ok(mut session) = Session::new(image, font.clone(), small_config()) else {
            return;
        };
        assert_eq!(session.render().unwrap(), "  \n  ");

        let mut wider = small_config();
        wider.conversion.width = 3;
        assert!(
            session
                .apply_config(wider.clone(), PathBuf::from("/nonexistent/font.ttf"))
                .is_err()
        );
        assert_eq!(session.config().conversion.width, 2);

        session.apply_config(wider, font).unwrap();
        assert_eq!(session.render().unwrap(), "   \n   ");
    }
}
