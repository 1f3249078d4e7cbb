use anyhow::Result;
use clap::Parser;

pub mod cli;
pub mod hotreload;
pub mod pipeline;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Config effective (fichier ou défauts, puis overrides CLI)
    let config = cli.effective_config()?;

    // 4. Police et image
    let font_path = pipeline::resolve_font(cli.font.as_deref(), &config.font)?;
    let image = gc_source::image::load_image(&cli.image)?;

    // 5. Première passe
    let mut session = pipeline::Session::new(image, font_path, config)?;
    let text = session.render()?;
    pipeline::write_output(cli.output.as_deref(), &text)?;

    // 6. Mode watch : re-rendu à chaque modification de la config
    if cli.watch {
        let (tx, rx) = flume::unbounded();
        let _watcher = hotreload::spawn_config_watcher(&cli.config, tx)?;
        pipeline::watch_loop(&cli, &mut session, &rx);
    }

    Ok(())
}
