use std::path::Path;

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};

/// Surveille le fichier config et envoie un signal à chaque modification.
///
/// The parent directory is watched rather than the file itself: editors that save
/// by renaming a temporary file over the config replace its inode, which would end
/// a watch placed on the file. Only events naming the config file are forwarded.
/// Reloading happens on the receiving side so passes stay serialized. Returns the
/// watcher, which must stay alive for as long as events are wanted.
///
/// # Errors
/// Returns an error if the path has no file name, the watcher cannot be created, or
/// the parent directory cannot be watched.
///
/// # Example
/// ```no_run
/// use gc_app::hotreload::spawn_config_watcher;
/// use std::path::Path;
///
/// let (tx, rx) = flume::unbounded();
/// let _watcher = spawn_config_watcher(Path::new("config/default.toml"), tx).unwrap();
/// while rx.recv().is_ok() { /* reload */ }
/// ```
pub fn spawn_config_watcher(
    config_path: &Path,
    tx: flume::Sender<()>,
) -> Result<impl Watcher + use<>> {
    let name = config_path
        .file_name()
        .with_context(|| format!("Chemin de config sans nom de fichier : {}", config_path.display()))?
        .to_os_string();
    let dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event)
            if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
                && event.paths.iter().any(|p| p.file_name() == Some(name.as_os_str())) =>
        {
            // Récepteur fermé = boucle principale terminée.
            let _ = tx.send(());
        }
        Ok(_) => {}
        Err(e) => log::warn!("Erreur du watcher config : {e}"),
    })?;

    watcher
        .watch(dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Impossible de surveiller {}", dir.display()))?;
    log::info!("Surveillance de {}", config_path.display());
    Ok(watcher)
}
