/* src/cli/core/src/watch.rs */

// `pagekit watch`: re-run generation whenever the pages directory or the
// config file changes. Definitions are compiled into the binary, so edits to
// definition files only take effect after a rebuild.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use pagekit::DefinitionSource;
use tokio::signal;
use tokio::sync::mpsc;

use crate::config::{PagekitConfig, load_config};
use crate::generate::run_generate;
use crate::ui::{self, DIM, RESET};

const DEBOUNCE: Duration = Duration::from_millis(300);

fn setup_watcher() -> Result<(RecommendedWatcher, mpsc::Receiver<Vec<PathBuf>>)> {
  let (tx, rx) = mpsc::channel(16);
  let watcher = RecommendedWatcher::new(
    move |res: std::result::Result<notify::Event, notify::Error>| {
      if let Ok(event) = res {
        let _ = tx.blocking_send(event.paths);
      }
    },
    notify::Config::default(),
  )?;
  Ok((watcher, rx))
}

pub fn run_watch(config_path: &Path, source: &dyn DefinitionSource) -> Result<()> {
  let runtime = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("failed to start async runtime")?;
  runtime.block_on(watch_loop(config_path, source))
}

async fn watch_loop(config_path: &Path, source: &dyn DefinitionSource) -> Result<()> {
  let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
  let mut config = load_config(config_path)?;
  regenerate(&config, base_dir, source);

  let (mut watcher, mut rx) = setup_watcher()?;
  let mut pages_dir = base_dir.join(&config.pages.dir);
  watcher
    .watch(&pages_dir, RecursiveMode::Recursive)
    .with_context(|| format!("failed to watch {}", pages_dir.display()))?;
  watcher
    .watch(config_path, RecursiveMode::NonRecursive)
    .with_context(|| format!("failed to watch {}", config_path.display()))?;
  ui::arrow(&format!("watching {} {DIM}(ctrl-c to stop){RESET}", pages_dir.display()));

  loop {
    tokio::select! {
      _ = signal::ctrl_c() => {
        ui::blank();
        ui::detail(&format!("{DIM}stopped watching{RESET}"));
        break;
      }
      Some(paths) = rx.recv() => {
        // Debounce: wait, then drain everything that piled up
        tokio::time::sleep(DEBOUNCE).await;
        let mut changed = paths;
        while let Ok(more) = rx.try_recv() {
          changed.extend(more);
        }

        if changed.iter().any(|p| p.file_name() == config_path.file_name()) {
          match load_config(config_path) {
            Ok(fresh) => {
              ui::arrow("config changed, reloaded");
              if let Some(moved) = moved_pages_dir(base_dir, &pages_dir, &fresh)
                && rewatch(&mut watcher, &pages_dir, &moved)
              {
                pages_dir = moved;
              }
              config = fresh;
            }
            Err(err) => {
              ui::fail(&format!("{err:#}"));
              continue;
            }
          }
        }
        if changed.iter().any(|p| is_definition(&config, p)) {
          ui::warn("definition file changed; rebuild the binary for the new definition to take effect");
        }
        regenerate(&config, base_dir, source);
      }
    }
  }
  Ok(())
}

/// New pages directory when a reloaded config points somewhere else.
fn moved_pages_dir(base_dir: &Path, current: &Path, config: &PagekitConfig) -> Option<PathBuf> {
  let next = base_dir.join(&config.pages.dir);
  (next != current).then_some(next)
}

/// Swap the recursive watch over to `next`. On failure the old directory
/// stays current so the next reload retries.
fn rewatch(watcher: &mut RecommendedWatcher, current: &Path, next: &Path) -> bool {
  if let Err(err) = watcher.unwatch(current) {
    tracing::debug!(dir = %current.display(), "unwatch failed: {err}");
  }
  match watcher.watch(next, RecursiveMode::Recursive) {
    Ok(()) => {
      ui::arrow(&format!("watching {}", next.display()));
      true
    }
    Err(err) => {
      ui::fail(&format!("failed to watch {}: {err}", next.display()));
      false
    }
  }
}

fn is_definition(config: &PagekitConfig, path: &Path) -> bool {
  path.to_str().is_some_and(|p| p.ends_with(config.pages.definition_suffix.as_str()))
}

fn regenerate(config: &PagekitConfig, base_dir: &Path, source: &dyn DefinitionSource) {
  tracing::debug!("regenerating");
  if let Err(err) = run_generate(config, base_dir, source, false) {
    ui::fail(&format!("{err:#}"));
  }
}
