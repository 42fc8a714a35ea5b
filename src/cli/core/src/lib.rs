/* src/cli/core/src/lib.rs */

// The `pagekit` command. Definitions are compiled into the host application,
// so the application ships its own binary that hands its registry to `run`:
//
//   fn main() -> anyhow::Result<()> {
//     pagekit_cli::run(&my_app::registry())
//   }

mod clean;
mod generate;
mod routes;
mod ui;
mod watch;

pub mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pagekit::DefinitionSource;
use tracing_subscriber::{EnvFilter, fmt};

use config::{PagekitConfig, find_config, load_config};

/// Env var holding a `tracing` filter directive, e.g. `PAGEKIT_LOG=debug`.
pub const LOG_ENV: &str = "PAGEKIT_LOG";

#[derive(Debug, Parser)]
#[command(name = "pagekit", about = "Page route, handler and type generator", version)]
pub struct Cli {
  /// Log debug output to stderr
  #[arg(short, long, global = true)]
  verbose: bool,
  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Generate the route table, handler stubs and page-prop types
  Generate {
    /// Path to pagekit.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Write nothing; fail when a generated file is out of date
    #[arg(long)]
    check: bool,
  },
  /// Print the route table
  Routes {
    /// Path to pagekit.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
  },
  /// Regenerate whenever pages or the config change
  Watch {
    /// Path to pagekit.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// Remove generated files
  Clean {
    /// Path to pagekit.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
}

/// Parse process arguments and run the command against `source`.
pub fn run(source: &dyn DefinitionSource) -> Result<()> {
  run_with(Cli::parse(), source)
}

pub fn run_with(cli: Cli, source: &dyn DefinitionSource) -> Result<()> {
  init_logging(cli.verbose);

  match cli.command {
    Command::Generate { config, check } => {
      let (config_path, config) = resolve_config(config)?;
      ui::banner("generate");
      generate::run_generate(&config, base_dir(&config_path), source, check)?;
    }
    Command::Routes { config, json } => {
      let (config_path, config) = resolve_config(config)?;
      routes::run_routes(&config, base_dir(&config_path), source, json)?;
    }
    Command::Watch { config } => {
      let (config_path, _) = resolve_config(config)?;
      ui::banner("watch");
      watch::run_watch(&config_path, source)?;
    }
    Command::Clean { config } => {
      let (config_path, config) = resolve_config(config)?;
      clean::run_clean(&config, base_dir(&config_path))?;
    }
  }
  Ok(())
}

fn init_logging(verbose: bool) {
  let filter = EnvFilter::try_from_env(LOG_ENV)
    .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "error" }));
  let _ = fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).try_init();
}

/// Resolve config path (explicit or auto-detected) and parse it
fn resolve_config(explicit: Option<PathBuf>) -> Result<(PathBuf, PagekitConfig)> {
  let path = match explicit {
    Some(p) => p.canonicalize().with_context(|| format!("failed to resolve {}", p.display()))?,
    None => {
      let cwd = std::env::current_dir().context("failed to get cwd")?;
      find_config(&cwd)?
    }
  };
  let config = load_config(&path)?;
  Ok((path, config))
}

fn base_dir(config_path: &Path) -> &Path {
  config_path.parent().unwrap_or_else(|| Path::new("."))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_generate_check() {
    let cli = Cli::try_parse_from(["pagekit", "generate", "--check", "-c", "app/pagekit.toml"]).unwrap();
    match cli.command {
      Command::Generate { config, check } => {
        assert!(check);
        assert_eq!(config, Some(PathBuf::from("app/pagekit.toml")));
      }
      other => panic!("unexpected command {other:?}"),
    }
  }

  #[test]
  fn verbose_is_global() {
    let cli = Cli::try_parse_from(["pagekit", "routes", "--json", "-v"]).unwrap();
    assert!(cli.verbose);
    assert!(matches!(cli.command, Command::Routes { json: true, config: None }));
  }

  #[test]
  fn unknown_command_is_rejected() {
    assert!(Cli::try_parse_from(["pagekit", "serve"]).is_err());
  }

  #[test]
  fn generate_runs_against_a_project() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join("resources/pages")).unwrap();
    std::fs::write(root.join("resources/pages/about.tsx"), "").unwrap();
    std::fs::write(root.join("pagekit.toml"), "[pages]\ndir = \"resources/pages\"\n").unwrap();

    let config_path = root.join("pagekit.toml");
    let cli = Cli::try_parse_from(["pagekit", "generate", "-c", config_path.to_str().unwrap()]).unwrap();
    run_with(cli, &pagekit::PageRegistry::new()).unwrap();

    let routes = std::fs::read_to_string(root.join("src/generated/routes.rs")).unwrap();
    assert!(routes.contains("\"/about\", \"about\""));
    assert!(root.join("src/generated/handlers/about.rs").is_file());
  }
}
