//! BlogCraft - A terminal client for writing and publishing blog posts.
//!
//! # Usage
//!
//! ```bash
//! blogcraft
//! blogcraft new
//! blogcraft edit 42
//! blogcraft --api-url http://localhost:8000/api view 42
//! ```

use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use blogcraft::app::{App, Route};
use blogcraft::config::{
    ConfigFlags, Settings, ThemeMode, clear_config_flags, env_flags, global_config_path,
    load_config_flags, local_override_path, save_config_flags,
};
use blogcraft::post::PostId;

/// A terminal client for writing, auto-saving and publishing blog posts
#[derive(Parser, Debug)]
#[command(name = "blogcraft", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Base URL of the blog service
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Auto-save interval in milliseconds
    #[arg(long, value_name = "MS")]
    autosave_interval: Option<u64>,

    /// Quiet period after the last edit before auto-saving, in milliseconds
    #[arg(long, value_name = "MS")]
    autosave_debounce: Option<u64>,

    /// Let auto-saves overlap instead of skipping while one is in flight
    #[arg(long)]
    autosave_unguarded: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Browse posts (default)
    List,
    /// Start a new post
    New,
    /// Open a post in the editor
    Edit { id: PostId },
    /// Read a post
    View { id: PostId },
}

impl Cli {
    /// Flags given explicitly on the command line.
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            api_url: self.api_url.clone(),
            theme: self.theme,
            autosave_interval_ms: self.autosave_interval,
            autosave_debounce_ms: self.autosave_debounce,
            autosave_unguarded: self.autosave_unguarded,
            timeout_secs: self.timeout,
            log_file: self.log_file.clone(),
        }
    }
}

impl Command {
    const fn route(self) -> Route {
        match self {
            Self::List => Route::List,
            Self::New => Route::Editor(None),
            Self::Edit { id } => Route::Editor(Some(id)),
            Self::View { id } => Route::View(id),
        }
    }
}

/// Send logs to `log_file`. Without one, logging stays off: anything
/// written to the terminal would draw over the UI.
fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_ansi(false)
        .with_writer(file)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&env_flags()).union(&cli_flags);
    let settings = Settings::resolve(&effective);

    init_logging(settings.log_file.as_ref())?;

    let route = cli.command.map_or(Route::List, Command::route);
    let mut app = App::new(settings)
        .with_initial_route(route)
        .with_config_paths(
            Some(global_path),
            local_path.exists().then_some(local_path),
        );

    app.run().context("Application error")
}
