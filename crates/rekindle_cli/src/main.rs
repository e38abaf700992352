//! Rekindle CLI — materialize, watch, and inspect file-backed exports.
//!
//! Provides `rekindle show` to materialize a file once and print its
//! exports, `rekindle watch` to poll a file and report reloads, and
//! `rekindle categories` to print the extension dispatch table.

#![warn(missing_docs)]

mod categories;
mod show;
mod watch;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use rekindle_config::{CacheConfig, ConfigError};
use rekindle_core::{Registry, RegistryConfig};
use rekindle_materialize::{BuiltinCategory, ExtensionDispatch};

/// Rekindle — a file-backed exports cache with hot reload.
#[derive(Parser, Debug)]
#[command(name = "rekindle", version, about = "File-backed exports cache")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `rekindle.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Materialize a file once and print its exports.
    Show(ShowArgs),
    /// Poll a file and report each observed reload.
    Watch(WatchArgs),
    /// Print the extension dispatch table.
    Categories,
}

/// Arguments for the `rekindle show` subcommand.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// File to materialize.
    pub path: String,

    /// Override the hot-reload flag for this slot.
    #[arg(long)]
    pub hot_reload: Option<bool>,
}

/// Arguments for the `rekindle watch` subcommand.
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// File to watch.
    pub path: String,

    /// Poll interval in milliseconds.
    #[arg(long, default_value_t = 500)]
    pub interval_ms: u64,

    /// Number of polls before exiting (0 = poll until interrupted).
    #[arg(long, default_value_t = 0)]
    pub ticks: u64,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    init_tracing(&global);

    let result = match cli.command {
        Command::Show(ref args) => show::run(args, &global),
        Command::Watch(ref args) => watch::run(args, &global),
        Command::Categories => categories::run(&global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the tracing subscriber. `RUST_LOG` wins when set; otherwise
/// `--verbose` selects debug and `--quiet` errors only.
fn init_tracing(global: &GlobalArgs) {
    let default_level = if global.verbose {
        "debug"
    } else if global.quiet {
        "error"
    } else {
        "info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the cache configuration: the `--config` file when given, else
/// `rekindle.toml` in the current directory, else defaults with the mode
/// taken from `REKINDLE_ENV`.
pub fn load_cache_config(global: &GlobalArgs) -> Result<CacheConfig, ConfigError> {
    if let Some(file) = &global.config {
        let content = std::fs::read_to_string(file)?;
        return rekindle_config::load_config_from_str(&content);
    }

    let local = PathBuf::from(rekindle_config::CONFIG_FILE_NAME);
    if local.exists() {
        return rekindle_config::load_config(std::path::Path::new("."));
    }

    let mut config = CacheConfig::default();
    config.cache.mode = rekindle_config::mode_from_env();
    Ok(config)
}

/// Builds the dispatch table: the standard defaults plus the configured
/// `[extensions]` bindings.
pub fn build_dispatch(config: &CacheConfig) -> ExtensionDispatch {
    let mut dispatch = ExtensionDispatch::with_defaults();
    for (ext, category) in &config.extensions {
        if let Some(builtin) = BuiltinCategory::from_name(category.as_str()) {
            dispatch.register_builtin(ext, builtin);
        }
    }
    dispatch
}

/// Builds a registry over the configured dispatch table.
pub fn build_registry(
    global: &GlobalArgs,
) -> Result<Registry<ExtensionDispatch>, Box<dyn std::error::Error>> {
    let config = load_cache_config(global)?;
    let dispatch = build_dispatch(&config);
    let registry = Registry::new(
        RegistryConfig::new(config.hot_reload_default()),
        dispatch,
    )?;
    Ok(registry)
}
