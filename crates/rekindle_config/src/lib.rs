//! Parsing and validation of `rekindle.toml` cache configuration.
//!
//! This crate is the documented boundary between ambient signals and the
//! cache core: it reads the optional configuration file, consults the
//! `REKINDLE_ENV` process variable (in exactly one place), and derives the
//! hot-reload default the host threads into the registry as plain data.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{
    load_config, load_config_from_str, mode_from_env, mode_from_value, CONFIG_FILE_NAME,
    MODE_ENV_VAR,
};
pub use types::{CacheConfig, CacheSettings, CategoryName, Mode};
