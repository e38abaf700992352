//! Configuration types deserialized from `rekindle.toml`.

use serde::Deserialize;
use std::collections::BTreeMap;

/// The top-level cache configuration parsed from `rekindle.toml`.
///
/// Everything is optional: an empty file (or no file at all) yields the
/// defaults: development mode, no extension overrides.
#[derive(Debug, Default, Deserialize)]
pub struct CacheConfig {
    /// Reload-policy settings.
    #[serde(default)]
    pub cache: CacheSettings,
    /// Extra extension → category bindings layered over the built-in
    /// dispatch table (e.g. `luax = "script"`).
    #[serde(default)]
    pub extensions: BTreeMap<String, CategoryName>,
}

/// The `[cache]` table: mode and the optional hot-reload override.
#[derive(Debug, Default, Deserialize)]
pub struct CacheSettings {
    /// Deployment mode; seeds the hot-reload default.
    #[serde(default)]
    pub mode: Mode,
    /// Explicit hot-reload override. When set, wins over `mode`.
    pub hot_reload: Option<bool>,
}

/// Deployment mode signal.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Load once, never recheck.
    Production,
    /// Recheck the file's mtime on every read (default).
    #[default]
    Development,
}

impl Mode {
    /// Whether this is production mode.
    pub fn is_production(&self) -> bool {
        matches!(self, Mode::Production)
    }
}

/// A materializer category referenced from the `[extensions]` table.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CategoryName {
    /// Executable units.
    Script,
    /// Structured data.
    Data,
    /// Compiled templates.
    Template,
    /// Raw text passthrough.
    Text,
}

impl CategoryName {
    /// The category's canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryName::Script => "script",
            CategoryName::Data => "data",
            CategoryName::Template => "template",
            CategoryName::Text => "text",
        }
    }
}

impl CacheConfig {
    /// Derives the hot-reload default threaded into the registry: the
    /// explicit override wins, otherwise development mode enables it.
    pub fn hot_reload_default(&self) -> bool {
        self.cache
            .hot_reload
            .unwrap_or(!self.cache.mode.is_production())
    }
}
