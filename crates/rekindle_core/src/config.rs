//! Explicit registry configuration.
//!
//! The core takes its hot-reload policy as plain data; it never consults
//! the process environment. Hosts that want environment-driven defaults
//! derive them through `rekindle_config` and thread the result in here.

use std::path::PathBuf;

/// Configuration threaded into [`Registry::new`](crate::Registry::new).
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Hot-reload flag seeded into every slot the registry creates,
    /// unless the factory call overrides it.
    pub hot_reload_default: bool,

    /// Working directory used to canonicalize relative paths. When `None`,
    /// the registry resolves `std::env::current_dir()` once at construction.
    pub cwd: Option<PathBuf>,
}

impl RegistryConfig {
    /// Creates a configuration with the given hot-reload default.
    pub fn new(hot_reload_default: bool) -> Self {
        Self {
            hot_reload_default,
            cwd: None,
        }
    }

    /// Sets an explicit working directory for canonicalization.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

impl Default for RegistryConfig {
    /// Production-safe default: load once, never recheck.
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_load_once() {
        let config = RegistryConfig::default();
        assert!(!config.hot_reload_default);
        assert!(config.cwd.is_none());
    }

    #[test]
    fn with_cwd_sets_override() {
        let config = RegistryConfig::new(true).with_cwd("/srv/app");
        assert!(config.hot_reload_default);
        assert_eq!(config.cwd.as_deref(), Some(std::path::Path::new("/srv/app")));
    }
}
