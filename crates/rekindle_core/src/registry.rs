//! Path-keyed registry of live artifact slots.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::config::RegistryConfig;
use crate::error::CacheError;
use crate::fs::{canonical, FileSystem, OsFileSystem};
use crate::materialize::Materializer;
use crate::slot::Slot;

/// A mapping from canonical absolute path to exactly one live [`Slot`].
///
/// The registry is an explicit object constructed by the host and passed
/// around by handle; the crate provides no process-wide singleton. Slots
/// are created on first request and destroyed only through
/// [`dispose`](Self::dispose); there is no eviction policy.
pub struct Registry<M: Materializer> {
    entries: RefCell<HashMap<PathBuf, Rc<Slot<M>>>>,
    materializer: Rc<M>,
    fs: Rc<dyn FileSystem>,
    config: RegistryConfig,
    cwd: PathBuf,
}

impl<M: Materializer> Registry<M> {
    /// Creates a registry over the OS filesystem.
    ///
    /// Resolves the working directory once: the explicit `config.cwd`
    /// override if present, else `std::env::current_dir()`.
    pub fn new(config: RegistryConfig, materializer: M) -> Result<Self, CacheError> {
        Self::with_fs(config, materializer, Rc::new(OsFileSystem))
    }

    /// Creates a registry with an explicit filesystem capability.
    pub fn with_fs(
        config: RegistryConfig,
        materializer: M,
        fs: Rc<dyn FileSystem>,
    ) -> Result<Self, CacheError> {
        let cwd = match &config.cwd {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(|e| CacheError::Io {
                path: PathBuf::from("."),
                source: e,
            })?,
        };
        Ok(Self {
            entries: RefCell::new(HashMap::new()),
            materializer: Rc::new(materializer),
            fs,
            config,
            cwd,
        })
    }

    /// Returns the slot for `path`, creating it on first request.
    ///
    /// Idempotent: paths that canonicalize identically always yield the
    /// identical slot instance until it is disposed.
    pub fn slot(&self, path: impl AsRef<Path>) -> Result<Rc<Slot<M>>, CacheError> {
        self.slot_with(path, None)
    }

    /// Like [`slot`](Self::slot), with a per-slot hot-reload override that
    /// applies only when this call creates the slot; an existing slot is
    /// returned unchanged.
    pub fn slot_with(
        &self,
        path: impl AsRef<Path>,
        hot_reload: Option<bool>,
    ) -> Result<Rc<Slot<M>>, CacheError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(CacheError::InvalidArgument(
                "registry path must not be empty".to_string(),
            ));
        }

        let key = canonical(path, &self.cwd);
        if let Some(existing) = self.entries.borrow().get(&key) {
            return Ok(Rc::clone(existing));
        }

        let slot = Rc::new(Slot::new(
            path,
            hot_reload.unwrap_or(self.config.hot_reload_default),
            self.cwd.clone(),
            Rc::clone(&self.materializer),
            Rc::clone(&self.fs),
        )?);
        self.entries.borrow_mut().insert(key, Rc::clone(&slot));
        Ok(slot)
    }

    /// Reports whether a slot exists for `path`. Empty input is `false`,
    /// not an error; no entry is ever created as a side effect.
    pub fn has(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return false;
        }
        self.entries
            .borrow()
            .contains_key(&canonical(path, &self.cwd))
    }

    /// Removes the slot's entry and clears the slot.
    ///
    /// Fails with [`CacheError::Disposed`] if the slot was already
    /// disposed. Afterwards the same path may be requested again, yielding
    /// a brand-new slot: disposed slots are not remembered.
    pub fn dispose(&self, slot: &Slot<M>) -> Result<(), CacheError> {
        if slot.is_disposed() {
            return Err(CacheError::Disposed {
                path: slot.path().to_path_buf(),
            });
        }
        self.entries.borrow_mut().remove(slot.path());
        slot.mark_disposed();
        Ok(())
    }

    /// Number of live slots.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the registry holds no live slots.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MaterializeError;

    struct Upper;

    impl Materializer for Upper {
        type Artifact = String;

        fn materialize(&self, _path: &Path, content: &str) -> Result<String, MaterializeError> {
            Ok(content.to_uppercase())
        }
    }

    fn make_registry(cwd: &Path, hot: bool) -> Registry<Upper> {
        Registry::new(RegistryConfig::new(hot).with_cwd(cwd), Upper).unwrap()
    }

    #[test]
    fn factory_returns_identical_instance() {
        let dir = tempfile::tempdir().unwrap();
        let registry = make_registry(dir.path(), false);
        std::fs::write(dir.path().join("a.txt"), "x").unwrap();

        let first = registry.slot("a.txt").unwrap();
        let second = registry.slot("a.txt").unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn equivalent_spellings_share_a_slot() {
        let dir = tempfile::tempdir().unwrap();
        let registry = make_registry(dir.path(), false);

        let plain = registry.slot("conf/site.json").unwrap();
        let dotted = registry.slot("./conf/../conf/site.json").unwrap();
        assert!(Rc::ptr_eq(&plain, &dotted));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn empty_path_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let registry = make_registry(dir.path(), false);
        assert!(matches!(
            registry.slot(""),
            Err(CacheError::InvalidArgument(_))
        ));
    }

    #[test]
    fn has_reports_without_creating() {
        let dir = tempfile::tempdir().unwrap();
        let registry = make_registry(dir.path(), false);

        assert!(!registry.has("a.txt"));
        assert!(registry.is_empty());

        registry.slot("a.txt").unwrap();
        assert!(registry.has("a.txt"));
        assert!(registry.has("./a.txt"));
        assert!(!registry.has(""));
    }

    #[test]
    fn slot_seeds_hot_reload_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let registry = make_registry(dir.path(), true);
        assert!(registry.slot("a.txt").unwrap().hot_reload());

        let registry = make_registry(dir.path(), false);
        assert!(!registry.slot("a.txt").unwrap().hot_reload());
    }

    #[test]
    fn slot_with_overrides_hot_reload_at_creation_only() {
        let dir = tempfile::tempdir().unwrap();
        let registry = make_registry(dir.path(), false);

        let slot = registry.slot_with("a.txt", Some(true)).unwrap();
        assert!(slot.hot_reload());

        // The override does not rewrite an existing slot.
        let again = registry.slot_with("a.txt", Some(false)).unwrap();
        assert!(Rc::ptr_eq(&slot, &again));
        assert!(again.hot_reload());
    }

    #[test]
    fn dispose_removes_entry_and_clears_slot() {
        let dir = tempfile::tempdir().unwrap();
        let registry = make_registry(dir.path(), false);
        std::fs::write(dir.path().join("a.txt"), "x").unwrap();

        let slot = registry.slot("a.txt").unwrap();
        slot.exports().unwrap();

        registry.dispose(&slot).unwrap();
        assert!(slot.is_disposed());
        assert!(!registry.has("a.txt"));
        assert!(registry.is_empty());
        assert!(matches!(slot.exports(), Err(CacheError::Disposed { .. })));
    }

    #[test]
    fn dispose_twice_fails() {
        let dir = tempfile::tempdir().unwrap();
        let registry = make_registry(dir.path(), false);
        let slot = registry.slot("a.txt").unwrap();

        registry.dispose(&slot).unwrap();
        assert!(matches!(
            registry.dispose(&slot),
            Err(CacheError::Disposed { .. })
        ));
    }

    #[test]
    fn disposed_path_yields_fresh_slot() {
        let dir = tempfile::tempdir().unwrap();
        let registry = make_registry(dir.path(), false);

        let first = registry.slot("a.txt").unwrap();
        registry.dispose(&first).unwrap();

        let second = registry.slot("a.txt").unwrap();
        assert!(!Rc::ptr_eq(&first, &second));
        assert!(!second.is_disposed());
        assert!(registry.has("a.txt"));
    }
}
