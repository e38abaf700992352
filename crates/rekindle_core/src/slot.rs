//! Artifact slot: one file's cached exports value and reload bookkeeping.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::SystemTime;

use tracing::debug;

use crate::error::CacheError;
use crate::fs::{canonical, FileSystem};
use crate::materialize::Materializer;

/// A cache entry owning one file's materialized exports value.
///
/// The slot tracks the file's last-observed modification time and reloads
/// on demand: with hot reload enabled every read re-stats the file and
/// re-materializes when the mtime differs in any direction; with hot reload
/// disabled the file is loaded once and never rechecked.
///
/// Slots are created through the [`Registry`](crate::Registry), which
/// guarantees at most one live slot per canonical path.
pub struct Slot<M: Materializer> {
    /// Canonical absolute path. Immutable identity key.
    path: PathBuf,

    /// Working directory the path was canonicalized against; reused by
    /// [`is_path`](Self::is_path) so candidates get identical treatment.
    cwd: PathBuf,

    /// Whether reads re-check the file's mtime.
    hot_reload: Cell<bool>,

    /// Mtime observed when the cached artifact was last (re)loaded.
    /// `None` means never loaded or just reset.
    last_mtime: Cell<Option<SystemTime>>,

    /// The cached exports value. Cleared on staleness, reset, and disposal.
    artifact: RefCell<Option<M::Artifact>>,

    /// Monotonic false→true. A disposed slot rejects every operation.
    disposed: Cell<bool>,

    materializer: Rc<M>,
    fs: Rc<dyn FileSystem>,
}

impl<M: Materializer> Slot<M> {
    /// Creates a slot for `path`, canonicalized against `cwd`.
    ///
    /// Fails with [`CacheError::InvalidArgument`] when the path is empty.
    pub(crate) fn new(
        path: &Path,
        hot_reload: bool,
        cwd: PathBuf,
        materializer: Rc<M>,
        fs: Rc<dyn FileSystem>,
    ) -> Result<Self, CacheError> {
        if path.as_os_str().is_empty() {
            return Err(CacheError::InvalidArgument(
                "slot path must not be empty".to_string(),
            ));
        }
        Ok(Self {
            path: canonical(path, &cwd),
            cwd,
            hot_reload: Cell::new(hot_reload),
            last_mtime: Cell::new(None),
            artifact: RefCell::new(None),
            disposed: Cell::new(false),
            materializer,
            fs,
        })
    }

    /// Returns the cached exports value, reloading first if the slot is
    /// stale. This is the sole read path.
    ///
    /// A stat or read failure propagates as [`CacheError::Io`] with no
    /// cached fallback; a materialization failure leaves the cache empty so
    /// the next call retries.
    pub fn exports(&self) -> Result<M::Artifact, CacheError> {
        self.guard()?;

        // Stat on the first read, and on every read under hot reload.
        let mut observed = None;
        if self.last_mtime.get().is_none() || self.hot_reload.get() {
            debug!("reading mtime for {}", self.path.display());
            observed = Some(self.fs.mtime(&self.path)?);
        }

        // Any mtime difference counts as stale, including a clock that
        // moved backward.
        if self.hot_reload.get() {
            if let (Some(previous), Some(current)) = (self.last_mtime.get(), observed) {
                if previous != current {
                    debug!("hot replacing {}", self.path.display());
                    self.artifact.replace(None);
                    self.last_mtime.set(Some(current));
                }
            }
        }
        if self.last_mtime.get().is_none() {
            self.last_mtime.set(observed);
        }

        if let Some(value) = self.artifact.borrow().as_ref() {
            return Ok(value.clone());
        }

        debug!("materializing {}", self.path.display());
        let raw = self.fs.read_text(&self.path)?;
        let content = raw.strip_prefix('\u{feff}').unwrap_or(&raw);
        let value = self.materializer.materialize(&self.path, content)?;
        self.artifact.replace(Some(value.clone()));
        Ok(value)
    }

    /// Clears the cached artifact and the observed mtime, forcing the next
    /// [`exports`](Self::exports) call to re-stat and reload regardless of
    /// the hot-reload flag.
    pub fn reset(&self) -> Result<(), CacheError> {
        self.guard()?;
        self.artifact.replace(None);
        self.last_mtime.set(None);
        Ok(())
    }

    /// Sets the hot-reload flag. Triggers no reload or staleness check by
    /// itself; returns the slot for chaining.
    pub fn set_hot_reload(&self, enabled: bool) -> Result<&Self, CacheError> {
        self.guard()?;
        self.hot_reload.set(enabled);
        Ok(self)
    }

    /// Reports whether `candidate`, canonicalized with the same rules as
    /// construction, names this slot's file. An empty candidate is `false`,
    /// not an error.
    pub fn is_path(&self, candidate: impl AsRef<Path>) -> Result<bool, CacheError> {
        self.guard()?;
        let candidate = candidate.as_ref();
        if candidate.as_os_str().is_empty() {
            return Ok(false);
        }
        Ok(canonical(candidate, &self.cwd) == self.path)
    }

    /// The canonical absolute path this slot is keyed by.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current hot-reload flag.
    pub fn hot_reload(&self) -> bool {
        self.hot_reload.get()
    }

    /// Whether the slot has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// The mtime recorded at the most recent load, if any.
    pub fn last_observed_mtime(&self) -> Option<SystemTime> {
        self.last_mtime.get()
    }

    /// Clears all mutable state and marks the slot disposed. Called by
    /// [`Registry::dispose`](crate::Registry::dispose).
    pub(crate) fn mark_disposed(&self) {
        self.artifact.replace(None);
        self.last_mtime.set(None);
        self.hot_reload.set(false);
        self.disposed.set(true);
    }

    fn guard(&self) -> Result<(), CacheError> {
        if self.disposed.get() {
            return Err(CacheError::Disposed {
                path: self.path.clone(),
            });
        }
        Ok(())
    }
}
