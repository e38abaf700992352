//! Filesystem capability and pure path canonicalization.
//!
//! The core never touches `std::fs` directly: stat and read go through the
//! [`FileSystem`] trait so hosts and tests can substitute their own
//! implementation. Canonicalization is lexical, since the cached path may
//! refer to a file that does not exist yet.

use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use crate::error::CacheError;

/// Narrow filesystem interface consumed by the cache core.
///
/// Both operations fail with [`CacheError::Io`] when the path does not
/// exist or is inaccessible; the error carries the offending path.
pub trait FileSystem {
    /// Returns the file's last-modification timestamp.
    fn mtime(&self, path: &Path) -> Result<SystemTime, CacheError>;

    /// Reads the full file contents as UTF-8 text.
    fn read_text(&self, path: &Path) -> Result<String, CacheError>;
}

/// The production [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn mtime(&self, path: &Path) -> Result<SystemTime, CacheError> {
        std::fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map_err(|e| CacheError::Io {
                path: path.to_path_buf(),
                source: e,
            })
    }

    fn read_text(&self, path: &Path) -> Result<String, CacheError> {
        std::fs::read_to_string(path).map_err(|e| CacheError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Canonicalizes `path` to absolute form against `cwd`, purely lexically.
///
/// Relative paths are joined onto `cwd`; `.` segments are dropped and `..`
/// segments pop their parent. A `..` above the root resolves to the root.
/// No filesystem access and no symlink resolution take place, so the result
/// is well-defined for paths that do not exist.
pub fn canonical(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // pop() refuses to remove the root, which is what we want
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}
