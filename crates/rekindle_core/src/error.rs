//! Error types for cache and materialization operations.

use std::path::PathBuf;

/// Errors produced by the cache core.
///
/// Every failure is surfaced synchronously to the immediate caller; the
/// core performs no retries, logging-as-recovery, or partial-success
/// returns.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// A caller supplied an invalid input (empty or missing path).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation was attempted on a slot that has been disposed.
    #[error("slot for {path} has been disposed")]
    Disposed {
        /// The canonical path the disposed slot was keyed by.
        path: PathBuf,
    },

    /// A filesystem stat or read failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Materialization of file content into an exports value failed.
    #[error(transparent)]
    Materialize(#[from] MaterializeError),
}

/// Errors produced while converting file content into an artifact value.
///
/// A materialization failure never poisons a slot: the cached artifact
/// stays empty and the next read retries the conversion.
#[derive(Debug, thiserror::Error)]
pub enum MaterializeError {
    /// The content could not be compiled into an executable or template unit.
    #[error("failed to compile {path}: {reason}")]
    Compile {
        /// The file being compiled.
        path: PathBuf,
        /// Description of the compile failure.
        reason: String,
    },

    /// The content could not be parsed as structured data.
    #[error("failed to parse {path}: {reason}")]
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_display() {
        let err = CacheError::InvalidArgument("path must not be empty".to_string());
        assert_eq!(format!("{err}"), "invalid argument: path must not be empty");
    }

    #[test]
    fn disposed_display() {
        let err = CacheError::Disposed {
            path: PathBuf::from("/srv/hooks/on_boot.lua"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/srv/hooks/on_boot.lua"));
        assert!(msg.contains("disposed"));
    }

    #[test]
    fn io_display() {
        let err = CacheError::Io {
            path: PathBuf::from("/missing/file.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("I/O error at /missing/file.json"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn compile_display() {
        let err = MaterializeError::Compile {
            path: PathBuf::from("bad.lua"),
            reason: "unexpected symbol near '}'".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("failed to compile bad.lua"));
        assert!(msg.contains("unexpected symbol"));
    }

    #[test]
    fn parse_display() {
        let err = MaterializeError::Parse {
            path: PathBuf::from("bad.json"),
            reason: "expected value at line 1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("failed to parse bad.json"));
    }

    #[test]
    fn materialize_error_wraps_transparently() {
        let inner = MaterializeError::Parse {
            path: PathBuf::from("x.json"),
            reason: "eof".to_string(),
        };
        let outer: CacheError = inner.into();
        assert_eq!(format!("{outer}"), "failed to parse x.json: eof");
    }
}
