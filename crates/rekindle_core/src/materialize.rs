//! The seam between the cache core and byte-to-value conversion.

use std::path::Path;

use crate::error::MaterializeError;

/// Converts file content into a cached artifact value.
///
/// The core hands the canonical path and the file's text (with any leading
/// byte-order mark already stripped) to the materializer and stores whatever
/// comes back. Artifacts must be cheap to clone: the slot returns a clone on
/// every read, and shared-handle artifact types (tables, `Rc` values) keep
/// caller-side mutation visible across reads, matching the source system.
pub trait Materializer {
    /// The materialized exports value owned by a slot.
    type Artifact: Clone;

    /// Converts `content` into an artifact value.
    fn materialize(&self, path: &Path, content: &str)
        -> Result<Self::Artifact, MaterializeError>;
}
