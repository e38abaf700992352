//! The default category: content passes through unchanged.

use std::path::Path;
use std::rc::Rc;

use rekindle_core::MaterializeError;

use crate::dispatch::Materialize;
use crate::exports::Exports;

/// Materializes any file as its raw text. Used as the dispatch fallback
/// for extensions without a registered category.
#[derive(Debug, Default)]
pub struct TextMaterializer;

impl Materialize for TextMaterializer {
    fn category(&self) -> &'static str {
        "text"
    }

    fn materialize(&self, _path: &Path, content: &str) -> Result<Exports, MaterializeError> {
        Ok(Exports::Text(Rc::from(content)))
    }
}
