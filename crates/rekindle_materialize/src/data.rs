//! The structured-data category: JSON documents parsed into a value tree.

use std::path::Path;
use std::rc::Rc;

use rekindle_core::MaterializeError;

use crate::dispatch::Materialize;
use crate::exports::Exports;

/// Materializes `.json` sources into a parsed document.
#[derive(Debug, Default)]
pub struct DataMaterializer;

impl Materialize for DataMaterializer {
    fn category(&self) -> &'static str {
        "data"
    }

    fn materialize(&self, path: &Path, content: &str) -> Result<Exports, MaterializeError> {
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|e| MaterializeError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(Exports::Data(Rc::new(value)))
    }
}
