//! The executable-unit category: Lua sources compiled and invoked with
//! fixed positional bindings and no dependency-loading capability.

use std::path::Path;

use mlua::{Lua, Value};

use rekindle_core::MaterializeError;

use crate::dispatch::Materialize;
use crate::exports::Exports;

/// Binds the five fixed positional arguments every unit receives:
/// an exports container, the (disabled) dependency loader, the module
/// record wrapping the exports container, and nil filename/dirname slots.
const UNIT_PRELUDE: &str = "local exports, acquire, module, filename, dirname = ...\n";

/// Materializes `.lua` sources into their exports value.
///
/// All units of one materializer share a single Lua runtime with the safe
/// subset of the standard library; globals therefore persist across units,
/// while each unit gets its own fresh exports container and module record.
/// The `acquire` binding is a capability whose invocation always raises, so
/// a unit cannot pull in further dependencies through the cache.
pub struct ScriptMaterializer {
    lua: Lua,
}

impl ScriptMaterializer {
    /// Creates a materializer with a fresh Lua runtime.
    pub fn new() -> Self {
        Self { lua: Lua::new() }
    }
}

impl Default for ScriptMaterializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Materialize for ScriptMaterializer {
    fn category(&self) -> &'static str {
        "script"
    }

    fn materialize(&self, path: &Path, content: &str) -> Result<Exports, MaterializeError> {
        let source = format!("{UNIT_PRELUDE}{content}");
        let unit = self
            .lua
            .load(&source)
            .set_name(path.display().to_string())
            .into_function()
            .map_err(|e| compile_error(path, e))?;

        let exports = self.lua.create_table().map_err(|e| compile_error(path, e))?;
        let module = self.lua.create_table().map_err(|e| compile_error(path, e))?;
        module
            .set("exports", exports.clone())
            .map_err(|e| compile_error(path, e))?;

        let acquire = self
            .lua
            .create_function(|_, _args: mlua::MultiValue| -> mlua::Result<()> {
                Err(mlua::Error::RuntimeError(
                    "dependency loading is disabled inside materialized units".to_string(),
                ))
            })
            .map_err(|e| compile_error(path, e))?;

        unit.call::<()>((
            exports,
            acquire,
            module.clone(),
            Value::Nil,
            Value::Nil,
        ))
        .map_err(|e| compile_error(path, e))?;

        // Honor reassignment of the module record's exports field.
        let result: Value = module.get("exports").map_err(|e| compile_error(path, e))?;
        Ok(Exports::Script(result))
    }
}

fn compile_error(path: &Path, e: mlua::Error) -> MaterializeError {
    MaterializeError::Compile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn materialize(source: &str) -> Result<Exports, MaterializeError> {
        // The returned `Exports::Script` is a live handle into the
        // materializer's Lua runtime, so the runtime must outlive the value
        // under test. Leak the materializer to give it a 'static lifetime.
        let materializer: &'static ScriptMaterializer =
            Box::leak(Box::new(ScriptMaterializer::new()));
        materializer.materialize(Path::new("/units/test.lua"), source)
    }

    fn as_table(exports: &Exports) -> &mlua::Table {
        match exports.as_script().unwrap() {
            Value::Table(table) => table,
            other => panic!("expected table exports, got {other:?}"),
        }
    }

    #[test]
    fn populates_exports_container() {
        let exports = materialize(indoc! {r#"
            exports.answer = 42
            exports.name = "unit"
        "#})
        .unwrap();

        let table = as_table(&exports);
        assert_eq!(table.get::<i64>("answer").unwrap(), 42);
        assert_eq!(table.get::<String>("name").unwrap(), "unit");
    }

    #[test]
    fn empty_unit_yields_empty_table() {
        let exports = materialize("").unwrap();
        assert_eq!(as_table(&exports).len().unwrap(), 0);
    }

    #[test]
    fn module_exports_reassignment_is_honored() {
        let exports = materialize(indoc! {r#"
            module.exports = { value = 7 }
        "#})
        .unwrap();
        assert_eq!(as_table(&exports).get::<i64>("value").unwrap(), 7);
    }

    #[test]
    fn module_exports_may_become_a_scalar() {
        let exports = materialize(r#"module.exports = "plain""#).unwrap();
        match exports.as_script().unwrap() {
            Value::String(s) => assert_eq!(s.to_string_lossy(), "plain"),
            other => panic!("expected string exports, got {other:?}"),
        }
    }

    #[test]
    fn filename_and_dirname_are_nil() {
        let exports = materialize(indoc! {r#"
            exports.filename_is_nil = filename == nil
            exports.dirname_is_nil = dirname == nil
        "#})
        .unwrap();

        let table = as_table(&exports);
        assert!(table.get::<bool>("filename_is_nil").unwrap());
        assert!(table.get::<bool>("dirname_is_nil").unwrap());
    }

    #[test]
    fn acquire_is_present_but_unusable() {
        // The loader exists as a value; calling it must raise.
        let err = materialize(r#"acquire("socket")"#).unwrap_err();
        match err {
            MaterializeError::Compile { reason, .. } => {
                assert!(reason.contains("dependency loading is disabled"));
            }
            other => panic!("expected Compile error, got {other}"),
        }
    }

    #[test]
    fn syntax_error_is_compile_error() {
        let err = materialize("this is not lua }{").unwrap_err();
        assert!(matches!(err, MaterializeError::Compile { .. }));
    }

    #[test]
    fn runtime_error_is_compile_error() {
        let err = materialize(r#"error("boom")"#).unwrap_err();
        match err {
            MaterializeError::Compile { reason, .. } => assert!(reason.contains("boom")),
            other => panic!("expected Compile error, got {other}"),
        }
    }

    #[test]
    fn globals_persist_across_units_of_one_materializer() {
        let materializer = ScriptMaterializer::new();
        materializer
            .materialize(Path::new("/units/a.lua"), "shared_counter = 10")
            .unwrap();
        let exports = materializer
            .materialize(Path::new("/units/b.lua"), "exports.seen = shared_counter")
            .unwrap();
        assert_eq!(as_table(&exports).get::<i64>("seen").unwrap(), 10);
    }

    #[test]
    fn units_do_not_share_exports_containers() {
        let materializer = ScriptMaterializer::new();
        materializer
            .materialize(Path::new("/units/a.lua"), "exports.a = 1")
            .unwrap();
        let second = materializer
            .materialize(Path::new("/units/b.lua"), "exports.b = 2")
            .unwrap();

        let table = as_table(&second);
        assert!(table.get::<Option<i64>>("a").unwrap().is_none());
        assert_eq!(table.get::<i64>("b").unwrap(), 2);
    }
}
