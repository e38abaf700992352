//! File-extension dispatch into materializer categories.

use std::path::Path;
use std::rc::Rc;

use indexmap::IndexMap;

use rekindle_core::{MaterializeError, Materializer};

use crate::data::DataMaterializer;
use crate::exports::Exports;
use crate::script::ScriptMaterializer;
use crate::template::TemplateMaterializer;
use crate::text::TextMaterializer;

/// One materializer category: converts (path, content) into [`Exports`].
pub trait Materialize {
    /// Short category name used for enumeration and configuration
    /// (`"script"`, `"data"`, `"template"`, `"text"`, or host-defined).
    fn category(&self) -> &'static str;

    /// Converts `content` into an exports value.
    fn materialize(&self, path: &Path, content: &str) -> Result<Exports, MaterializeError>;
}

/// The built-in categories, for configuration-driven registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinCategory {
    /// Executable units (`.lua` by default).
    Script,
    /// Structured data (`.json` by default).
    Data,
    /// Compiled templates (`.tpl` and `.html` by default).
    Template,
    /// Raw text passthrough (the fallback).
    Text,
}

impl BuiltinCategory {
    /// The category's configuration name.
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinCategory::Script => "script",
            BuiltinCategory::Data => "data",
            BuiltinCategory::Template => "template",
            BuiltinCategory::Text => "text",
        }
    }

    /// Looks a category up by its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "script" => Some(BuiltinCategory::Script),
            "data" => Some(BuiltinCategory::Data),
            "template" => Some(BuiltinCategory::Template),
            "text" => Some(BuiltinCategory::Text),
            _ => None,
        }
    }

    fn instantiate(&self) -> Rc<dyn Materialize> {
        match self {
            BuiltinCategory::Script => Rc::new(ScriptMaterializer::new()),
            BuiltinCategory::Data => Rc::new(DataMaterializer),
            BuiltinCategory::Template => Rc::new(TemplateMaterializer),
            BuiltinCategory::Text => Rc::new(TextMaterializer),
        }
    }
}

/// The extension → category mapping the cache dispatches through.
///
/// The table is enumerable (insertion-ordered) and overridable: hosts may
/// bind new extensions, rebind existing ones, or register entirely new
/// category implementations. Files whose extension has no entry (or no
/// extension at all) fall back to text passthrough. Extension matching is
/// case-insensitive.
pub struct ExtensionDispatch {
    handlers: IndexMap<String, Rc<dyn Materialize>>,
    fallback: Rc<dyn Materialize>,
}

impl ExtensionDispatch {
    /// Creates an empty dispatch table with the text fallback.
    pub fn new() -> Self {
        Self {
            handlers: IndexMap::new(),
            fallback: Rc::new(TextMaterializer),
        }
    }

    /// Creates the standard table: `lua` → script, `json` → data,
    /// `tpl`/`html` → template.
    pub fn with_defaults() -> Self {
        let mut dispatch = Self::new();
        dispatch.register("lua", Rc::new(ScriptMaterializer::new()));
        dispatch.register("json", Rc::new(DataMaterializer));
        let template: Rc<dyn Materialize> = Rc::new(TemplateMaterializer);
        dispatch.register("tpl", Rc::clone(&template));
        dispatch.register("html", template);
        dispatch
    }

    /// Binds `extension` (with or without a leading dot, case-insensitive)
    /// to `handler`, replacing any previous binding.
    pub fn register(&mut self, extension: &str, handler: Rc<dyn Materialize>) -> &mut Self {
        self.handlers
            .insert(normalize_extension(extension), handler);
        self
    }

    /// Binds `extension` to a built-in category, sharing the existing
    /// handler for that category when one is already registered (so all
    /// script extensions share one runtime).
    pub fn register_builtin(&mut self, extension: &str, category: BuiltinCategory) -> &mut Self {
        let existing = self
            .handlers
            .values()
            .find(|handler| handler.category() == category.name())
            .cloned();
        let handler = match existing {
            Some(handler) => handler,
            None if category == BuiltinCategory::Text => Rc::clone(&self.fallback),
            None => category.instantiate(),
        };
        self.register(extension, handler)
    }

    /// Removes the binding for `extension`, if any. Files with that
    /// extension fall back to text afterwards.
    pub fn deregister(&mut self, extension: &str) -> bool {
        self.handlers
            .shift_remove(&normalize_extension(extension))
            .is_some()
    }

    /// The handler responsible for `path`.
    pub fn handler_for(&self, path: &Path) -> &dyn Materialize {
        let handler = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.handlers.get(&ext.to_ascii_lowercase()));
        match handler {
            Some(handler) => handler.as_ref(),
            None => self.fallback.as_ref(),
        }
    }

    /// Enumerates `(extension, category)` bindings in insertion order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.handlers
            .iter()
            .map(|(ext, handler)| (ext.as_str(), handler.category()))
    }

    /// The category files fall back to when no extension matches.
    pub fn fallback_category(&self) -> &'static str {
        self.fallback.category()
    }
}

impl Default for ExtensionDispatch {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Materializer for ExtensionDispatch {
    type Artifact = Exports;

    fn materialize(&self, path: &Path, content: &str) -> Result<Exports, MaterializeError> {
        self.handler_for(path).materialize(path, content)
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}
