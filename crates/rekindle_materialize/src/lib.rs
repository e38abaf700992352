//! Standard materializers for the rekindle cache.
//!
//! Converts file content into [`Exports`] values, dispatched by file
//! extension: executable units (`.lua`), structured data (`.json`),
//! compiled templates (`.tpl`/`.html`), and raw text for everything else.
//! [`ExtensionDispatch`] implements the core's
//! [`Materializer`](rekindle_core::Materializer) seam and exposes the
//! dispatch table as an enumerable, overridable mapping.

#![warn(missing_docs)]

pub mod data;
pub mod dispatch;
pub mod exports;
pub mod script;
pub mod template;
pub mod text;

pub use data::DataMaterializer;
pub use dispatch::{BuiltinCategory, ExtensionDispatch, Materialize};
pub use exports::Exports;
pub use script::ScriptMaterializer;
pub use template::{Template, TemplateMaterializer};
pub use text::TextMaterializer;
