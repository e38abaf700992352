//! The materialized exports value produced by the standard categories.

use std::rc::Rc;

use crate::template::Template;

/// A file's materialized exports.
///
/// Cloning is cheap in every variant: script values are runtime handles,
/// data and text are reference-counted, templates share their compiled
/// segments. Mutation through a shared script handle is therefore visible
/// on later cache reads: a cached unit is one live value, not a snapshot.
#[derive(Debug, Clone)]
pub enum Exports {
    /// The exports of an executable unit (usually a table, but a unit may
    /// reassign its module record to any value).
    Script(mlua::Value),
    /// A parsed structured document.
    Data(Rc<serde_json::Value>),
    /// A compiled, reusable template rendering function.
    Template(Template),
    /// Raw text passthrough.
    Text(Rc<str>),
}

impl Exports {
    /// The category name this value was produced by.
    pub fn kind(&self) -> &'static str {
        match self {
            Exports::Script(_) => "script",
            Exports::Data(_) => "data",
            Exports::Template(_) => "template",
            Exports::Text(_) => "text",
        }
    }

    /// The script value, if this is a script export.
    pub fn as_script(&self) -> Option<&mlua::Value> {
        match self {
            Exports::Script(value) => Some(value),
            _ => None,
        }
    }

    /// The parsed document, if this is a data export.
    pub fn as_data(&self) -> Option<&serde_json::Value> {
        match self {
            Exports::Data(value) => Some(value),
            _ => None,
        }
    }

    /// The compiled template, if this is a template export.
    pub fn as_template(&self) -> Option<&Template> {
        match self {
            Exports::Template(template) => Some(template),
            _ => None,
        }
    }

    /// The text content, if this is a text export.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Exports::Text(text) => Some(text),
            _ => None,
        }
    }
}
