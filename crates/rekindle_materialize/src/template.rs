//! The template category: `{{ name }}` placeholders compiled once into a
//! reusable rendering function.

use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;

use rekindle_core::MaterializeError;

use crate::dispatch::Materialize;
use crate::exports::Exports;

/// One piece of a compiled template.
#[derive(Debug, PartialEq, Eq)]
enum Segment {
    /// Verbatim output.
    Literal(String),
    /// Substituted from the render variables; unknown names render empty.
    Placeholder(String),
}

/// A compiled template.
///
/// Compilation happens once, at materialization; rendering walks the
/// precomputed segments. Clones share the segment list.
#[derive(Debug, Clone)]
pub struct Template {
    segments: Rc<[Segment]>,
}

impl Template {
    /// Compiles `source`, splitting it into literal and placeholder
    /// segments. An unterminated or empty `{{ }}` placeholder fails with
    /// [`MaterializeError::Compile`].
    pub fn compile(path: &Path, source: &str) -> Result<Self, MaterializeError> {
        let compile_error = |reason: &str| MaterializeError::Compile {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut rest = source;
        while let Some(open) = rest.find("{{") {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after = &rest[open + 2..];
            let close = after
                .find("}}")
                .ok_or_else(|| compile_error("unterminated '{{' placeholder"))?;
            let name = after[..close].trim();
            if name.is_empty() {
                return Err(compile_error("empty placeholder name"));
            }
            segments.push(Segment::Placeholder(name.to_string()));
            rest = &after[close + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            segments: segments.into(),
        })
    }

    /// Renders the template with the given variables. Placeholders without
    /// a binding render as the empty string.
    pub fn render(&self, vars: &BTreeMap<String, String>) -> String {
        let mut out = String::new();
        for segment in self.segments.iter() {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    if let Some(value) = vars.get(name) {
                        out.push_str(value);
                    }
                }
            }
        }
        out
    }

    /// The distinct placeholder names, in first-occurrence order.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in self.segments.iter() {
            if let Segment::Placeholder(name) = segment {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// Materializes template sources into a compiled [`Template`].
#[derive(Debug, Default)]
pub struct TemplateMaterializer;

impl Materialize for TemplateMaterializer {
    fn category(&self) -> &'static str {
        "template"
    }

    fn materialize(&self, path: &Path, content: &str) -> Result<Exports, MaterializeError> {
        Ok(Exports::Template(Template::compile(path, content)?))
    }
}
