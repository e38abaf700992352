//! `rekindle show` — materialize a file once and print its exports.

use mlua::Value;

use rekindle_materialize::Exports;

use crate::{GlobalArgs, ShowArgs};

/// Runs the `rekindle show` command.
///
/// Materializes the file through the configured registry and prints the
/// exports value: pretty JSON for data, raw content for text, placeholder
/// summary for templates, a Lua-literal rendering for script exports.
pub fn run(args: &ShowArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let registry = crate::build_registry(global)?;
    let slot = registry.slot_with(&args.path, args.hot_reload)?;
    let exports = slot.exports()?;

    if !global.quiet {
        eprintln!(
            "   Materialized {} ({})",
            slot.path().display(),
            exports.kind()
        );
    }
    print!("{}", render_exports(&exports));
    Ok(0)
}

/// Renders an exports value for terminal output.
fn render_exports(exports: &Exports) -> String {
    match exports {
        Exports::Text(text) => text.to_string(),
        Exports::Data(value) => {
            let mut out =
                serde_json::to_string_pretty(value.as_ref()).unwrap_or_else(|_| value.to_string());
            out.push('\n');
            out
        }
        Exports::Template(template) => {
            let names = template.placeholders();
            if names.is_empty() {
                "template with no placeholders\n".to_string()
            } else {
                format!("template with placeholders: {}\n", names.join(", "))
            }
        }
        Exports::Script(value) => {
            let mut out = render_lua(value, 0);
            out.push('\n');
            out
        }
    }
}

/// Maximum table nesting depth rendered before eliding.
const MAX_DEPTH: usize = 8;

/// Renders a Lua value as a Lua-ish literal. Table entries are sorted by
/// rendered key for deterministic output.
fn render_lua(value: &Value, depth: usize) -> String {
    match value {
        Value::Nil => "nil".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{:?}", s.to_string_lossy()),
        Value::Table(table) => {
            if depth >= MAX_DEPTH {
                return "{...}".to_string();
            }
            let mut entries: Vec<String> = Vec::new();
            for pair in table.clone().pairs::<Value, Value>() {
                let Ok((key, val)) = pair else { continue };
                entries.push(format!(
                    "{} = {}",
                    render_lua(&key, depth + 1),
                    render_lua(&val, depth + 1)
                ));
            }
            entries.sort();
            if entries.is_empty() {
                "{}".to_string()
            } else {
                let indent = "  ".repeat(depth + 1);
                let closing = "  ".repeat(depth);
                format!(
                    "{{\n{}{}\n{}}}",
                    indent,
                    entries.join(&format!(",\n{indent}")),
                    closing
                )
            }
        }
        other => format!("<{}>", other.type_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn renders_text_verbatim() {
        let exports = Exports::Text(Rc::from("hello\n"));
        assert_eq!(render_exports(&exports), "hello\n");
    }

    #[test]
    fn renders_data_as_pretty_json() {
        let exports = Exports::Data(Rc::new(serde_json::json!({"value": 567})));
        let out = render_exports(&exports);
        assert!(out.contains("\"value\": 567"));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn renders_template_placeholder_summary() {
        let template = rekindle_materialize::Template::compile(
            std::path::Path::new("/t.tpl"),
            "{{ a }} {{ b }}",
        )
        .unwrap();
        let out = render_exports(&Exports::Template(template));
        assert_eq!(out, "template with placeholders: a, b\n");
    }

    #[test]
    fn renders_lua_scalars() {
        assert_eq!(render_lua(&Value::Nil, 0), "nil");
        assert_eq!(render_lua(&Value::Boolean(true), 0), "true");
        assert_eq!(render_lua(&Value::Integer(42), 0), "42");
    }

    #[test]
    fn renders_lua_table_sorted() {
        let lua = mlua::Lua::new();
        let table = lua.create_table().unwrap();
        table.set("b", 2).unwrap();
        table.set("a", 1).unwrap();
        let out = render_lua(&Value::Table(table), 0);
        assert_eq!(out, "{\n  \"a\" = 1,\n  \"b\" = 2\n}");
    }

    #[test]
    fn renders_empty_table() {
        let lua = mlua::Lua::new();
        let table = lua.create_table().unwrap();
        assert_eq!(render_lua(&Value::Table(table), 0), "{}");
    }
}
