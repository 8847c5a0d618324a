//! JSX text helpers: escaping, prop rendering and default-prop elision.

use serde_json::{json, Value};

use crate::types::{ComponentKind, Props};

/// Props each component renders without being told.
fn default_props(kind: ComponentKind) -> Vec<(&'static str, Value)> {
    match kind {
        ComponentKind::Button => vec![
            ("variant", json!("primary")),
            ("size", json!("md")),
            ("hasIcon", json!(false)),
        ],
        ComponentKind::SectionHeader => vec![("align", json!("left"))],
        ComponentKind::StatsGrid => vec![("columns", json!(3))],
        ComponentKind::Timeline => Vec::new(),
        ComponentKind::Faq => vec![("variant", json!("plain"))],
        ComponentKind::CtaBanner => vec![("tone", json!("dark"))],
        ComponentKind::Card => vec![("variant", json!("filled")), ("hasImage", json!(false))],
        ComponentKind::SplitSection => vec![("mediaPosition", json!("right"))],
        ComponentKind::Badge => vec![("tone", json!("neutral"))],
    }
}

/// Props that differ from the component's defaults, in key order.
pub fn non_default_props(kind: ComponentKind, props: &Props) -> Vec<(&str, &Value)> {
    let defaults = default_props(kind);
    props
        .iter()
        .filter(|(_, value)| !value.is_null())
        .filter(|(key, value)| {
            !defaults
                .iter()
                .any(|(k, default)| *k == key.as_str() && default == *value)
        })
        .map(|(key, value)| (key.as_str(), value))
        .collect()
}

/// A single JSX attribute for a prop value.
pub fn render_prop(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) => format!("{key}=\"{}\"", escape_attr(s)),
        Value::Bool(true) => key.to_string(),
        other => format!("{key}={{{other}}}"),
    }
}

pub fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// Escape text content; newlines become `<br />` elements.
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (i, line) in value.lines().enumerate() {
        if i > 0 {
            out.push_str("<br />");
        }
        for ch in line.chars() {
            match ch {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '{' => out.push_str("{\"{\"}"),
                '}' => out.push_str("{\"}\"}"),
                c => out.push(c),
            }
        }
    }
    out
}

pub fn import_line(kind: ComponentKind) -> String {
    format!(
        "import {{ {} }} from \"{}\";",
        kind.tag(),
        kind.import_path()
    )
}
