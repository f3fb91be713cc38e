//! Literal formatting for `@default` tag values.

use serde_json::Value;
use std::fmt;

/// Longest literal written as-is; longer object/array literals are cut.
const MAX_LITERAL_CHARS: usize = 120;
/// Characters kept from an oversized literal before the ellipsis.
const TRUNCATED_CHARS: usize = 117;
const ELLIPSIS: char = '…';

/// A runtime default value as handed over by the defaults loader.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Anything with a JSON representation.
    Json(Value),
    /// A value with no JSON form, carried as its plain string conversion.
    Opaque(String),
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        DefaultValue::Json(value)
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_literal(self))
    }
}

/// Render a value as the literal that belongs after `@default`.
///
/// Strings are JSON-quoted, scalars are bare, objects and arrays are
/// compact JSON cut to 117 chars plus `…` when longer than 120. Never fails:
/// anything that cannot be serialized falls back to its string form.
pub fn format_literal(value: &DefaultValue) -> String {
    let literal = match value {
        DefaultValue::Json(Value::Null) => "null".to_string(),
        DefaultValue::Json(Value::Bool(b)) => b.to_string(),
        DefaultValue::Json(Value::Number(n)) => format_number(n),
        DefaultValue::Json(Value::String(s)) => {
            serde_json::to_string(s).unwrap_or_else(|_| s.clone())
        }
        DefaultValue::Json(composite) => match serde_json::to_string(composite) {
            Ok(json) => truncate(json),
            Err(_) => fallback(&composite.to_string()),
        },
        DefaultValue::Opaque(repr) => fallback(repr),
    };
    // `*/` would end the surrounding comment; `\/` is a valid JSON escape.
    literal.replace("*/", "*\\/")
}

/// Numbers print the way a JS engine stringifies them for the common
/// cases: integral floats lose their `.0`.
fn format_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

fn truncate(json: String) -> String {
    if json.chars().count() <= MAX_LITERAL_CHARS {
        return json;
    }
    let mut cut: String = json.chars().take(TRUNCATED_CHARS).collect();
    cut.push(ELLIPSIS);
    cut
}

/// Keep a fallback literal on a single tag line. A blank value becomes an
/// empty string literal so the tag never ends in a bare space.
fn fallback(repr: &str) -> String {
    let collapsed = repr.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        "\"\"".to_string()
    } else {
        collapsed
    }
}
