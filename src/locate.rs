//! Declaration locator: interface bodies and their property lines.
//!
//! Pattern-based, not a parser: the body of `interface Name { ... }` is
//! found with a regex plus brace matching, and properties are the
//! single-line `name?: Type;` members at the top level of that body.

use crate::scan;
use regex::Regex;
use std::sync::LazyLock;

/// Head of a property member: indent, optional `readonly`, key
/// (identifier or quoted), optional `?`, `:`, then the type text.
static RE_PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"^([ \t]*)(?:readonly[ \t]+)?"#,
        r#"([A-Za-z_$][\w$]*|'(?:[^'\\]|\\.)*'|"(?:[^"\\]|\\.)*")"#,
        r#"[ \t]*\??[ \t]*:(.*)$"#
    ))
    .unwrap()
});

/// Half-open byte range of an interface body, braces excluded.
///
/// `text[end]` is the closing `}` of the declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyRange {
    pub start: usize,
    pub end: usize,
}

/// A property member found in an interface body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Key with surrounding quotes removed.
    pub name: String,
    /// Offset of the first non-whitespace byte of the member line.
    pub head: usize,
    /// Leading whitespace of the member line, verbatim.
    pub indent: String,
}

/// Build the pattern for the head of `interface <name> ... {`.
fn interface_head(name: &str) -> Regex {
    let pattern = format!(
        r"(?:^|[^\w$.])(?:export\s+)?(?:declare\s+)?interface\s+{}\b(?:\s*<[^{{]*>)?(?:\s+extends\s+[^{{]+)?\s*\{{",
        regex::escape(name)
    );
    // The name is escaped, so the pattern is always valid.
    Regex::new(&pattern).unwrap()
}

/// Locate the body of the first `interface <name>` in `text`.
pub fn find_interface_body(text: &str, name: &str) -> Option<BodyRange> {
    let head = interface_head(name).find(text)?;
    let open = head.end() - 1;
    let close = scan::find_matching(text, open, b'{', b'}')?;
    Some(BodyRange {
        start: open + 1,
        end: close,
    })
}

/// List the property members of a body, in source order.
///
/// `offset` is where `body` starts in the full text; returned heads are
/// absolute. Methods, index signatures and members whose type spans several
/// lines are skipped. A member typed as a multi-line inline object is
/// reported once by its own name; its fields are not members of this body.
pub fn list_properties(body: &str, offset: usize) -> Vec<Property> {
    let mut properties = Vec::new();
    for start in scan::top_level_line_starts(body) {
        let rest = &body[start..];
        let line = rest.split('\n').next().unwrap_or(rest);
        let Some(caps) = RE_PROPERTY.captures(line) else {
            continue;
        };
        if !is_terminated(&caps[3]) {
            continue;
        }
        let indent = caps[1].to_string();
        properties.push(Property {
            name: unquote(&caps[2]).to_string(),
            head: offset + start + indent.len(),
            indent,
        });
    }
    properties
}

/// Find an interface and list its properties in one step.
///
/// `None` means the interface itself is missing; an interface without
/// matching members yields an empty list.
pub fn interface_properties(text: &str, name: &str) -> Option<Vec<Property>> {
    let body = find_interface_body(text, name)?;
    Some(list_properties(&text[body.start..body.end], body.start))
}

/// A member counts when its `;` is on the head line, or when the line
/// opens an inline object type (the `};` then closes it further down).
fn is_terminated(type_text: &str) -> bool {
    type_text.contains(';') || type_text.trim_end().ends_with('{')
}

fn unquote(key: &str) -> &str {
    let quoted = key.len() >= 2
        && ((key.starts_with('"') && key.ends_with('"'))
            || (key.starts_with('\'') && key.ends_with('\'')));
    if quoted {
        &key[1..key.len() - 1]
    } else {
        key
    }
}
