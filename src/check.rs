//! Read-only check: does every member document the expected default?

use crate::doc;
use crate::literal::format_literal;
use crate::locate;
use crate::model::{CheckReport, Defaults, Outcome};

/// Compare documented defaults against `defaults` without touching `text`.
///
/// Either tag name is accepted when reading. A missing interface or member
/// is a mismatch with nothing found.
pub fn check(text: &str, interface: &str, defaults: &Defaults) -> CheckReport {
    let properties = locate::interface_properties(text, interface);
    if properties.is_none() {
        tracing::debug!(interface, "interface not found");
    }

    let mut mismatches = Vec::new();
    for (name, value) in defaults {
        let expected = format_literal(value);
        let members: Vec<_> = properties
            .iter()
            .flatten()
            .filter(|p| &p.name == name)
            .collect();

        if members.is_empty() {
            mismatches.push(mismatch(interface, name, &expected, None));
            continue;
        }
        for member in members {
            let found = doc::find_leading_comment(text, member.head)
                .and_then(|c| doc::read_default_literal(&c.raw));
            if found.as_deref() != Some(expected.as_str()) {
                mismatches.push(mismatch(interface, name, &expected, found));
            }
        }
    }
    CheckReport { mismatches }
}

fn mismatch(interface: &str, property: &str, expected: &str, found: Option<String>) -> Outcome {
    Outcome {
        interface: interface.to_string(),
        property: property.to_string(),
        expected: expected.to_string(),
        found,
    }
}
