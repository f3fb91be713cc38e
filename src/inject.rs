//! Injection pass: bring every requested member's `@default` up to date.
//!
//! Tasks are applied bottom-up (highest offset first). Each rewrite only
//! touches the comment range directly above its own member, so members
//! earlier in the text keep their offsets and one locate pass is enough.

use crate::doc::{self, DefaultTag};
use crate::literal::format_literal;
use crate::locate;
use crate::model::{Defaults, InjectReport, Outcome};

/// One member to annotate.
struct Task<'a> {
    property: &'a str,
    head: usize,
    indent: String,
    literal: String,
}

/// Annotate the members of `interface` listed in `defaults`.
///
/// A missing interface is not an error: the text comes back unchanged and
/// every requested property is reported missing.
pub fn inject(text: &str, interface: &str, defaults: &Defaults, tag: DefaultTag) -> InjectReport {
    let Some(properties) = locate::interface_properties(text, interface) else {
        tracing::debug!(interface, "interface not found");
        return InjectReport {
            text: text.to_string(),
            updated: 0,
            missing: defaults
                .iter()
                .map(|(name, value)| missing(interface, name, format_literal(value)))
                .collect(),
            interface_found: false,
        };
    };

    let mut tasks = Vec::new();
    let mut missing_props = Vec::new();
    for (name, value) in defaults {
        let literal = format_literal(value);
        let mut matched = false;
        for prop in properties.iter().filter(|p| &p.name == name) {
            matched = true;
            tasks.push(Task {
                property: name,
                head: prop.head,
                indent: prop.indent.clone(),
                literal: literal.clone(),
            });
        }
        if !matched {
            missing_props.push(missing(interface, name, literal));
        }
    }

    tasks.sort_by(|a, b| b.head.cmp(&a.head));

    let mut current = text.to_string();
    let mut updated = 0;
    for task in &tasks {
        let comment = doc::find_leading_comment(&current, task.head);
        if doc::is_current(comment.as_ref(), &task.literal, tag) {
            tracing::trace!(property = task.property, "already current");
            continue;
        }
        current = doc::upsert_default(&current, task.head, &task.indent, &task.literal, tag);
        updated += 1;
        tracing::debug!(
            interface,
            property = task.property,
            literal = %task.literal,
            "updated default"
        );
    }

    InjectReport {
        text: current,
        updated,
        missing: missing_props,
        interface_found: true,
    }
}

fn missing(interface: &str, property: &str, expected: String) -> Outcome {
    Outcome {
        interface: interface.to_string(),
        property: property.to_string(),
        expected,
        found: None,
    }
}
