//! Pull a whole declaration out of a text for display.

use crate::scan;
use regex::Regex;

/// Keyword that introduced the located declaration.
#[derive(Clone, Copy)]
enum Kind {
    Interface,
    TypeAlias,
}

fn head_pattern(kind: Kind, name: &str) -> Regex {
    let name = regex::escape(name);
    let pattern = match kind {
        Kind::Interface => format!(
            r"(?m)^[ \t]*((?:export\s+)?(?:declare\s+)?interface\s+{name}\b[^{{]*\{{)"
        ),
        Kind::TypeAlias => {
            format!(r"(?m)^[ \t]*((?:export\s+)?(?:declare\s+)?type\s+{name}\b[^=]*=)")
        }
    };
    // The name is escaped, so the pattern is always valid.
    Regex::new(&pattern).unwrap()
}

/// Extract the declaration of `type_name`, an interface or a type alias.
///
/// A dotted name (`ns.Options`) is looked up by its last segment. With
/// `include_doc`, a `/** */` block directly above the declaration is part
/// of the result.
pub fn extract_block(text: &str, type_name: &str, include_doc: bool) -> Option<String> {
    let name = type_name.rsplit('.').next().unwrap_or(type_name);

    let (kind, head) = [Kind::Interface, Kind::TypeAlias]
        .into_iter()
        .find_map(|kind| {
            let caps = head_pattern(kind, name).captures(text)?;
            caps.get(1).map(|m| (kind, m))
        })?;

    let end = match kind {
        Kind::Interface => {
            let close = scan::find_matching(text, head.end() - 1, b'{', b'}')?;
            if text.as_bytes().get(close + 1) == Some(&b';') {
                close + 2
            } else {
                close + 1
            }
        }
        Kind::TypeAlias => scan::find_statement_end(text, head.end())? + 1,
    };

    let start = if include_doc {
        doc_start(text, head.start()).unwrap_or(head.start())
    } else {
        head.start()
    };
    Some(text[start..end].to_string())
}

/// Offset of a `/**` opener whose comment ends right above `at`.
fn doc_start(text: &str, at: usize) -> Option<usize> {
    let before = text[..at].trim_end();
    let close = before.strip_suffix("*/")?.len();
    let floor = text[..close].rfind("*/").map_or(0, |i| i + 2);
    let open = scan::find_comment_open(text, floor, close)?;
    text[open..].starts_with("/**").then_some(open)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"import type { X } from "./x";

/**
 * Client options.
 */
export interface Options {
  a: string;
  b: { c: number };
};

/** A complex alias. */
export type Complex = { a: () => void; nested: { x: 1; y: 2; }; } & Array<string>;

type Plain = "a" | "b";
"#;

    #[test]
    fn interface_with_doc() {
        let block = extract_block(SOURCE, "Options", true).unwrap();
        assert!(block.starts_with("/**\n * Client options.\n */\nexport interface Options {"));
        assert!(block.ends_with("  b: { c: number };\n};"));
    }

    #[test]
    fn interface_without_doc() {
        let block = extract_block(SOURCE, "Options", false).unwrap();
        assert!(block.starts_with("export interface Options {"));
    }

    #[test]
    fn type_alias_ends_at_top_level_semicolon() {
        let block = extract_block(SOURCE, "Complex", false).unwrap();
        assert_eq!(
            block,
            "export type Complex = { a: () => void; nested: { x: 1; y: 2; }; } & Array<string>;"
        );
    }

    #[test]
    fn type_alias_with_doc() {
        let block = extract_block(SOURCE, "Complex", true).unwrap();
        assert!(block.starts_with("/** A complex alias. */\nexport type Complex"));
    }

    #[test]
    fn dotted_name_uses_last_segment() {
        let block = extract_block(SOURCE, "api.Plain", true).unwrap();
        assert_eq!(block, "type Plain = \"a\" | \"b\";");
    }

    #[test]
    fn doc_found_past_glob_string_in_earlier_code() {
        let text = "const a: \"image/*\";\n/** Picker options. */\nexport interface Picker {\n  accept: string;\n}\n";
        let block = extract_block(text, "Picker", true).unwrap();
        assert!(block.starts_with("/** Picker options. */\nexport interface Picker {"));
    }

    #[test]
    fn not_found() {
        assert!(extract_block(SOURCE, "Missing", true).is_none());
        assert!(extract_block("type Broken = { a: 1", "Broken", false).is_none());
    }
}
