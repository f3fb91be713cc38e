//! Documentation comments attached to property members.
//!
//! A comment belongs to a member when only whitespace separates the two.
//! The link is recomputed from offsets on every call; nothing is cached
//! across edits.

pub mod edit;
pub mod parse;
pub mod render;

use crate::scan;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

pub use edit::{choose_indent, is_current, upsert_default};
pub use parse::{parse_comment, ParsedComment, Tag};
pub use render::{render_comment, RenderOptions};

/// Which of the two recognized tag names gets written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum DefaultTag {
    #[default]
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "defaultValue")]
    DefaultValue,
}

impl DefaultTag {
    pub fn name(self) -> &'static str {
        match self {
            DefaultTag::Default => "default",
            DefaultTag::DefaultValue => "defaultValue",
        }
    }

    /// The recognized tag name that is not `self`.
    pub fn other(self) -> DefaultTag {
        match self {
            DefaultTag::Default => DefaultTag::DefaultValue,
            DefaultTag::DefaultValue => DefaultTag::Default,
        }
    }

    /// True for either recognized default tag name.
    pub fn is_default_tag(name: &str) -> bool {
        name == "default" || name == "defaultValue"
    }
}

impl fmt::Display for DefaultTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DefaultTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(DefaultTag::Default),
            "defaultValue" => Ok(DefaultTag::DefaultValue),
            _ => Err(format!(
                "unknown tag: {}. Use default or defaultValue",
                s
            )),
        }
    }
}

/// Shape of the comment found directly above a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// A `/** ... */` block.
    Block,
    /// One or more consecutive `//` lines.
    Lines,
}

/// A leading comment and where it sits in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadingComment {
    pub kind: CommentKind,
    /// Replaceable range. Starts at the beginning of the opener's line when
    /// only whitespace precedes the opener; ends right after the comment.
    pub start: usize,
    pub end: usize,
    /// Comment text from its opener to its end, without leading indentation.
    pub raw: String,
    /// Whitespace before the opener on its line, if the opener starts the line.
    pub indent: Option<String>,
}

impl LeadingComment {
    /// Spacing after `*` on content lines: `" "` or `""`.
    ///
    /// Taken from the first content line of a block; line comments and
    /// single-line blocks use a single space.
    pub fn star_pad(&self) -> &'static str {
        if self.kind == CommentKind::Lines {
            return " ";
        }
        for line in self.raw.lines().skip(1) {
            let trimmed = line.trim_start();
            let Some(after) = trimmed.strip_prefix('*') else {
                continue;
            };
            if after.is_empty() || after.starts_with('/') {
                continue;
            }
            return if after.starts_with(' ') || after.starts_with('\t') {
                " "
            } else {
                ""
            };
        }
        " "
    }
}

fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

fn line_start(text: &str, at: usize) -> usize {
    text[..at].rfind('\n').map_or(0, |i| i + 1)
}

/// Start of the horizontal whitespace directly before `at`, and whether
/// that whitespace runs back to the beginning of the line.
fn indent_before(text: &str, at: usize) -> (usize, bool) {
    let bytes = text.as_bytes();
    let mut i = at;
    while i > 0 && matches!(bytes[i - 1], b' ' | b'\t') {
        i -= 1;
    }
    (i, i == 0 || bytes[i - 1] == b'\n')
}

/// Find the comment attached to the member starting at `head`.
///
/// A `/** */` block directly above (modulo whitespace) wins; otherwise a
/// run of consecutive `//` lines counts. A plain `/* */` block is not a
/// documentation comment.
pub fn find_leading_comment(text: &str, head: usize) -> Option<LeadingComment> {
    let bytes = text.as_bytes();
    let mut end = head.min(text.len());
    while end > 0 && is_blank(bytes[end - 1]) {
        end -= 1;
    }
    if end == 0 {
        return None;
    }

    if text[..end].ends_with("*/") {
        // Comments don't nest: the opener is the first `/*` in code after
        // the previous `*/`. Searching back for `/*` would stop inside
        // bodies like `src/**/*.ts`.
        let close = end - 2;
        let floor = text[..close].rfind("*/").map_or(0, |i| i + 2);
        let open = scan::find_comment_open(text, floor, close)?;
        if !text[open..].starts_with("/**") {
            return None;
        }
        let (line_begin, at_line_start) = indent_before(text, open);
        let (start, indent) = if at_line_start {
            (line_begin, Some(text[line_begin..open].to_string()))
        } else {
            (open, None)
        };
        return Some(LeadingComment {
            kind: CommentKind::Block,
            start,
            end,
            raw: text[open..end].to_string(),
            indent,
        });
    }

    // Walk up through consecutive `//` lines.
    let mut first = line_start(text, end);
    if !text[first..end].trim_start().starts_with("//") {
        return None;
    }
    while first > 0 {
        let prev = line_start(text, first - 1);
        if !text[prev..first - 1].trim_start().starts_with("//") {
            break;
        }
        first = prev;
    }
    let indent_len = text[first..end].len() - text[first..end].trim_start().len();
    Some(LeadingComment {
        kind: CommentKind::Lines,
        start: first,
        end,
        raw: text[first + indent_len..end].to_string(),
        indent: Some(text[first..first + indent_len].to_string()),
    })
}

/// The literal documented by either default tag, first occurrence wins.
pub fn read_default_literal(raw: &str) -> Option<String> {
    parse_comment(raw)
        .tags
        .iter()
        .find(|t| DefaultTag::is_default_tag(&t.name))
        .map(|t| t.text().to_string())
}
