//! Comment text → description lines and tags.

use super::DefaultTag;
use regex::Regex;
use std::sync::LazyLock;

static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@(\w[\w-]*)(.*)$").unwrap());

/// A `@name rest` entry of a block comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    /// Everything after the name on the tag line, spacing included.
    pub rest: String,
    /// Following non-tag lines that belong to this tag.
    pub continuation: Vec<String>,
}

impl Tag {
    /// The tag's value on its own line, trimmed.
    pub fn text(&self) -> &str {
        self.rest.trim()
    }
}

/// Parsed form of a documentation comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedComment {
    pub description: Vec<String>,
    pub tags: Vec<Tag>,
}

/// Parse a raw comment as returned by [`super::find_leading_comment`].
///
/// Block comments lose their `/**`/`*/` delimiters and each line its
/// leading whitespace, one `*`, and at most one space. `//` comments are
/// prose only: they never yield tags. Lines after a default tag are
/// description, since that tag is replaced wholesale on rewrite.
pub fn parse_comment(raw: &str) -> ParsedComment {
    let raw = raw.trim();
    let Some(inner) = raw.strip_prefix("/**") else {
        let description = raw.lines().map(strip_line_marker).collect();
        return ParsedComment {
            description: trim_blank_edges(description),
            tags: Vec::new(),
        };
    };
    let inner = inner.strip_suffix("*/").unwrap_or(inner);

    let mut description = Vec::new();
    let mut tags: Vec<Tag> = Vec::new();
    for line in inner.lines() {
        let line = strip_star(line);
        if let Some(caps) = RE_TAG.captures(&line) {
            tags.push(Tag {
                name: caps[1].to_string(),
                rest: caps[2].trim_end().to_string(),
                continuation: Vec::new(),
            });
        } else if let Some(tag) = tags
            .last_mut()
            .filter(|t| !DefaultTag::is_default_tag(&t.name))
        {
            tag.continuation.push(line);
        } else {
            description.push(line);
        }
    }
    for tag in &mut tags {
        let lines = std::mem::take(&mut tag.continuation);
        tag.continuation = trim_blank_edges(lines);
    }

    ParsedComment {
        description: trim_blank_edges(description),
        tags,
    }
}

/// Strip leading whitespace, one `*`, and at most one following space.
fn strip_star(line: &str) -> String {
    let s = line.trim_start();
    let s = s.strip_prefix('*').unwrap_or(s);
    let s = s.strip_prefix(' ').unwrap_or(s);
    s.trim_end().to_string()
}

/// Strip leading whitespace, `//`, and at most one following space.
fn strip_line_marker(line: &str) -> String {
    let s = line.trim_start();
    let s = s.strip_prefix("//").unwrap_or(s);
    let s = s.strip_prefix(' ').unwrap_or(s);
    s.trim_end().to_string()
}

fn trim_blank_edges(mut lines: Vec<String>) -> Vec<String> {
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|l| l.trim().is_empty()).count();
    lines.drain(..leading);
    lines
}
