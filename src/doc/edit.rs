//! Create-or-replace of the default annotation above a member.

use super::{find_leading_comment, parse_comment, render_comment, DefaultTag, LeadingComment};
use super::{CommentKind, RenderOptions};

/// Indentation for a rewritten comment.
///
/// An existing comment keeps its own indent when it is within one
/// character of the member's; bigger drift snaps back to the member.
pub fn choose_indent<'a>(member_indent: &'a str, existing: Option<&'a str>) -> &'a str {
    match existing {
        Some(current) if current.chars().count().abs_diff(member_indent.chars().count()) <= 1 => {
            current
        }
        _ => member_indent,
    }
}

/// Whether a comment already carries exactly `literal` under `tag`.
///
/// The preferred tag must appear once with that literal and the other
/// recognized tag must be absent. `//` comments never qualify.
pub fn is_current(comment: Option<&LeadingComment>, literal: &str, tag: DefaultTag) -> bool {
    let Some(comment) = comment else {
        return false;
    };
    if comment.kind != CommentKind::Block {
        return false;
    }
    let parsed = parse_comment(&comment.raw);
    let mut preferred = parsed.tags.iter().filter(|t| t.name == tag.name());
    let matches = matches!(
        (preferred.next(), preferred.next()),
        (Some(t), None) if t.text() == literal
    );
    matches && !parsed.tags.iter().any(|t| t.name == tag.other().name())
}

/// Write `@<tag> <literal>` into the comment above the member at `head`.
///
/// An existing comment is re-rendered in place, keeping its description,
/// other tags and `*` spacing. Without one, a fresh block goes on its own
/// line(s) directly above the member. Returns the new text.
pub fn upsert_default(
    text: &str,
    head: usize,
    member_indent: &str,
    literal: &str,
    tag: DefaultTag,
) -> String {
    let existing = find_leading_comment(text, head);
    let parsed = existing
        .as_ref()
        .map(|c| parse_comment(&c.raw))
        .unwrap_or_default();
    let star_pad = existing.as_ref().map_or(" ", |c| c.star_pad());
    let indent = choose_indent(
        member_indent,
        existing.as_ref().and_then(|c| c.indent.as_deref()),
    );
    let block = render_comment(&RenderOptions {
        indent,
        star_pad,
        comment: &parsed,
        literal,
        tag,
    });

    // Replace [start, end) with the block; a fresh block also needs the
    // newline that separates it from the member line.
    let (start, end, trailer) = match &existing {
        Some(c) => (c.start, c.end, ""),
        None => {
            let line_begin = head - trailing_blanks(&text[..head]);
            (line_begin, line_begin, "\n")
        }
    };

    let mut out = String::with_capacity(text.len() + block.len() + 2);
    out.push_str(&text[..start]);
    if start > 0 && !text[..start].ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&block);
    out.push_str(trailer);
    out.push_str(&text[end..]);
    tracing::trace!(head, literal, "rewrote default annotation");
    out
}

/// Length of the run of spaces/tabs at the end of `s`.
fn trailing_blanks(s: &str) -> usize {
    s.len() - s.trim_end_matches([' ', '\t']).len()
}
