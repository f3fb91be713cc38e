//! Canonical block rendering.

use super::{DefaultTag, ParsedComment};

/// Everything needed to lay out one comment block.
pub struct RenderOptions<'a> {
    pub indent: &'a str,
    /// `" "` or `""` after each `*`.
    pub star_pad: &'a str,
    pub comment: &'a ParsedComment,
    pub literal: &'a str,
    pub tag: DefaultTag,
}

/// Render a `/** ... */` block, without a trailing newline.
///
/// Layout: description, a blank ` *` separator, the default tag, then
/// every other tag in its original order. Existing default tags of either
/// name are dropped in favour of the single new one.
pub fn render_comment(opts: &RenderOptions) -> String {
    let indent = opts.indent;
    let star_pad = opts.star_pad;
    let content = |text: &str| {
        if text.is_empty() {
            format!("{indent} *")
        } else {
            format!("{indent} *{star_pad}{text}")
        }
    };

    let mut lines = vec![format!("{indent}/**")];
    if !opts.comment.description.is_empty() {
        lines.extend(opts.comment.description.iter().map(|l| content(l.as_str())));
        lines.push(content(""));
    }
    let default_line = format!("@{} {}", opts.tag.name(), opts.literal);
    lines.push(content(default_line.as_str()));
    for tag in &opts.comment.tags {
        if DefaultTag::is_default_tag(&tag.name) {
            continue;
        }
        let tag_line = format!("@{}{}", tag.name, tag.rest);
        lines.push(content(tag_line.as_str()));
        lines.extend(tag.continuation.iter().map(|l| content(l.as_str())));
    }
    lines.push(format!("{indent} */"));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::parse_comment;

    fn render(raw: &str, indent: &str, star_pad: &str, literal: &str, tag: DefaultTag) -> String {
        let comment = parse_comment(raw);
        render_comment(&RenderOptions {
            indent,
            star_pad,
            comment: &comment,
            literal,
            tag,
        })
    }

    #[test]
    fn fresh_block() {
        let out = render("", "  ", " ", "\"bar\"", DefaultTag::Default);
        assert_eq!(out, "  /**\n   * @default \"bar\"\n   */");
    }

    #[test]
    fn keeps_description_and_other_tags() {
        let raw = "/**\n * Doc line.\n * @deprecated use other\n * @default 1\n */";
        let out = render(raw, "", " ", "2", DefaultTag::Default);
        assert_eq!(
            out,
            "/**\n * Doc line.\n *\n * @default 2\n * @deprecated use other\n */"
        );
    }

    #[test]
    fn collapses_both_default_tags() {
        let raw = "/**\n * @default \"wrong\"\n * @defaultValue \"also-wrong\"\n */";
        let out = render(raw, "", " ", "\"correct\"", DefaultTag::Default);
        assert_eq!(out, "/**\n * @default \"correct\"\n */");
    }

    #[test]
    fn tight_pad_and_preferred_value_tag() {
        let out = render("/** Doc. */", "\t", "", "1", DefaultTag::DefaultValue);
        assert_eq!(out, "\t/**\n\t *Doc.\n\t *\n\t *@defaultValue 1\n\t */");
    }

    #[test]
    fn line_comment_becomes_block() {
        let out = render("// First\n// Second", "  ", " ", "true", DefaultTag::Default);
        assert_eq!(
            out,
            "  /**\n   * First\n   * Second\n   *\n   * @default true\n   */"
        );
    }

    #[test]
    fn tag_continuation_preserved() {
        let raw = "/**\n * @example\n *   run();\n */";
        let out = render(raw, "", " ", "0", DefaultTag::Default);
        assert_eq!(out, "/**\n * @default 0\n * @example\n *   run();\n */");
    }
}
