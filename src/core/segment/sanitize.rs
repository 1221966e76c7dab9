//! Prose normalization for text segments: strip non-anchor tags and bold markers.
//!
//! This is a regex-level rule, not an HTML parser. Any `<...>` run up to the next
//! `>` is a tag; it is removed unless its name is `a` (case-insensitive). Quoted
//! `>` inside attribute values and nested anchors are not handled.

use std::sync::OnceLock;

use regex::{Captures, Regex};

static TAG_RE: OnceLock<Regex> = OnceLock::new();
static BOLD_RE: OnceLock<Regex> = OnceLock::new();

fn tag_re() -> &'static Regex {
    TAG_RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"))
}

fn bold_re() -> &'static Regex {
    BOLD_RE.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"))
}

/// True for `<a ...>`, `<a>`, `<a/>`, `</a>` and their upper-case forms.
/// The tag name runs up to whitespace, `/` or `>`.
fn is_anchor_tag(tag: &str) -> bool {
    let inner = tag.trim_start_matches('<');
    let inner = inner.strip_prefix('/').unwrap_or(inner);
    let name = inner
        .split(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .next()
        .unwrap_or("");
    name.eq_ignore_ascii_case("a")
}

/// Normalize a text segment: remove every tag except anchors, then unwrap `**bold**`.
pub(crate) fn sanitize_inline_html(text: &str) -> String {
    let without_tags = tag_re().replace_all(text, |caps: &Captures<'_>| {
        let tag = &caps[0];
        if is_anchor_tag(tag) {
            tag.to_string()
        } else {
            String::new()
        }
    });
    bold_re().replace_all(&without_tags, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_preserved_verbatim() {
        let s = r#"Visit <a href="https://x.io">site</a> now"#;
        assert_eq!(sanitize_inline_html(s), s);
    }

    #[test]
    fn anchor_attributes_kept() {
        let s = r#"<a href="https://x.io" target="_blank" rel="noopener">x</a>"#;
        assert_eq!(sanitize_inline_html(s), s);
    }

    #[test]
    fn uppercase_anchor_kept() {
        let s = r#"<A HREF="/">home</A>"#;
        assert_eq!(sanitize_inline_html(s), s);
    }

    #[test]
    fn other_tags_stripped_inner_text_kept() {
        assert_eq!(
            sanitize_inline_html("<div>Hello <strong>there</strong></div>"),
            "Hello there"
        );
    }

    #[test]
    fn tags_starting_with_a_are_not_anchors() {
        assert_eq!(
            sanitize_inline_html("<abbr title=\"x\">HTML</abbr> <aside>y</aside>"),
            "HTML y"
        );
    }

    #[test]
    fn tags_with_a_prefix_and_punctuation_are_not_anchors() {
        assert_eq!(
            sanitize_inline_html("x <a-widget>y</a-widget> <a:x>1</a:x> <a_x>2</a_x> &amp; z"),
            "x y 12 &amp; z"
        );
    }

    #[test]
    fn bare_and_self_closing_anchor_kept() {
        assert_eq!(sanitize_inline_html("<a>x</a> <a/>"), "<a>x</a> <a/>");
    }

    #[test]
    fn bold_markers_removed() {
        assert_eq!(sanitize_inline_html("**Bold** plain"), "Bold plain");
        assert_eq!(sanitize_inline_html("**a** and **b**"), "a and b");
    }

    #[test]
    fn lone_bold_marker_left_alone() {
        assert_eq!(sanitize_inline_html("2 ** 3"), "2 ** 3");
    }

    #[test]
    fn bold_does_not_span_lines() {
        assert_eq!(sanitize_inline_html("**a\nb**"), "**a\nb**");
    }

    #[test]
    fn bold_inside_stripped_tag() {
        assert_eq!(sanitize_inline_html("<b>**x**</b>"), "x");
    }

    #[test]
    fn angle_brackets_in_prose_are_treated_as_tags() {
        assert_eq!(sanitize_inline_html("a < b > c"), "a  c");
    }
}
