//! Terminal rendering of parsed messages: wrapped prose and labelled code blocks.

pub mod syntax;

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::core::config::DEFAULT_THEME;
use crate::core::segment::{ParsedMessage, Segment};

/// Accent green (#98FB98) for code headers.
const ACCENT: &str = "\x1b[38;2;152;251;152m";
/// Soft cyan (#7EC8E3) for unhighlighted code.
const ACCENT_SECONDARY: &str = "\x1b[38;2;126;200;227m";
const RESET: &str = "\x1b[0m";

/// How a message is laid out in the terminal.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Wrap width for prose; 0 disables wrapping.
    pub width: usize,
    pub color: bool,
    pub theme: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            width: 80,
            color: false,
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

static ANCHOR_RE: OnceLock<Regex> = OnceLock::new();

fn anchor_re() -> &'static Regex {
    ANCHOR_RE.get_or_init(|| {
        Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a\s*>"#)
            .expect("anchor pattern is valid")
    })
}

/// Rewrite `<a href="url">label</a>` as `label (url)`, or just `url` when they match.
fn flatten_anchors(text: &str) -> String {
    anchor_re()
        .replace_all(text, |caps: &Captures<'_>| {
            let href = caps[1].trim();
            let label = caps[2].trim();
            if label.is_empty() || label == href {
                href.to_string()
            } else {
                format!("{} ({})", label, href)
            }
        })
        .into_owned()
}

/// Split text into lines of max width. Message newlines are kept.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for line in text.split('\n') {
        if line.is_empty() || width == 0 {
            out.push(line.to_string());
            continue;
        }
        out.extend(textwrap::wrap(line, width).into_iter().map(|c| c.into_owned()));
    }
    out
}

/// Decode the entities chat models commonly escape. `&amp;` goes last so
/// `&amp;lt;` becomes `&lt;`, not `<`.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

fn render_text(content: &str, opts: &RenderOptions, out: &mut String) {
    let decoded = decode_entities(content);
    for line in wrap_text(&flatten_anchors(&decoded), opts.width) {
        out.push_str(&line);
        out.push('\n');
    }
}

fn render_code(content: &str, language: &str, opts: &RenderOptions, out: &mut String) {
    let header = format!("── {} ──", language);
    if opts.color {
        out.push_str(ACCENT);
        out.push_str(&header);
        out.push_str(RESET);
    } else {
        out.push_str(&header);
    }
    out.push('\n');

    let body = format!("{}\n", content);
    if !opts.color {
        out.push_str(&body);
        return;
    }
    match syntax::highlight_code(language, &body, &opts.theme) {
        Some(highlighted) => out.push_str(&highlighted),
        None => {
            out.push_str(ACCENT_SECONDARY);
            out.push_str(&body);
            out.push_str(RESET);
        }
    }
}

/// Render every segment in order, separated by blank lines.
pub fn render_message(parsed: &ParsedMessage, opts: &RenderOptions) -> String {
    let mut out = String::new();
    for (i, segment) in parsed.segments.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match segment {
            Segment::Text { content } => render_text(content, opts, &mut out),
            Segment::Code { content, language } => render_code(content, language, opts, &mut out),
        }
    }
    out
}
