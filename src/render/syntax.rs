//! Syntax highlighting for code segments using syntect.

use std::sync::OnceLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::{LinesWithEndings, as_24_bit_terminal_escaped};

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

/// Whether syntect ships a theme with this name.
pub fn theme_exists(name: &str) -> bool {
    theme_set().themes.contains_key(name)
}

/// Names of the bundled themes, sorted.
pub fn theme_names() -> Vec<&'static str> {
    theme_set().themes.keys().map(String::as_str).collect()
}

/// Map a fence language tag (e.g. "rust", "python") to a syntect extension.
fn lang_to_extension(lang: &str) -> &'static str {
    match lang.trim().to_lowercase().as_str() {
        "rs" | "rust" => "rs",
        "py" | "python" => "py",
        "js" | "javascript" | "jsx" => "js",
        "ts" | "typescript" | "tsx" => "ts",
        "go" | "golang" => "go",
        "rb" | "ruby" => "rb",
        "sh" | "bash" | "zsh" | "shell" => "sh",
        "sql" => "sql",
        "json" => "json",
        "yaml" | "yml" => "yml",
        "toml" => "toml",
        "md" | "markdown" => "md",
        "html" => "html",
        "css" => "css",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" | "c++" => "cpp",
        "java" => "java",
        _ => "plain",
    }
}

/// Highlight `code` as 24-bit ANSI text. Returns None for unknown languages,
/// unknown themes, or when syntect fails on the input.
pub fn highlight_code(lang: &str, code: &str, theme: &str) -> Option<String> {
    let ps = syntax_set();
    let ext = lang_to_extension(lang);
    if ext == "plain" {
        return None;
    }
    let syntax = ps.find_syntax_by_extension(ext)?;
    let theme = theme_set().themes.get(theme)?;

    let mut h = HighlightLines::new(syntax, theme);
    let mut out = String::with_capacity(code.len() * 2);
    for line in LinesWithEndings::from(code) {
        match h.highlight_line(line, ps) {
            Ok(ranges) => out.push_str(&as_24_bit_terminal_escaped(&ranges, false)),
            Err(e) => {
                log::debug!("highlighting {} failed: {}", lang, e);
                return None;
            }
        }
    }
    // Reset so colours do not leak into whatever is printed next.
    out.push_str("\x1b[0m");
    Some(out)
}
