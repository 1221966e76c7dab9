//! Message segmentation: split a chat message into prose and fenced code segments.
//!
//! Fences are runs of three or more backticks or tildes. A block opens with a fence
//! followed by an optional language tag and a newline, and closes at the next run of
//! the same character that is at least as long. Unclosed or mismatched fences stay in
//! the surrounding text.

mod fence;
mod sanitize;

use sanitize::sanitize_inline_html;

use serde::{Deserialize, Serialize};

/// Language assigned to code blocks whose fence carries no tag.
pub const DEFAULT_LANGUAGE: &str = "text";

/// One render-ready run of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    /// Sanitized prose. Anchor tags are kept verbatim.
    Text { content: String },
    /// Raw trimmed code body with a lowercase language tag.
    Code { content: String, language: String },
}

impl Segment {
    pub fn content(&self) -> &str {
        match self {
            Segment::Text { content } | Segment::Code { content, .. } => content,
        }
    }
}

/// Segments of one message, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMessage {
    pub segments: Vec<Segment>,
}

impl ParsedMessage {
    /// `(content, language)` of every code segment, in order.
    pub fn code_blocks(&self) -> impl Iterator<Item = (&str, &str)> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Code { content, language } => Some((content.as_str(), language.as_str())),
            Segment::Text { .. } => None,
        })
    }

    pub fn first_code_block(&self) -> Option<(&str, &str)> {
        self.code_blocks().next()
    }

    /// Text for the copy action: every segment joined by a blank line.
    pub fn clipboard_text(&self) -> String {
        self.segments
            .iter()
            .map(Segment::content)
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Prose only, with markdown punctuation removed, for text-to-speech.
    pub fn speakable_text(&self) -> String {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Text { content } => Some(content.as_str()),
                Segment::Code { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
            .chars()
            .filter(|c| !matches!(c, '*' | '_' | '~' | '`' | '#'))
            .collect()
    }
}

fn push_text(segments: &mut Vec<Segment>, raw: &str) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    let content = sanitize_inline_html(trimmed);
    if content.trim().is_empty() {
        log::trace!("dropping text run that sanitized to whitespace");
        return;
    }
    segments.push(Segment::Text { content });
}

/// Split `content` into text and code segments. Never fails: malformed fences
/// degrade to plain text.
pub fn parse_message(content: &str) -> ParsedMessage {
    let blocks = fence::find_fence_blocks(content);
    let mut segments = Vec::with_capacity(blocks.len() * 2 + 1);
    let mut last_end = 0;

    for block in &blocks {
        push_text(&mut segments, &content[last_end..block.start]);
        let code = block.body.trim();
        if !code.is_empty() {
            let language = if block.info.is_empty() {
                DEFAULT_LANGUAGE.to_string()
            } else {
                block.info.to_lowercase()
            };
            segments.push(Segment::Code {
                content: code.to_string(),
                language,
            });
        }
        last_end = block.end;
    }
    push_text(&mut segments, &content[last_end..]);

    log::debug!(
        "segmented message ({} bytes): {} fence blocks, {} segments",
        content.len(),
        blocks.len(),
        segments.len()
    );
    ParsedMessage { segments }
}

/// True when `parse_message` would emit at least one code segment.
pub fn has_code_block(content: &str) -> bool {
    fence::find_fence_blocks(content)
        .iter()
        .any(|b| !b.body.trim().is_empty())
}

#[cfg(test)]
mod tests;
