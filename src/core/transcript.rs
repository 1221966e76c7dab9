//! Chat transcript model: role-tagged messages grouped into sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::segment::{self, ParsedMessage};

/// Title used when a session has no user message yet.
pub const DEFAULT_TITLE: &str = "New Chat";

const TITLE_WORDS: usize = 5;
const TITLE_MAX_CHARS: usize = 40;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    #[serde(alias = "assistant")]
    Ai,
    System,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Ai => "Assistant",
            Role::System => "System",
        }
    }
}

/// One chat message. The `code_*` fields mirror the first code block of `content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub role: Role,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub has_code: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_language: Option<String>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        let mut msg = Message {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            role,
            timestamp: Utc::now(),
            has_code: false,
            code_content: None,
            code_language: None,
        };
        msg.reannotate();
        msg
    }

    pub fn parsed(&self) -> ParsedMessage {
        segment::parse_message(&self.content)
    }

    /// Recompute `has_code`, `code_content` and `code_language` from `content`.
    pub fn reannotate(&mut self) {
        let parsed = self.parsed();
        let first = parsed.first_code_block();
        self.has_code = first.is_some();
        self.code_content = first.map(|(c, _)| c.to_string());
        self.code_language = first.map(|(_, l)| l.to_string());
    }
}

/// A titled, ordered conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn new(messages: Vec<Message>) -> Self {
        let now = Utc::now();
        ChatSession {
            id: Uuid::new_v4().to_string(),
            title: generate_chat_title(&messages),
            messages,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn code_block_count(&self) -> usize {
        self.messages
            .iter()
            .map(|m| m.parsed().code_blocks().count())
            .sum()
    }
}

/// One entry of a bare transcript: just who spoke and what they said.
#[derive(Debug, Deserialize)]
struct TranscriptEntry {
    #[serde(rename = "type", alias = "role")]
    role: Role,
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImportFile {
    Session(ChatSession),
    Transcript(Vec<TranscriptEntry>),
}

/// Parse either a full `ChatSession` or a bare `[{"type", "content"}]` list.
/// Code annotations are always recomputed from message content.
pub fn session_from_json(data: &str) -> Result<ChatSession, serde_json::Error> {
    let mut session = match serde_json::from_str::<ImportFile>(data)? {
        ImportFile::Session(session) => session,
        ImportFile::Transcript(entries) => ChatSession::new(
            entries
                .into_iter()
                .map(|e| Message::new(e.role, e.content))
                .collect(),
        ),
    };
    for msg in &mut session.messages {
        msg.reannotate();
    }
    Ok(session)
}

/// Title from the first user message: its first five words, capped at 40 chars.
pub fn generate_chat_title(messages: &[Message]) -> String {
    let Some(first_user) = messages.iter().find(|m| m.role == Role::User) else {
        return DEFAULT_TITLE.to_string();
    };
    let words = first_user
        .content
        .trim()
        .split(' ')
        .take(TITLE_WORDS)
        .collect::<Vec<_>>()
        .join(" ");
    if words.chars().count() > TITLE_MAX_CHARS {
        let truncated: String = words.chars().take(TITLE_MAX_CHARS).collect();
        format!("{}...", truncated)
    } else {
        words
    }
}
