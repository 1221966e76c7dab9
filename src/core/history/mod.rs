//! Local chat history: sessions persisted most-recent-first in one JSON file.

mod storage;

use std::io;
use std::path::{Path, PathBuf};

use crate::core::config::{Config, DEFAULT_HISTORY_LIMIT};
use crate::core::transcript::ChatSession;

const HISTORY_FILE: &str = "history.json";

/// Errors from loading or saving history.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("No data directory available (set CHAT_SEGMENTER_DATA_DIR)")]
    NoDataDir,
    #[error("History I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("History file is corrupt: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No chat session with id '{0}'")]
    NotFound(String),
}

/// Handle to the history file in a data directory.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    limit: usize,
}

impl HistoryStore {
    pub fn open(dir: impl AsRef<Path>) -> Self {
        HistoryStore {
            path: dir.as_ref().join(HISTORY_FILE),
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, HistoryError> {
        let dir = config.data_dir.as_ref().ok_or(HistoryError::NoDataDir)?;
        Ok(HistoryStore::open(dir).with_limit(config.history_limit))
    }

    /// Maximum number of sessions kept; older ones are dropped on save.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All sessions, most recent first. A missing file is an empty history.
    pub fn list(&self) -> Result<Vec<ChatSession>, HistoryError> {
        storage::read_sessions(&self.path)
    }

    pub fn get(&self, id: &str) -> Result<Option<ChatSession>, HistoryError> {
        Ok(self.list()?.into_iter().find(|s| s.id == id))
    }

    /// Like `get`, but a missing session is an error.
    pub fn require(&self, id: &str) -> Result<ChatSession, HistoryError> {
        self.get(id)?
            .ok_or_else(|| HistoryError::NotFound(id.to_string()))
    }

    /// Replace the session with the same id in place, or insert it at the front.
    /// Then prune to the configured limit.
    pub fn save(&self, session: ChatSession) -> Result<(), HistoryError> {
        let mut sessions = self.list()?;
        match sessions.iter().position(|s| s.id == session.id) {
            Some(idx) => {
                log::debug!("updating chat session {}", session.id);
                sessions[idx] = session;
            }
            None => {
                log::debug!("adding chat session {}", session.id);
                sessions.insert(0, session);
            }
        }
        if sessions.len() > self.limit {
            log::info!(
                "pruning {} old chat session(s)",
                sessions.len() - self.limit
            );
            sessions.truncate(self.limit);
        }
        storage::write_sessions(&self.path, &sessions)
    }

    /// Remove a session. Returns whether it existed.
    pub fn delete(&self, id: &str) -> Result<bool, HistoryError> {
        let mut sessions = self.list()?;
        let before = sessions.len();
        sessions.retain(|s| s.id != id);
        if sessions.len() == before {
            return Ok(false);
        }
        storage::write_sessions(&self.path, &sessions)?;
        Ok(true)
    }

    /// Delete the history file. A missing file is not an error.
    pub fn clear(&self) -> Result<(), HistoryError> {
        storage::remove(&self.path)
    }
}
