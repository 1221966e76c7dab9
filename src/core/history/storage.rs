//! history.json read/write with atomic replace.

use std::fs;
use std::io;
use std::path::Path;

use crate::core::transcript::ChatSession;

use super::HistoryError;

pub(super) fn read_sessions(path: &Path) -> Result<Vec<ChatSession>, HistoryError> {
    let data = match fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
        Err(e) => return Err(e.into()),
    };
    if data.trim().is_empty() {
        return Ok(vec![]);
    }
    let sessions: Vec<ChatSession> = serde_json::from_str(&data)?;
    log::debug!("loaded {} chat session(s) from {}", sessions.len(), path.display());
    Ok(sessions)
}

pub(super) fn write_sessions(path: &Path, sessions: &[ChatSession]) -> Result<(), HistoryError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(sessions)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

pub(super) fn remove(path: &Path) -> Result<(), HistoryError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
