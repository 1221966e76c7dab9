use std::env;
use std::path::PathBuf;

use crate::core::paths;
use crate::render::syntax;

pub const DATA_DIR_VAR: &str = "CHAT_SEGMENTER_DATA_DIR";
pub const THEME_VAR: &str = "CHAT_SEGMENTER_THEME";
pub const HISTORY_LIMIT_VAR: &str = "CHAT_SEGMENTER_HISTORY_LIMIT";

pub const DEFAULT_THEME: &str = "base16-ocean.dark";
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding history.json. None when no platform dir is available.
    pub data_dir: Option<PathBuf>,
    pub theme: String,
    pub history_limit: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CHAT_SEGMENTER_THEME: unknown theme '{0}'")]
    UnknownTheme(String),
    #[error("CHAT_SEGMENTER_HISTORY_LIMIT must be a positive integer, got '{0}'")]
    InvalidHistoryLimit(String),
}

impl Config {
    /// Build a config from a variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = get(DATA_DIR_VAR)
            .map(PathBuf::from)
            .or_else(paths::default_data_dir);

        let theme = get(THEME_VAR).unwrap_or_else(|| DEFAULT_THEME.to_string());
        if !syntax::theme_exists(&theme) {
            return Err(ConfigError::UnknownTheme(theme));
        }

        let history_limit = match get(HISTORY_LIMIT_VAR) {
            None => DEFAULT_HISTORY_LIMIT,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidHistoryLimit(raw)),
            },
        };

        Ok(Config {
            data_dir,
            theme,
            history_limit,
        })
    }
}

/// Load configuration from the process environment.
pub fn load() -> Result<Config, ConfigError> {
    let config = Config::from_lookup(|key| env::var(key).ok())?;
    log::debug!(
        "config: data_dir={:?} theme={} history_limit={}",
        config.data_dir,
        config.theme,
        config.history_limit
    );
    Ok(config)
}
