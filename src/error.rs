use std::path::PathBuf;

use crate::game::Player;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("unknown player strategy '{0}' (expected human, ai, or random)")]
    UnknownStrategy(String),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that abandon a turn. None of these are recoverable by the
/// coordinator itself; the game stops progressing and awaits a reset.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error("{player} ({strategy}) proposed illegal column {column} (legal: {legal:?})")]
    IllegalAgentMove {
        player: Player,
        strategy: &'static str,
        column: usize,
        legal: Vec<usize>,
    },

    #[error("{player} ({strategy}) failed to propose a move")]
    NoMoveProposed {
        player: Player,
        strategy: &'static str,
    },

    #[error("random agent found no legal column after {attempts} attempts")]
    RandomAgentExhausted { attempts: usize },

    #[error("human input channel closed while a move was awaited")]
    InputClosed,

    #[error("game is already over")]
    GameOver,
}
