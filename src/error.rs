use std::path::PathBuf;

use crate::game::{MoveError, Player};

/// Errors raised by a frontend while reading the player's input.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("input closed")]
    Exhausted,

    #[error("I/O error while reading input: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that end the game loop.
#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    #[error("{agent} picked column {column}, which could not be played: {source}")]
    SelectorDefect {
        agent: String,
        column: usize,
        source: MoveError,
    },

    #[error("{0} was asked to move out of turn")]
    OutOfTurn(Player),

    #[error("failed to read input: {0}")]
    Input(#[source] std::io::Error),

    #[error("failed to draw the board: {0}")]
    Render(#[from] std::io::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
