//! # Connect Four
//!
//! Connect Four in the terminal against a rule-based computer opponent.
//! Features a full-screen UI built with Ratatui and a plain line-based
//! console mode for piped input.
//!
//! ## Modules
//!
//! - [`game`] - Core game logic: board, player, turn state machine
//! - [`ai`] - Agent trait and the win/block/random heuristic
//! - [`controller`] - Turn order, game over, restart and score keeping
//! - [`ui`] - Frontends: terminal UI and plain console
//! - [`config`] - TOML configuration loading and validation
//! - [`error`] - Structured error types

pub mod ai;
pub mod config;
pub mod controller;
pub mod error;
pub mod game;
pub mod ui;
