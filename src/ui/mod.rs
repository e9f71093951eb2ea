//! Frontends: a full-screen terminal UI and a plain line-based console.
//!
//! The controller only talks to the [`ColumnSource`] and [`BoardView`]
//! traits, so either frontend (or a scripted one in tests) can drive a game.

mod app;
mod board_widget;
mod console;
mod game_view;

use std::io;

use crate::controller::Scoreboard;
use crate::error::InputError;
use crate::game::Board;

pub use app::{App, KeyAction};
pub use console::ConsoleFrontend;

/// Where the human's moves come from.
pub trait ColumnSource {
    /// Ask for a 1-indexed column. `Ok(None)` means the input could not be
    /// understood and the player should be asked again.
    fn request_column(&mut self, board: &Board) -> Result<Option<usize>, InputError>;

    /// Block until the player confirms the end of a game.
    fn acknowledge(&mut self) -> Result<(), InputError>;
}

/// Where the game is shown.
pub trait BoardView {
    fn render(&mut self, board: &Board, score: &Scoreboard) -> io::Result<()>;

    fn notify(&mut self, message: &str) -> io::Result<()>;

    /// Audible alert for a lost game.
    fn alert(&mut self) -> io::Result<()>;
}

/// Both halves of a frontend.
pub trait Frontend: ColumnSource + BoardView {}

impl<T: ColumnSource + BoardView + ?Sized> Frontend for T {}
