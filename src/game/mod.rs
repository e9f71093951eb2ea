//! Core Connect Four rules: board representation, player types, and the
//! turn state machine.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, LastMove, MoveError, HEIGHT, WIDTH, WIN_LENGTH};
pub use player::Player;
pub use state::{GameState, TurnOutcome};
