use crate::game::{Board, Player};

/// Interface for automated players.
pub trait Agent {
    /// Choose a 0-indexed column for `player` to play on `board`.
    ///
    /// Callers must only ask when at least one column is playable.
    fn select_column(&mut self, board: &Board, player: Player) -> usize;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
