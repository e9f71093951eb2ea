use super::{Board, MoveError, Player};

/// Result of applying a single move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue,
    Win(Player),
    Draw,
}

impl TurnOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TurnOutcome::Continue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: TurnOutcome,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::Player1, // Player 1 starts
            outcome: TurnOutcome::Continue,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> TurnOutcome {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Drop the current player's token and classify the result.
    ///
    /// A win is checked before fullness so that a winning final move is never
    /// reported as a draw. The turn passes to the other player only when the
    /// game continues.
    pub fn play(&mut self, column: usize) -> Result<TurnOutcome, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let player = self.current_player;
        self.board.apply_move(player, column)?;

        self.outcome = if self.board.check_win(player) {
            TurnOutcome::Win(player)
        } else if self.board.is_full() {
            TurnOutcome::Draw
        } else {
            self.current_player = player.other();
            TurnOutcome::Continue
        };

        Ok(self.outcome)
    }

    /// Start over with an empty board and Player 1 to move
    pub fn reset(&mut self) {
        *self = GameState::initial();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
