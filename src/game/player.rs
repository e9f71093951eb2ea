use std::fmt;

use super::board::Cell;

/// Player 1 is the human side and always opens a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Player1,
    Player2,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Player1 => Cell::Player1,
            Player::Player2 => Cell::Player2,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Player1 => "Player 1",
            Player::Player2 => "Player 2",
        }
    }

    /// Board symbol used by the renderers
    pub fn symbol(self) -> char {
        match self {
            Player::Player1 => 'X',
            Player::Player2 => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::Player1.other(), Player::Player2);
        assert_eq!(Player::Player2.other(), Player::Player1);
    }

    #[test]
    fn test_player_name() {
        assert_eq!(Player::Player1.name(), "Player 1");
        assert_eq!(Player::Player2.to_string(), "Player 2");
    }

    #[test]
    fn test_to_cell() {
        assert_eq!(Player::Player1.to_cell(), Cell::Player1);
        assert_eq!(Player::Player2.to_cell(), Cell::Player2);
    }
}
