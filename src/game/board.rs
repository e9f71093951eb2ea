use super::player::Player;

pub const HEIGHT: usize = 6;
pub const WIDTH: usize = 7;
pub const WIN_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Player1,
    Player2,
}

/// Position of the most recently placed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastMove {
    pub column: usize,
    pub row: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("row {0} is out of range")]
    RowOutOfRange(usize),
    #[error("column {} is out of range (1-{})", .0 + 1, WIDTH)]
    ColumnOutOfRange(usize),
    #[error("column {} is full", .0 + 1)]
    ColumnFull(usize),
    #[error("the game is already over")]
    GameOver,
    #[error("it is not {0}'s turn")]
    NotYourTurn(Player),
}

/// Row 0 is the bottom of the board; tokens stack upward from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; WIDTH]; HEIGHT],
    last_move: Option<LastMove>,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
            last_move: None,
        }
    }

    /// Clear every cell and forget the last move
    pub fn reset(&mut self) {
        *self = Board::new();
    }

    /// Get the cell at a specific position
    pub fn cell_at(&self, row: usize, column: usize) -> Result<Cell, MoveError> {
        if row >= HEIGHT {
            return Err(MoveError::RowOutOfRange(row));
        }
        if column >= WIDTH {
            return Err(MoveError::ColumnOutOfRange(column));
        }
        Ok(self.cells[row][column])
    }

    /// Number of tokens in a column, counted from the bottom
    pub fn column_height(&self, column: usize) -> Result<usize, MoveError> {
        if column >= WIDTH {
            return Err(MoveError::ColumnOutOfRange(column));
        }
        Ok((0..HEIGHT)
            .take_while(|&row| self.cells[row][column] != Cell::Empty)
            .count())
    }

    /// Check if a token can still be dropped into a column.
    /// Columns outside the board are never playable.
    pub fn can_play(&self, column: usize) -> bool {
        self.column_height(column)
            .map(|height| height < HEIGHT)
            .unwrap_or(false)
    }

    /// Drop a token in a column, returns the row where it landed
    pub fn apply_move(&mut self, player: Player, column: usize) -> Result<usize, MoveError> {
        let row = self.column_height(column)?;
        if row >= HEIGHT {
            return Err(MoveError::ColumnFull(column));
        }

        self.cells[row][column] = player.to_cell();
        self.last_move = Some(LastMove { column, row });
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..WIDTH).all(|column| !self.can_play(column))
    }

    /// Total number of tokens on the board
    pub fn move_count(&self) -> usize {
        (0..WIDTH)
            .filter_map(|column| self.column_height(column).ok())
            .sum()
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    pub fn is_last_move(&self, row: usize, column: usize) -> bool {
        self.last_move == Some(LastMove { column, row })
    }

    /// Rows paired with their index, top of the stack first (render order)
    pub fn rows_top_down(&self) -> impl Iterator<Item = (usize, &[Cell; WIDTH])> + '_ {
        self.cells.iter().enumerate().rev()
    }

    /// Scan the whole grid for `WIN_LENGTH` of the player's tokens in a line.
    ///
    /// Horizontal lines are checked first (rows top to bottom, left to right),
    /// then vertical (columns left to right, bottom to top), then the two
    /// diagonals.
    pub fn check_win(&self, player: Player) -> bool {
        let cell = player.to_cell();

        self.check_horizontal(cell)
            || self.check_vertical(cell)
            || self.check_diagonal_down_right(cell)
            || self.check_diagonal_down_left(cell)
    }

    /// True if `WIN_LENGTH` cells from (row, column) stepping by (dr, dc) all hold `cell`
    fn line_from(&self, row: usize, column: usize, dr: isize, dc: isize, cell: Cell) -> bool {
        (0..WIN_LENGTH as isize).all(|i| {
            let r = row as isize + dr * i;
            let c = column as isize + dc * i;
            r >= 0
                && c >= 0
                && (r as usize) < HEIGHT
                && (c as usize) < WIDTH
                && self.cells[r as usize][c as usize] == cell
        })
    }

    fn check_horizontal(&self, cell: Cell) -> bool {
        (0..HEIGHT).rev().any(|row| {
            (0..=WIDTH - WIN_LENGTH).any(|column| self.line_from(row, column, 0, 1, cell))
        })
    }

    fn check_vertical(&self, cell: Cell) -> bool {
        (0..WIDTH).any(|column| {
            (0..=HEIGHT - WIN_LENGTH).any(|row| self.line_from(row, column, 1, 0, cell))
        })
    }

    /// Top-left to bottom-right (\)
    fn check_diagonal_down_right(&self, cell: Cell) -> bool {
        (WIN_LENGTH - 1..HEIGHT).rev().any(|row| {
            (0..=WIDTH - WIN_LENGTH).any(|column| self.line_from(row, column, -1, 1, cell))
        })
    }

    /// Top-right to bottom-left (/)
    fn check_diagonal_down_left(&self, cell: Cell) -> bool {
        (WIN_LENGTH - 1..HEIGHT).rev().any(|row| {
            (WIN_LENGTH - 1..WIDTH).any(|column| self.line_from(row, column, -1, -1, cell))
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
