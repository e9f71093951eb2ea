use std::io::{self, BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{style, Print, PrintStyledContent, Stylize};
use crossterm::terminal::{Clear, ClearType};

use crate::config::UiConfig;
use crate::controller::Scoreboard;
use crate::error::InputError;
use crate::game::{Board, Cell, Player, WIDTH};

use super::{BoardView, ColumnSource};

/// Line-based frontend over any reader/writer pair.
pub struct ConsoleFrontend<R, W> {
    input: R,
    output: W,
    options: UiConfig,
}

impl ConsoleFrontend<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio(options: UiConfig) -> Self {
        ConsoleFrontend::new(io::stdin().lock(), io::stdout(), options)
    }
}

impl<R: BufRead, W: Write> ConsoleFrontend<R, W> {
    pub fn new(input: R, output: W, options: UiConfig) -> Self {
        ConsoleFrontend {
            input,
            output,
            options,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Raw bytes of the next line; bytes that are not UTF-8 are the caller's
    /// problem, not an I/O failure.
    fn read_line(&mut self) -> Result<Vec<u8>, InputError> {
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(InputError::Exhausted);
        }
        Ok(line)
    }

    fn write_cell(&mut self, cell: Cell, last_move: bool) -> io::Result<()> {
        let symbol = match cell {
            Cell::Empty => '.',
            Cell::Player1 => Player::Player1.symbol(),
            Cell::Player2 => Player::Player2.symbol(),
        };

        let mut styled = style(symbol);
        if self.options.color && cell == Cell::Player1 {
            styled = styled.red();
        }
        if self.options.highlight_last_move && last_move {
            styled = styled.reverse();
        }
        queue!(self.output, PrintStyledContent(styled), Print(' '))
    }
}

impl<R: BufRead, W: Write> ColumnSource for ConsoleFrontend<R, W> {
    fn request_column(&mut self, _board: &Board) -> Result<Option<usize>, InputError> {
        write!(self.output, "\nEnter a column between 1 and {WIDTH}.  ")?;
        self.output.flush()?;

        let line = self.read_line()?;
        Ok(String::from_utf8_lossy(&line).trim().parse::<usize>().ok())
    }

    fn acknowledge(&mut self) -> Result<(), InputError> {
        write!(self.output, "Press Enter to play again.  ")?;
        self.output.flush()?;
        self.read_line().map(|_| ())
    }
}

impl<R: BufRead, W: Write> BoardView for ConsoleFrontend<R, W> {
    fn render(&mut self, board: &Board, score: &Scoreboard) -> io::Result<()> {
        if self.options.clear_screen {
            queue!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }

        for (row, cells) in board.rows_top_down() {
            for (column, &cell) in cells.iter().enumerate() {
                self.write_cell(cell, board.is_last_move(row, column))?;
            }
            write!(self.output, "\n\n")?;
        }

        let labels: Vec<String> = (1..=WIDTH).map(|column| column.to_string()).collect();
        writeln!(self.output, "{} ", labels.join(" "))?;
        writeln!(self.output, "{}", "**".repeat(WIDTH))?;

        if score.games() > 0 {
            writeln!(
                self.output,
                "You {} - {} Computer ({} drawn)",
                score.human_wins, score.automated_wins, score.draws
            )?;
        }
        self.output.flush()
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")?;
        self.output.flush()
    }

    fn alert(&mut self) -> io::Result<()> {
        let bells = "\x07".repeat(self.options.beep_count as usize);
        self.output.write_all(bells.as_bytes())?;
        self.output.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::HeuristicAgent;
    use crate::controller::Controller;
    use std::io::Cursor;

    fn plain_options() -> UiConfig {
        UiConfig {
            color: false,
            clear_screen: false,
            highlight_last_move: false,
            ..UiConfig::default()
        }
    }

    fn frontend(input: &str, options: UiConfig) -> ConsoleFrontend<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleFrontend::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), options)
    }

    fn output_of(frontend: ConsoleFrontend<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(frontend.into_output()).unwrap()
    }

    #[test]
    fn test_request_column_parses_numbers() {
        let mut console = frontend("4\n  7 \nabc\n", plain_options());
        let board = Board::new();

        assert_eq!(console.request_column(&board).unwrap(), Some(4));
        assert_eq!(console.request_column(&board).unwrap(), Some(7));
        assert_eq!(console.request_column(&board).unwrap(), None);
        assert!(matches!(
            console.request_column(&board),
            Err(InputError::Exhausted)
        ));

        assert!(output_of(console).contains("Enter a column between 1 and 7."));
    }

    #[test]
    fn test_request_column_skips_invalid_utf8() {
        let input = Cursor::new(b"\xff\xfe\n1\n".to_vec());
        let mut console = ConsoleFrontend::new(input, Vec::new(), plain_options());
        let board = Board::new();

        assert_eq!(console.request_column(&board).unwrap(), None);
        assert_eq!(console.request_column(&board).unwrap(), Some(1));
    }

    #[test]
    fn test_invalid_utf8_is_reprompted_in_game() {
        let input = Cursor::new(b"\xff\xfe\n1\n".to_vec());
        let mut console = ConsoleFrontend::new(input, Vec::new(), plain_options());
        let mut controller = Controller::new(HeuristicAgent::from_seed(1));

        controller.run(&mut console).unwrap();

        assert_eq!(controller.board().cell_at(0, 0), Ok(Cell::Player1));
        assert_eq!(controller.board().move_count(), 2);
        assert!(output_of(console).contains("Invalid input."));
    }

    #[test]
    fn test_acknowledge_needs_a_line() {
        let mut console = frontend("\n", plain_options());
        assert!(console.acknowledge().is_ok());
        assert!(matches!(console.acknowledge(), Err(InputError::Exhausted)));
    }

    #[test]
    fn test_render_plain_board() {
        let mut board = Board::new();
        board.apply_move(Player::Player1, 0).unwrap();
        board.apply_move(Player::Player2, 0).unwrap();
        board.apply_move(Player::Player2, 6).unwrap();

        let mut console = frontend("", plain_options());
        console.render(&board, &Scoreboard::default()).unwrap();
        let output = output_of(console);
        let lines: Vec<&str> = output.lines().filter(|line| !line.is_empty()).collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], ". . . . . . . ");
        assert_eq!(lines[4], "O . . . . . . ");
        assert_eq!(lines[5], "X . . . . . O ");
        assert_eq!(lines[6], "1 2 3 4 5 6 7 ");
        assert_eq!(lines[7], "**************");
    }

    #[test]
    fn test_render_shows_score_after_first_game() {
        let mut console = frontend("", plain_options());
        let score = Scoreboard {
            human_wins: 2,
            automated_wins: 1,
            draws: 0,
        };
        console.render(&Board::new(), &score).unwrap();
        assert!(output_of(console).contains("You 2 - 1 Computer (0 drawn)"));
    }

    #[test]
    fn test_render_with_styles() {
        let mut board = Board::new();
        board.apply_move(Player::Player1, 3).unwrap();

        let mut console = frontend("", UiConfig::default());
        console.render(&board, &Scoreboard::default()).unwrap();
        let output = output_of(console);

        assert!(output.starts_with("\x1b[2J"), "screen should be cleared first");
        assert!(output.contains("\x1b["), "expected ANSI styling");
        assert!(output.contains('X'));
    }

    #[test]
    fn test_alert_rings_configured_bells() {
        let mut console = frontend("", UiConfig::default());
        console.alert().unwrap();
        assert_eq!(output_of(console), "\x07\x07\x07\x07");
    }

    #[test]
    fn test_notify_writes_line() {
        let mut console = frontend("", plain_options());
        console.notify("Player 2 wins!").unwrap();
        assert_eq!(output_of(console), "Player 2 wins!\n");
    }
}
