use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};

use crate::config::UiConfig;
use crate::controller::Scoreboard;
use crate::error::InputError;
use crate::game::{Board, WIDTH};

use super::game_view::{self, GameView};
use super::{BoardView, ColumnSource};

/// What a key press asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Drop a token in this 1-indexed column.
    Drop(usize),
    Quit,
    /// Any other key; used to dismiss a finished game.
    Continue,
}

/// Full-screen frontend. Moves are picked with the arrow keys or digits.
pub struct App<B: Backend> {
    terminal: Terminal<B>,
    board: Board,
    score: Scoreboard,
    selected_column: usize,
    message: Option<String>,
    options: UiConfig,
}

impl<B: Backend> App<B> {
    pub fn new(terminal: Terminal<B>, options: UiConfig) -> Self {
        App {
            terminal,
            board: Board::new(),
            score: Scoreboard::default(),
            selected_column: WIDTH / 2, // Start in middle
            message: None,
            options,
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// Translate a key press, moving the selection for arrow keys.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<KeyAction> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(KeyAction::Quit),
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                if self.selected_column + 1 < WIDTH {
                    self.selected_column += 1;
                }
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(KeyAction::Drop(self.selected_column + 1)),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let column = c.to_digit(10).unwrap_or_default() as usize;
                if (1..=WIDTH).contains(&column) {
                    self.selected_column = column - 1;
                }
                Some(KeyAction::Drop(column))
            }
            _ => Some(KeyAction::Continue),
        }
    }

    /// Redraw the screen from the last board and message handed in.
    pub fn draw(&mut self) -> io::Result<()> {
        let view = GameView {
            board: &self.board,
            score: &self.score,
            selected_column: Some(self.selected_column),
            message: self.message.as_deref(),
            highlight_last_move: self.options.highlight_last_move,
            color: self.options.color,
        };
        self.terminal.draw(|frame| game_view::render(frame, &view))?;
        Ok(())
    }

    /// React to one terminal event. Key presses may yield an action; anything
    /// that changes what is on screen triggers a redraw.
    pub fn handle_event(&mut self, event: Event) -> io::Result<Option<KeyAction>> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(action) = self.handle_key(key) {
                    return Ok(Some(action));
                }
                self.draw()?;
            }
            Event::Resize(_, _) => self.draw()?,
            _ => {}
        }
        Ok(None)
    }

    /// Block until a key is pressed (releases and repeats are skipped).
    fn next_action(&mut self) -> Result<KeyAction, InputError> {
        loop {
            if let Some(action) = self.handle_event(event::read()?)? {
                return Ok(action);
            }
        }
    }
}

impl<B: Backend> ColumnSource for App<B> {
    fn request_column(&mut self, board: &Board) -> Result<Option<usize>, InputError> {
        self.board = *board;
        self.draw()?;

        loop {
            match self.next_action()? {
                KeyAction::Drop(column) => {
                    self.message = None;
                    return Ok(Some(column));
                }
                KeyAction::Quit => return Err(InputError::Exhausted),
                KeyAction::Continue => {}
            }
        }
    }

    fn acknowledge(&mut self) -> Result<(), InputError> {
        let prompt = "Press any key to play again, q to quit";
        self.message = Some(match self.message.take() {
            Some(message) => format!("{message}  {prompt}"),
            None => prompt.to_string(),
        });
        self.draw()?;

        let action = self.next_action()?;
        self.message = None;
        match action {
            KeyAction::Quit => Err(InputError::Exhausted),
            _ => Ok(()),
        }
    }
}

impl<B: Backend> BoardView for App<B> {
    fn render(&mut self, board: &Board, score: &Scoreboard) -> io::Result<()> {
        self.board = *board;
        self.score = *score;
        self.draw()
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        self.message = Some(message.to_string());
        self.draw()
    }

    fn alert(&mut self) -> io::Result<()> {
        // The backend owns the screen; the bell goes straight to the tty.
        let mut stdout = io::stdout();
        stdout.write_all("\x07".repeat(self.options.beep_count as usize).as_bytes())?;
        stdout.flush()
    }
}
