use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::controller::Scoreboard;
use crate::game::Board;

use super::board_widget;

/// Everything one frame of the game screen shows.
pub struct GameView<'a> {
    pub board: &'a Board,
    pub score: &'a Scoreboard,
    pub selected_column: Option<usize>,
    pub message: Option<&'a str>,
    pub highlight_last_move: bool,
    pub color: bool,
}

pub fn render(frame: &mut Frame, view: &GameView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, view.score, view.color, chunks[0]);
    render_board(frame, view, chunks[1]);
    render_message(frame, view.message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, score: &Scoreboard, color: bool, area: Rect) {
    let tint = |fg: Color| {
        if color {
            Style::default().fg(fg)
        } else {
            Style::default()
        }
    };
    let status = Line::from(vec![
        Span::styled("You (X) ", tint(Color::Red)),
        Span::raw(format!(
            "{}  -  {}",
            score.human_wins, score.automated_wins
        )),
        Span::styled(" Computer (O)", tint(Color::Yellow)),
        Span::raw(format!("   |   Draws: {}", score.draws)),
    ]);

    let header = Paragraph::new(status)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, view: &GameView, area: Rect) {
    let lines = board_widget::board_lines(
        view.board,
        view.selected_column,
        view.highlight_last_move,
        view.color,
    );
    let widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("←/→: Move  |  Enter or 1-7: Drop  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_game_screen() {
        let mut board = Board::new();
        board.apply_move(Player::Player1, 3).unwrap();
        let score = Scoreboard {
            human_wins: 1,
            automated_wins: 2,
            draws: 3,
        };

        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal
            .draw(|frame| {
                render(
                    frame,
                    &GameView {
                        board: &board,
                        score: &score,
                        selected_column: Some(3),
                        message: Some("Column 4 is full"),
                        highlight_last_move: true,
                        color: true,
                    },
                )
            })
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Connect Four"));
        assert!(text.contains("1  -  2"));
        assert!(text.contains("Draws: 3"));
        assert!(text.contains("Column 4 is full"));
        assert!(text.contains('X'));
        assert!(text.contains('▲'));
    }
}
