use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::game::{Board, Cell, Player, WIDTH};

/// Style and glyph for one cell.
fn cell_span(cell: Cell, last_move: bool, color: bool) -> Span<'static> {
    let (symbol, fg) = match cell {
        Cell::Empty => (" . ".to_string(), Color::DarkGray),
        Cell::Player1 => (format!(" {} ", Player::Player1.symbol()), Color::Red),
        Cell::Player2 => (format!(" {} ", Player::Player2.symbol()), Color::Yellow),
    };

    let mut style = Style::default();
    if color {
        style = style.fg(fg);
    }
    if last_move {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(symbol, style)
}

/// Board framed by a border, top row first, with column labels above and a
/// selection marker below.
pub fn board_lines(
    board: &Board,
    selected_column: Option<usize>,
    highlight_last_move: bool,
    color: bool,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let inner_width = WIDTH * 3 + 1;

    // Column numbers with selection indicator
    let mut label_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for column in 0..WIDTH {
        let label = format!(" {} ", column + 1);
        if Some(column) == selected_column {
            label_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            label_line.push(Span::raw(label));
        }
    }
    label_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(label_line));

    lines.push(Line::from(format!("  ╔{}╗", "═".repeat(inner_width))));

    for (row, cells) in board.rows_top_down() {
        let mut row_spans = vec![Span::raw("  ║")];
        for (column, &cell) in cells.iter().enumerate() {
            let last_move = highlight_last_move && board.is_last_move(row, column);
            row_spans.push(cell_span(cell, last_move, color));
        }
        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{}╝", "═".repeat(inner_width))));

    let mut indicator_line = vec![Span::raw("   ")];
    for column in 0..WIDTH {
        if Some(column) == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    lines
}
