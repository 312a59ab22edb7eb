use crate::game::{Board, Cell, GameResult, GameSnapshot, Player, PopupState, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Characters per board cell.
pub const CELL_WIDTH: u16 = 3;
/// Cells plus the two frame columns.
pub const BOARD_WIDTH: u16 = COLS as u16 * CELL_WIDTH + 2;

const POPUP_WIDTH: u16 = 44;
const POPUP_HEIGHT: u16 = 11;
const POPUP_BACKGROUND: (u8, u8, u8) = (20, 20, 40);

/// Everything one frame needs besides the snapshot.
pub struct FrameView<'a> {
    pub snapshot: &'a GameSnapshot,
    pub falling: Option<(usize, usize, Player)>,
    pub selected_column: usize,
    pub message: Option<&'a str>,
}

/// Draw a frame and return the screen area of the board's cells, which the
/// caller uses to map mouse clicks to columns.
pub fn render(frame: &mut Frame, view: &FrameView) -> Rect {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Min(ROWS as u16 + 3), // Board
            Constraint::Length(3),            // Status
            Constraint::Length(3),            // Controls
        ])
        .split(area);

    render_header(frame, view.snapshot, chunks[0]);
    let cells = render_board(frame, view, chunks[1]);
    render_status(frame, view, chunks[2]);
    render_controls(frame, chunks[3]);

    if view.snapshot.popup.active {
        render_popup(frame, &view.snapshot.popup, area);
    }

    cells
}

/// Column under screen x, given the cell area returned by [`render`].
pub fn column_at(cells: Rect, x: u16) -> Option<usize> {
    if x < cells.x || x >= cells.x + cells.width {
        return None;
    }
    let col = ((x - cells.x) / CELL_WIDTH) as usize;
    (col < COLS).then_some(col)
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::Red,
        Player::Yellow => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame, snapshot: &GameSnapshot, area: Rect) {
    let color = match snapshot.result {
        GameResult::InProgress => player_color(snapshot.current_player),
        GameResult::Won(player) => player_color(player),
        GameResult::Draw => Color::Cyan,
    };

    let header = Paragraph::new(snapshot.status.as_str())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn board_lines(
    board: &Board,
    falling: Option<(usize, usize, Player)>,
    selected_column: usize,
) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(ROWS + 3);

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw(" ")];
    for col in 0..COLS {
        let label = format!(" {} ", col + 1);
        if col == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw(" "));
    lines.push(Line::from(col_line));

    lines.push(Line::from(format!("╔{}╗", "═".repeat(COLS * CELL_WIDTH as usize))));

    for row in 0..ROWS {
        let mut spans = vec![Span::raw("║")];
        for col in 0..COLS {
            let cell = match falling {
                Some((r, c, player)) if r == row && c == col => player.to_cell(),
                _ => board.get(row, col),
            };
            let (symbol, color) = match cell {
                Cell::Empty => (" . ", Color::DarkGray),
                Cell::Red => (" ● ", Color::Red),
                Cell::Yellow => (" ● ", Color::Yellow),
            };
            spans.push(Span::styled(symbol, Style::default().fg(color)));
        }
        spans.push(Span::raw("║"));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(format!("╚{}╝", "═".repeat(COLS * CELL_WIDTH as usize))));
    lines
}

fn render_board(frame: &mut Frame, view: &FrameView, area: Rect) -> Rect {
    let lines = board_lines(
        &view.snapshot.board,
        view.falling,
        view.selected_column,
    );

    let width = BOARD_WIDTH.min(area.width);
    let height = (lines.len() as u16).min(area.height);
    let board_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    frame.render_widget(Paragraph::new(lines), board_area);

    // Inside the left frame column, spanning every cell
    Rect {
        x: board_area.x + 1,
        y: board_area.y + 2,
        width: width.saturating_sub(2),
        height: ROWS as u16,
    }
}

fn render_status(frame: &mut Frame, view: &FrameView, area: Rect) {
    let mut spans = Vec::new();
    if let Some(message) = view.message {
        spans.push(Span::styled(message.to_string(), Style::default().fg(Color::Yellow)));
    }
    if view.snapshot.result.is_terminal() {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled("Press R to Restart", Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(status, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("←/→: Move  |  Enter/Click: Drop  |  R: Restart  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

/// Accent and text colors for a result, as (border, text) RGB.
fn popup_palette(winner: Option<Player>) -> ((u8, u8, u8), (u8, u8, u8)) {
    match winner {
        Some(Player::Red) => ((255, 0, 100), (255, 100, 100)),
        Some(Player::Yellow) => ((255, 220, 0), (255, 255, 100)),
        None => ((100, 200, 255), (150, 220, 255)),
    }
}

/// Terminals have no alpha channel, so fading is a blend from the popup
/// background toward `target` by `alpha / 255`.
pub fn fade_color(target: (u8, u8, u8), alpha: u8) -> Color {
    let t = f32::from(alpha) / 255.0;
    let mix = |from: u8, to: u8| (f32::from(from) + (f32::from(to) - f32::from(from)) * t).round() as u8;
    Color::Rgb(
        mix(POPUP_BACKGROUND.0, target.0),
        mix(POPUP_BACKGROUND.1, target.1),
        mix(POPUP_BACKGROUND.2, target.2),
    )
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_popup(frame: &mut Frame, popup: &PopupState, area: Rect) {
    let alpha = popup.alpha();
    let (accent, text) = popup_palette(popup.winner);
    let background = Color::Rgb(POPUP_BACKGROUND.0, POPUP_BACKGROUND.1, POPUP_BACKGROUND.2);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "GAME OVER",
            Style::default()
                .fg(fade_color((255, 255, 255), alpha))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "─".repeat(POPUP_WIDTH as usize - 12),
            Style::default().fg(fade_color(accent, alpha)),
        )),
        Line::from(""),
        Line::from(Span::styled(
            popup.message.clone(),
            Style::default()
                .fg(fade_color(text, alpha))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            ">> PRESS R TO RESTART <<",
            Style::default()
                .fg(fade_color((0, 255, 150), popup.restart_prompt_alpha()))
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let popup_area = centered(area, POPUP_WIDTH, POPUP_HEIGHT);
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(fade_color(accent, alpha))),
        );

    frame.render_widget(Clear, popup_area);
    frame.render_widget(widget, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameController, InstantDrop, PopupController};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn draw(snapshot: &GameSnapshot) -> (Terminal<TestBackend>, Rect) {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        let mut cells = Rect::default();
        let view = FrameView {
            snapshot,
            falling: None,
            selected_column: 3,
            message: None,
        };
        terminal
            .draw(|f| {
                cells = render(f, &view);
            })
            .unwrap();
        (terminal, cells)
    }

    #[test]
    fn test_column_at_maps_cells() {
        let cells = Rect::new(10, 5, COLS as u16 * CELL_WIDTH, ROWS as u16);
        assert_eq!(column_at(cells, 9), None);
        assert_eq!(column_at(cells, 10), Some(0));
        assert_eq!(column_at(cells, 12), Some(0));
        assert_eq!(column_at(cells, 13), Some(1));
        assert_eq!(column_at(cells, 10 + 3 * COLS as u16 - 1), Some(COLS - 1));
        assert_eq!(column_at(cells, 10 + 3 * COLS as u16), None);
    }

    #[test]
    fn test_fade_color_endpoints() {
        assert_eq!(fade_color((255, 0, 100), 0), Color::Rgb(20, 20, 40));
        assert_eq!(fade_color((255, 0, 100), 255), Color::Rgb(255, 0, 100));
    }

    #[test]
    fn test_render_in_progress() {
        let ctrl = GameController::new(InstantDrop::default(), PopupController::default());
        let (terminal, cells) = draw(&ctrl.snapshot());

        assert_eq!(cells.width, COLS as u16 * CELL_WIDTH);
        let text = screen_text(&terminal);
        assert!(text.contains("Player 1 (Red)'s Turn"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_render_popup_after_win() {
        let mut ctrl = GameController::new(InstantDrop::default(), PopupController::default());
        for col in [3, 0, 3, 0, 3, 0, 3] {
            ctrl.click_column(col);
            ctrl.tick(0.1);
        }
        let (terminal, _) = draw(&ctrl.snapshot());

        let text = screen_text(&terminal);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Player 1 (Red) WINS!"));
    }
}
