use crate::config::AppConfig;
use crate::game::{ClickOutcome, GameController, PopupController, COLS};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{backend::Backend, layout::Rect, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

use super::animation::DropAnimation;
use super::game_view::{self, FrameView};

pub struct App {
    controller: GameController<DropAnimation>,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    /// Where the board's cells were last drawn.
    board_cells: Rect,
    poll_interval: Duration,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        App {
            controller: GameController::new(
                DropAnimation::new(config.animation.fall_speed),
                PopupController::new(config.popup.fade_rate),
            ),
            selected_column: COLS / 2, // Start in middle
            should_quit: false,
            message: None,
            board_cells: Rect::default(),
            poll_interval: Duration::from_millis(config.ui.tick_ms),
        }
    }

    /// Main application loop: draw, handle input, then advance time.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let mut last_frame = Instant::now();
        loop {
            self.draw(terminal)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;

            let now = Instant::now();
            let delta = now.duration_since(last_frame).as_secs_f32();
            last_frame = now;
            self.controller.tick(delta);
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let snapshot = self.controller.snapshot();
        let view = FrameView {
            snapshot: &snapshot,
            falling: self.controller.animation().visible_cell(),
            selected_column: self.selected_column,
            message: self.message.as_deref(),
        };
        let mut board_cells = self.board_cells;
        terminal.draw(|f| {
            board_cells = game_view::render(f, &view);
        })?;
        self.board_cells = board_cells;
        Ok(())
    }

    /// Drain pending input, waiting at most one poll interval for the first event.
    fn handle_events(&mut self) -> io::Result<()> {
        let mut timeout = self.poll_interval;
        while event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                _ => {}
            }
            timeout = Duration::ZERO;
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(self.selected_column);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.controller.reset();
                self.selected_column = COLS / 2;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(column) = game_view::column_at(self.board_cells, mouse.column) else {
            debug!(x = mouse.column, "click outside the board");
            return;
        };
        self.selected_column = column;
        self.drop_piece(column);
    }

    /// Drop piece in `column`
    fn drop_piece(&mut self, column: usize) {
        self.message = match self.controller.click_column(column) {
            ClickOutcome::Started(_) => None,
            ClickOutcome::Rejected(err) => Some(err.to_string()),
            ClickOutcome::Ignored if self.controller.session().result().is_terminal() => {
                Some("Game over! Press 'r' to restart.".to_string())
            }
            // A piece is still falling; leave the current message alone.
            ClickOutcome::Ignored => return,
        };
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}
