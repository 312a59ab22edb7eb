use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::animation::{FallAnimation, PendingMove};
use super::board::{Board, COLS};
use super::player::Player;
use super::popup::{PopupController, PopupState};
use super::rules::{check_draw, check_win};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameResult {
    InProgress,
    Won(Player),
    Draw,
}

impl GameResult {
    pub fn is_terminal(self) -> bool {
        self != GameResult::InProgress
    }
}

/// Where the controller is in a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingInput,
    /// A fall is on screen; input is ignored until it lands.
    CommittingMove(PendingMove),
    TerminalWin(Player),
    TerminalDraw,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("Column {} is full!", .column + 1)]
    ColumnFull { column: usize },

    #[error("Column {} does not exist!", .column + 1)]
    InvalidColumn { column: usize },
}

/// What a column click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A fall began toward this slot.
    Started(PendingMove),
    /// The click was legal input but the column cannot take a piece.
    Rejected(MoveError),
    /// A move is already pending or the game is over.
    Ignored,
}

/// Everything a round owns: grid, turn, result and overlay.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    current_player: Player,
    result: GameResult,
    last_move: Option<(usize, usize)>,
    move_count: usize,
    popup: PopupController,
}

impl GameSession {
    fn new(popup: PopupController) -> Self {
        GameSession {
            board: Board::new(),
            current_player: Player::Red,
            result: GameResult::InProgress,
            last_move: None,
            move_count: 0,
            popup,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn last_move(&self) -> Option<(usize, usize)> {
        self.last_move
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn popup(&self) -> &PopupState {
        self.popup.state()
    }

    /// One-line status for the bottom bar
    pub fn status_text(&self) -> String {
        match self.result {
            GameResult::InProgress => format!("{}'s Turn", self.current_player.label()),
            GameResult::Won(player) => format!("{} WINS!", player.label()),
            GameResult::Draw => "Game Over - It's a DRAW!".to_string(),
        }
    }

    fn reset(&mut self) {
        self.board.reset();
        self.current_player = Player::Red;
        self.result = GameResult::InProgress;
        self.last_move = None;
        self.move_count = 0;
        self.popup.deactivate();
    }
}

/// Read-only view handed to renderers each frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub current_player: Player,
    pub result: GameResult,
    pub move_count: usize,
    pub pending: Option<PendingMove>,
    pub popup: PopupState,
    pub status: String,
}

/// Turn sequencing for one table. Owns the session and the fall animation
/// that stands between a click and the piece reaching the board.
pub struct GameController<A: FallAnimation> {
    session: GameSession,
    phase: Phase,
    animation: A,
}

impl<A: FallAnimation> GameController<A> {
    pub fn new(animation: A, popup: PopupController) -> Self {
        GameController {
            session: GameSession::new(popup),
            phase: Phase::AwaitingInput,
            animation,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn animation(&self) -> &A {
        &self.animation
    }

    pub fn pending_move(&self) -> Option<PendingMove> {
        match self.phase {
            Phase::CommittingMove(pending) => Some(pending),
            _ => None,
        }
    }

    /// Handle a click on `column`. Only starts a move from `AwaitingInput`.
    #[instrument(skip(self), fields(player = ?self.session.current_player))]
    pub fn click_column(&mut self, column: usize) -> ClickOutcome {
        if self.phase != Phase::AwaitingInput || self.session.result.is_terminal() {
            debug!(phase = ?self.phase, "click ignored");
            return ClickOutcome::Ignored;
        }
        if column >= COLS {
            let err = MoveError::InvalidColumn { column };
            warn!(%err, "click rejected");
            return ClickOutcome::Rejected(err);
        }

        let Some(target_row) = self.session.board.find_landing_row(column) else {
            let err = MoveError::ColumnFull { column };
            warn!(%err, "click rejected");
            return ClickOutcome::Rejected(err);
        };

        let pending = PendingMove {
            column,
            target_row,
            player: self.session.current_player,
        };
        debug!(target_row, "drop started");
        self.animation.begin(pending);
        self.phase = Phase::CommittingMove(pending);
        ClickOutcome::Started(pending)
    }

    /// Advance one frame: the pending fall first, then (if it landed) the
    /// commit and result checks, then the popup fade.
    pub fn tick(&mut self, delta_secs: f32) {
        if let Phase::CommittingMove(pending) = self.phase {
            self.animation.on_tick(delta_secs);
            if !self.animation.is_active() {
                self.commit(pending);
            }
        }
        self.session.popup.advance(delta_secs);
    }

    fn commit(&mut self, pending: PendingMove) {
        let PendingMove {
            column,
            target_row,
            player,
        } = pending;
        let session = &mut self.session;

        session.board.place(target_row, column, player);
        session.last_move = Some((target_row, column));
        session.move_count += 1;
        debug!(column, target_row, ?player, "move committed");

        if check_win(&session.board, session.last_move) {
            info!(?player, moves = session.move_count, "game won");
            session.result = GameResult::Won(player);
            session.popup.activate(Some(player));
            self.phase = Phase::TerminalWin(player);
        } else if check_draw(&session.board) {
            info!(moves = session.move_count, "game drawn");
            session.result = GameResult::Draw;
            session.popup.activate(None);
            self.phase = Phase::TerminalDraw;
        } else {
            session.current_player = player.other();
            self.phase = Phase::AwaitingInput;
        }
    }

    /// Start over from any phase, discarding a pending move.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn reset(&mut self) {
        self.animation.reset();
        self.session.reset();
        self.phase = Phase::AwaitingInput;
        info!("new game");
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.session.board,
            current_player: self.session.current_player,
            result: self.session.result,
            move_count: self.session.move_count,
            pending: self.pending_move(),
            popup: self.session.popup().clone(),
            status: self.session.status_text(),
        }
    }
}
