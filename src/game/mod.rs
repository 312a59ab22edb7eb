//! Core Connect Four logic: board, win/draw rules, the turn controller that
//! gates moves behind the fall animation, and the end-of-game popup.

mod animation;
mod board;
mod controller;
mod player;
mod popup;
pub mod rules;

pub use animation::{FallAnimation, InstantDrop, PendingMove};
pub use board::{Board, Cell, COLS, ROWS};
pub use controller::{
    ClickOutcome, GameController, GameResult, GameSession, GameSnapshot, MoveError, Phase,
};
pub use player::Player;
pub use popup::{PopupController, PopupState, DEFAULT_FADE_RATE, DRAW_MESSAGE, MAX_FADE};
pub use rules::{check_draw, check_win};
