//! The piece-fall animation seam. The controller only needs to know when a
//! fall starts, whether it is still running, and when to drop it.

use serde::Serialize;

use super::player::Player;

/// A landing slot chosen at click time and not yet on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingMove {
    pub column: usize,
    pub target_row: usize,
    pub player: Player,
}

pub trait FallAnimation {
    /// Start a visual fall toward `pending.target_row`.
    fn begin(&mut self, pending: PendingMove);

    /// True while a fall is in progress.
    fn is_active(&self) -> bool;

    /// Advance by `delta_secs` of wall-clock time.
    fn on_tick(&mut self, delta_secs: f32);

    /// Drop any in-flight fall.
    fn reset(&mut self);
}

/// Completes on the first tick after `begin`. Used when nothing is drawn.
#[derive(Debug, Default, Clone)]
pub struct InstantDrop {
    pending: Option<PendingMove>,
}

impl FallAnimation for InstantDrop {
    fn begin(&mut self, pending: PendingMove) {
        self.pending = Some(pending);
    }

    fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    fn on_tick(&mut self, _delta_secs: f32) {
        self.pending = None;
    }

    fn reset(&mut self) {
        self.pending = None;
    }
}
