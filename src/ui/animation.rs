use crate::game::{FallAnimation, PendingMove, Player};

/// Constant-speed fall from just above the board to the landing row.
#[derive(Debug, Clone)]
pub struct DropAnimation {
    /// Rows per second.
    fall_speed: f32,
    falling: Option<Falling>,
}

#[derive(Debug, Clone, Copy)]
struct Falling {
    pending: PendingMove,
    /// Fractional row; starts at -1.0, one row above the top.
    row: f32,
}

impl DropAnimation {
    pub fn new(fall_speed: f32) -> Self {
        DropAnimation {
            fall_speed,
            falling: None,
        }
    }

    /// Cell the falling piece currently covers, once it is over the board.
    pub fn visible_cell(&self) -> Option<(usize, usize, Player)> {
        let falling = self.falling?;
        if falling.row < 0.0 {
            return None;
        }
        let row = (falling.row.floor() as usize).min(falling.pending.target_row);
        Some((row, falling.pending.column, falling.pending.player))
    }
}

impl FallAnimation for DropAnimation {
    fn begin(&mut self, pending: PendingMove) {
        self.falling = Some(Falling { pending, row: -1.0 });
    }

    fn is_active(&self) -> bool {
        self.falling.is_some()
    }

    fn on_tick(&mut self, delta_secs: f32) {
        let Some(falling) = self.falling.as_mut() else {
            return;
        };
        falling.row += self.fall_speed * delta_secs.max(0.0);
        if falling.row >= falling.pending.target_row as f32 {
            self.falling = None;
        }
    }

    fn reset(&mut self) {
        self.falling = None;
    }
}
