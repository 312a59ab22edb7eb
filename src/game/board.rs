use serde::Serialize;

use super::player::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// The player occupying this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Player::Red),
            Cell::Yellow => Some(Player::Yellow),
        }
    }
}

/// The playing grid. Row 0 is the top, row `ROWS - 1` the bottom; pieces
/// settle bottom-up so a column never has a gap below an occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Rows from top to bottom, for renderers
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; COLS]> {
        self.cells.iter()
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Row a piece dropped into `col` would settle in, or `None` if the
    /// column has no room. Does not touch the board.
    pub fn find_landing_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Record a piece at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics if the position is out of range or already occupied. Callers
    /// must only pass a row obtained from [`Board::find_landing_row`] on the
    /// current board.
    pub fn place(&mut self, row: usize, col: usize, player: Player) {
        assert!(
            row < ROWS && col < COLS,
            "place out of range: ({row}, {col})"
        );
        assert_eq!(
            self.cells[row][col],
            Cell::Empty,
            "place into occupied cell ({row}, {col})"
        );
        self.cells[row][col] = player.to_cell();
    }

    /// Check if the board is completely full. Gravity guarantees nothing
    /// below a filled top row is empty, so row 0 alone decides it.
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Clear every cell
    pub fn reset(&mut self) {
        self.cells = [[Cell::Empty; COLS]; ROWS];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
