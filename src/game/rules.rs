//! Win and draw detection over a [`Board`].

use super::board::{Board, Cell, COLS, ROWS};

/// Pieces in a row needed to win.
pub const CONNECT: usize = 4;

/// Horizontal, vertical, diagonal-down-right, diagonal-down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Whether the piece at `last_move` completes four in a row.
///
/// Each axis is scanned as one vector over the window `-3..=3` around the
/// last move. The run counter resets on any cell that is off the board or not
/// the mover's, so runs are truncated at the edges.
pub fn check_win(board: &Board, last_move: Option<(usize, usize)>) -> bool {
    let Some((row, col)) = last_move else {
        return false;
    };
    let cell = board.get(row, col);
    if cell == Cell::Empty {
        return false;
    }

    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| run_reaches_four(board, row, col, dr, dc, cell))
}

fn run_reaches_four(board: &Board, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> bool {
    let reach = CONNECT as isize - 1;
    let mut count = 0;

    for i in -reach..=reach {
        let r = row as isize + i * dr;
        let c = col as isize + i * dc;
        let in_bounds = (0..ROWS as isize).contains(&r) && (0..COLS as isize).contains(&c);

        if in_bounds && board.get(r as usize, c as usize) == cell {
            count += 1;
            if count >= CONNECT {
                return true;
            }
        } else {
            count = 0;
        }
    }

    false
}

/// Whether the board has no room left. Only meaningful once [`check_win`]
/// has come back false for the same move.
pub fn check_draw(board: &Board) -> bool {
    board.is_full()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    fn drop(board: &mut Board, col: usize, player: Player) -> (usize, usize) {
        let row = board.find_landing_row(col).unwrap();
        board.place(row, col, player);
        (row, col)
    }

    #[test]
    fn test_no_move_is_no_win() {
        assert!(!check_win(&Board::new(), None));
    }

    #[test]
    fn test_empty_cell_is_no_win() {
        assert!(!check_win(&Board::new(), Some((5, 3))));
    }

    #[test]
    fn test_isolated_piece() {
        let mut board = Board::new();
        let last = drop(&mut board, 3, Player::Red);
        assert!(!check_win(&board, Some(last)));
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new();
        for col in 0..4 {
            drop(&mut board, col, Player::Red);
        }
        assert!(check_win(&board, Some((5, 2))));
    }

    #[test]
    fn test_horizontal_win_at_left_edge() {
        let mut board = Board::new();
        for col in 1..4 {
            drop(&mut board, col, Player::Yellow);
        }
        let last = drop(&mut board, 0, Player::Yellow);
        assert!(check_win(&board, Some(last)));
    }

    #[test]
    fn test_horizontal_win_at_right_edge() {
        let mut board = Board::new();
        for col in 3..6 {
            drop(&mut board, col, Player::Red);
        }
        let last = drop(&mut board, 6, Player::Red);
        assert!(check_win(&board, Some(last)));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new();
        for _ in 0..4 {
            drop(&mut board, 3, Player::Yellow);
        }
        assert!(check_win(&board, Some((2, 3))));
    }

    #[test]
    fn test_vertical_win_in_top_rows() {
        let mut board = Board::new();
        drop(&mut board, 0, Player::Red);
        drop(&mut board, 0, Player::Yellow);
        for _ in 0..3 {
            drop(&mut board, 0, Player::Red);
        }
        assert!(!check_win(&board, Some((1, 0))));
        let last = drop(&mut board, 0, Player::Red);
        assert_eq!(last, (0, 0));
        assert!(check_win(&board, Some(last)));
    }

    #[test]
    fn test_diagonal_up_win() {
        let mut board = Board::new();
        // / pattern
        drop(&mut board, 0, Player::Red);

        drop(&mut board, 1, Player::Yellow);
        drop(&mut board, 1, Player::Red);

        drop(&mut board, 2, Player::Yellow);
        drop(&mut board, 2, Player::Yellow);
        drop(&mut board, 2, Player::Red);

        drop(&mut board, 3, Player::Yellow);
        drop(&mut board, 3, Player::Yellow);
        drop(&mut board, 3, Player::Yellow);
        let last = drop(&mut board, 3, Player::Red);

        assert!(check_win(&board, Some(last)));
        // the same run seen from its bottom end
        assert!(check_win(&board, Some((5, 0))));
    }

    #[test]
    fn test_diagonal_down_win() {
        let mut board = Board::new();
        // \ pattern
        drop(&mut board, 6, Player::Red);

        drop(&mut board, 5, Player::Yellow);
        drop(&mut board, 5, Player::Red);

        drop(&mut board, 4, Player::Yellow);
        drop(&mut board, 4, Player::Yellow);
        drop(&mut board, 4, Player::Red);

        drop(&mut board, 3, Player::Yellow);
        drop(&mut board, 3, Player::Yellow);
        drop(&mut board, 3, Player::Yellow);
        let last = drop(&mut board, 3, Player::Red);

        assert!(check_win(&board, Some(last)));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::new();
        for col in 0..3 {
            drop(&mut board, col, Player::Red);
        }
        assert!(!check_win(&board, Some((5, 1))));
    }

    #[test]
    fn test_gap_breaks_run() {
        let mut board = Board::new();
        for col in [0, 1, 3, 4] {
            drop(&mut board, col, Player::Red);
        }
        drop(&mut board, 2, Player::Yellow);
        assert!(!check_win(&board, Some((5, 1))));
        assert!(!check_win(&board, Some((5, 3))));
    }

    #[test]
    fn test_run_must_pass_through_last_move() {
        let mut board = Board::new();
        for col in 0..4 {
            drop(&mut board, col, Player::Red);
        }
        let last = drop(&mut board, 6, Player::Red);
        assert!(!check_win(&board, Some(last)));
    }

    #[test]
    fn test_draw_only_when_full() {
        let mut board = Board::new();
        assert!(!check_draw(&board));

        for col in 0..COLS {
            for row in (0..ROWS).rev() {
                let player = if (row / 2 + col) % 2 == 0 { Player::Red } else { Player::Yellow };
                board.place(row, col, player);
            }
        }
        assert!(check_draw(&board));
    }
}
