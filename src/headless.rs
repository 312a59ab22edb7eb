//! Scripted play without a terminal: feed a list of column clicks through the
//! controller and report the final snapshot.

use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::SessionError;
use crate::game::{ClickOutcome, GameController, GameSnapshot, InstantDrop, PopupController, COLS};

/// Simulated frame length between scripted clicks.
const FRAME_SECS: f32 = 1.0 / 60.0;

/// Parse a comma or whitespace separated list of 1-based column numbers
/// (as labelled on screen) into 0-based column indices.
pub fn parse_moves(script: &str) -> Result<Vec<usize>, SessionError> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            let column: usize = token.parse().map_err(|_| {
                SessionError::ScriptParse(format!("'{token}' is not a column number"))
            })?;
            if column == 0 || column > COLS {
                return Err(SessionError::ScriptParse(format!(
                    "column {column} is outside 1..={COLS}"
                )));
            }
            Ok(column - 1)
        })
        .collect()
}

/// Play `columns` in order. Rejected clicks are skipped and clicks after the
/// game ends are ignored, as they would be interactively.
pub fn run_script(columns: &[usize], config: &AppConfig) -> GameSnapshot {
    let mut controller = GameController::new(
        InstantDrop::default(),
        PopupController::new(config.popup.fade_rate),
    );

    for (i, &column) in columns.iter().enumerate() {
        match controller.click_column(column) {
            ClickOutcome::Started(_) => controller.tick(FRAME_SECS),
            ClickOutcome::Rejected(err) => warn!(move_index = i, %err, "scripted move skipped"),
            ClickOutcome::Ignored => debug!(move_index = i, column, "scripted move after game over"),
        }
    }

    let snapshot = controller.snapshot();
    info!(result = ?snapshot.result, moves = snapshot.move_count, "script finished");
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, GameResult, Player, ROWS};

    #[test]
    fn test_parse_moves() {
        assert_eq!(parse_moves("4,4, 5 1").unwrap(), vec![3, 3, 4, 0]);
        assert_eq!(parse_moves("").unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_parse_moves_rejects_bad_tokens() {
        assert!(parse_moves("1,x").is_err());
        assert!(parse_moves("0").is_err());
        assert!(parse_moves("8").is_err());
    }

    #[test]
    fn test_run_script_vertical_win() {
        let snap = run_script(&[3, 0, 3, 0, 3, 0, 3], &AppConfig::default());
        assert_eq!(snap.result, GameResult::Won(Player::Red));
        assert!(snap.popup.active);
        assert_eq!(snap.move_count, 7);
    }

    #[test]
    fn test_run_script_skips_full_column() {
        let mut script = vec![0; ROWS + 1];
        script.push(1);
        let snap = run_script(&script, &AppConfig::default());
        assert_eq!(snap.move_count, ROWS + 1);
        // the seventh click was rejected, so Red still moves next and plays column 1
        assert_eq!(snap.board.get(ROWS - 1, 1), Cell::Red);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let snap = run_script(&[3], &AppConfig::default());
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["current_player"], "Yellow");
        assert_eq!(json["result"], "InProgress");
        assert_eq!(json["board"]["cells"][ROWS - 1][3], "Red");
    }
}
