use std::fmt;

use crate::game::Player;

/// Messages the coordinator emits for the presentation layer: whose turn
/// it is, the smoothed confidence scores, and the terminal result.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    /// The named agent is now to move, e.g. `Player 1:ai`.
    Turn { label: String },
    /// Display scores after a non-terminal move, player one's perspective
    /// positive.
    Scores { player_one: f64, player_two: f64 },
    /// The game ended.
    GameOver { message: String },
}

impl Status {
    pub fn win(winner: Player) -> Status {
        Status::GameOver {
            message: format!("Game Over: Player {} Wins!", winner.number()),
        }
    }

    pub fn tie() -> Status {
        Status::GameOver {
            message: "Game Over: Tie!".to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Turn { label } => write!(f, "{label}"),
            Status::Scores {
                player_one,
                player_two,
            } => write!(f, "scores: {player_one:.1} / {player_two:.1}"),
            Status::GameOver { message } => write!(f, "{message}"),
        }
    }
}
