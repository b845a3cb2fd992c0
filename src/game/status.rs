//! Game status derived from the current position
//!
//! The session never tracks end conditions itself; every status is read
//! straight off the shakmaty position. Draw adjudication beyond what the
//! library reports (repetition, move counters) is deliberately absent: the
//! page surfaces checkmate, stalemate, insufficient material, and check,
//! nothing else.

use shakmaty::{Chess, Color, Position};

/// Snapshot of where the game stands, as shown in the status banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Game in progress, White to move
    WhiteToMove,

    /// Game in progress, Black to move
    BlackToMove,

    /// The side to move is in check but has legal replies
    Check { color: Color },

    /// The side to move is checkmated; `winner` delivered the mate
    Checkmate { winner: Color },

    /// Draw: no legal moves and not in check
    Stalemate,

    /// Draw: neither side can ever deliver mate
    InsufficientMaterial,

    /// Any other draw the rules library reports
    Draw,
}

impl GameStatus {
    /// Reads the status off a position.
    pub fn of(position: &Chess) -> GameStatus {
        if position.is_checkmate() {
            GameStatus::Checkmate {
                winner: !position.turn(),
            }
        } else if position.is_stalemate() {
            GameStatus::Stalemate
        } else if position.is_insufficient_material() {
            GameStatus::InsufficientMaterial
        } else if position.is_game_over() {
            GameStatus::Draw
        } else if position.is_check() {
            GameStatus::Check {
                color: position.turn(),
            }
        } else if position.turn() == Color::White {
            GameStatus::WhiteToMove
        } else {
            GameStatus::BlackToMove
        }
    }

    /// True for any terminal state
    pub fn is_game_over(&self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate { .. }
                | GameStatus::Stalemate
                | GameStatus::InsufficientMaterial
                | GameStatus::Draw
        )
    }

    /// The winning side, `None` for draws and ongoing games
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(*winner),
            _ => None,
        }
    }

    /// True when the game ended without a winner
    pub fn is_draw(&self) -> bool {
        self.is_game_over() && self.winner().is_none()
    }

    /// Short machine-readable reason for terminal states
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            GameStatus::Checkmate { .. } => Some("checkmate"),
            GameStatus::Stalemate => Some("stalemate"),
            GameStatus::InsufficientMaterial => Some("insufficient_material"),
            GameStatus::Draw => Some("draw"),
            _ => None,
        }
    }

    /// The status banner line
    pub fn message(&self) -> String {
        match self {
            GameStatus::WhiteToMove => "White's turn".to_string(),
            GameStatus::BlackToMove => "Black's turn".to_string(),
            GameStatus::Check { .. } => "Check!".to_string(),
            GameStatus::Checkmate { winner } => {
                format!("Checkmate! {} wins!", color_name(*winner))
            }
            GameStatus::Stalemate => "Stalemate! Game is a draw.".to_string(),
            GameStatus::InsufficientMaterial => "Draw! Insufficient material.".to_string(),
            GameStatus::Draw => "Game is a draw.".to_string(),
        }
    }
}

/// "White" / "Black" as shown to players.
pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}
