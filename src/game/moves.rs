//! Move input resolution
//!
//! The page submits a move either as the two squares of a drag or as the
//! text box contents. Nothing here decides legality by itself; inputs are
//! turned into candidate moves and the rules library accepts or rejects
//! them against the position.

use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{Chess, Move, Position, Rank, Role, Square};

use super::error::{GameError, GameResult};

/// A move as the page submits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveInput {
    /// Coordinate pair from a drag-and-drop, promotion piece optional.
    Coords {
        from: Square,
        to: Square,
        promotion: Option<Role>,
    },
    /// Free text: UCI ("e2e4", "e7e8q") or SAN ("Nf3", "exd5", "e8=Q").
    Text(String),
}

impl MoveInput {
    /// Resolves the input to a legal move in `position`.
    ///
    /// A pawn pushed to the back rank without a named piece is completed
    /// to a queen promotion before the legality check, for both coordinate
    /// input and bare 4-character UCI text.
    pub fn resolve(&self, position: &Chess) -> GameResult<Move> {
        match self {
            MoveInput::Coords {
                from,
                to,
                promotion,
            } => {
                let uci = UciMove::Normal {
                    from: *from,
                    to: *to,
                    promotion: promotion.or_else(|| auto_queen(position, *from, *to)),
                };
                uci.to_move(position).map_err(|_| GameError::IllegalMove {
                    input: self.describe(),
                })
            }
            MoveInput::Text(text) => resolve_text(position, text),
        }
    }

    /// The input as the player wrote it, for error messages.
    pub fn describe(&self) -> String {
        match self {
            MoveInput::Coords {
                from,
                to,
                promotion,
            } => match promotion {
                Some(role) => format!("{}{}{}", from, to, role.char()),
                None => format!("{}{}", from, to),
            },
            MoveInput::Text(text) => text.trim().to_string(),
        }
    }
}

fn resolve_text(position: &Chess, text: &str) -> GameResult<Move> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(GameError::InvalidMove {
            input: text.to_string(),
        });
    }

    if let Ok(uci) = trimmed.parse::<UciMove>() {
        let uci = complete_uci(position, uci);
        return uci.to_move(position).map_err(|_| GameError::IllegalMove {
            input: trimmed.to_string(),
        });
    }

    if let Ok(san) = trimmed.parse::<SanPlus>() {
        return san.san.to_move(position).map_err(|_| GameError::IllegalMove {
            input: trimmed.to_string(),
        });
    }

    Err(GameError::InvalidMove {
        input: trimmed.to_string(),
    })
}

fn complete_uci(position: &Chess, uci: UciMove) -> UciMove {
    match uci {
        UciMove::Normal {
            from,
            to,
            promotion: None,
        } => UciMove::Normal {
            from,
            to,
            promotion: auto_queen(position, from, to),
        },
        other => other,
    }
}

/// Queen promotion is implied when a pawn reaches the back rank and no
/// piece was named. A pawn can only ever reach the opponent's back rank,
/// so the mover's color needs no check.
fn auto_queen(position: &Chess, from: Square, to: Square) -> Option<Role> {
    let is_pawn = position.board().role_at(from) == Some(Role::Pawn);
    let back_rank = matches!(to.rank(), Rank::First | Rank::Eighth);
    (is_pawn && back_rank).then_some(Role::Queen)
}
