//! Per-browser game session
//!
//! Holds everything one browser tab's game needs between requests: the
//! current position, the move history, the undo stack, the selected mode,
//! and the lazily spawned engine handle. All rule questions go to the
//! shakmaty position; the session only records what happened.
//!
//! The undo stack stores full position snapshots because the rules library
//! applies moves by value and keeps no history of its own. One snapshot per
//! recorded ply, pushed just before the ply is applied.

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Position, Square};
use tracing::debug;

use kibitz_uci::UciEngine;

use super::error::{GameError, GameResult};
use super::mode::GameMode;
use super::moves::MoveInput;
use super::status::GameStatus;

/// One recorded ply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    /// SAN with check/checkmate suffix, for the history list.
    pub san: String,
    /// The move as a UCI token.
    pub uci: String,
    /// Origin square as the board animates it (the king square for castling).
    pub from: Square,
    /// Target square as the board animates it (g1/c1 for castling).
    pub to: Square,
}

/// Mutable state of one browser session's game.
#[derive(Default)]
pub struct GameSession {
    position: Chess,
    history: Vec<PlayedMove>,
    undo: Vec<Chess>,
    mode: GameMode,
    /// Engine process for this session. Spawned on first use, survives
    /// resets and mode switches, killed when the session drops.
    pub(crate) engine: Option<UciEngine>,
}

impl GameSession {
    /// Fresh game from the starting position, human vs human.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh game from an arbitrary position.
    pub fn from_position(position: Chess) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&PlayedMove> {
        self.history.last()
    }

    /// Number of plies played.
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    pub fn status(&self) -> GameStatus {
        GameStatus::of(&self.position)
    }

    /// Full FEN of the current position.
    pub fn fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    /// Applies a player's move. Rejection leaves the session untouched.
    pub fn play(&mut self, input: &MoveInput) -> GameResult<PlayedMove> {
        if self.status().is_game_over() {
            return Err(GameError::GameOver);
        }
        let mv = input.resolve(&self.position)?;
        Ok(self.record(mv))
    }

    /// Applies a `bestmove` token returned by the engine. The token gets
    /// the same legality check as player input; engines answering for a
    /// stale position must not corrupt the session.
    pub fn play_engine_uci(&mut self, token: &str) -> GameResult<PlayedMove> {
        if self.status().is_game_over() {
            return Err(GameError::GameOver);
        }
        let uci: UciMove = token.parse().map_err(|_| GameError::EngineMove {
            uci: token.to_string(),
        })?;
        let mv = uci
            .to_move(&self.position)
            .map_err(|_| GameError::EngineMove {
                uci: token.to_string(),
            })?;
        Ok(self.record(mv))
    }

    /// Takes back exactly one ply, restoring the snapshot it was played
    /// from. `None` when there is nothing to undo.
    pub fn undo_ply(&mut self) -> Option<PlayedMove> {
        let played = self.history.pop()?;
        if let Some(previous) = self.undo.pop() {
            self.position = previous;
        }
        Some(played)
    }

    /// Player-facing undo. Pops one ply; in engine mode, when the revealed
    /// position has the engine on move, pops a second so the human is on
    /// move afterwards. Returns the number of plies taken back.
    pub fn undo(&mut self) -> usize {
        let mut popped = 0;
        if self.undo_ply().is_some() {
            popped += 1;
            if self.mode.is_engine_turn(self.position.turn()) && self.undo_ply().is_some() {
                popped += 1;
            }
        }
        popped
    }

    /// Starts a fresh game. Mode and any running engine survive.
    pub fn reset(&mut self) {
        self.position = Chess::default();
        self.history.clear();
        self.undo.clear();
    }

    /// Switches who controls which side. Never touches the board.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
    }

    fn record(&mut self, mv: Move) -> PlayedMove {
        let uci = mv.to_uci(CastlingMode::Standard);
        let (from, to) = match &uci {
            UciMove::Normal { from, to, .. } => (*from, *to),
            // Legal standard-chess moves always render as Normal.
            _ => (mv.from().unwrap_or_else(|| mv.to()), mv.to()),
        };
        self.undo.push(self.position.clone());
        let san = SanPlus::from_move_and_play_unchecked(&mut self.position, &mv);
        let played = PlayedMove {
            san: san.to_string(),
            uci: uci.to_string(),
            from,
            to,
        };
        debug!(san = %played.san, ply = self.history.len() + 1, "recorded ply");
        self.history.push(played.clone());
        played
    }
}
