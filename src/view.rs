//! The JSON document the page renders from
//!
//! Every endpoint answers with a full [`GameView`]; the page never keeps
//! game state of its own beyond what the last response said. The legal-move
//! map feeds the hover highlights, the last-move squares feed the yellow
//! trail, and the status line is taken verbatim.

use std::collections::BTreeMap;

use serde::Serialize;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, Position};

use crate::config::EngineConfig;
use crate::game::{GameSession, GameStatus};

/// Full render of a session, as sent to the page.
#[derive(Debug, Serialize)]
pub struct GameView {
    /// Current position as FEN; the board widget redraws from this.
    pub fen: String,
    /// "white" or "black".
    pub turn: &'static str,
    /// "human" or "engine".
    pub mode: &'static str,
    /// Plies played so far.
    pub ply: usize,
    pub in_check: bool,
    pub game_over: bool,
    /// Status banner line.
    pub status: String,
    pub outcome: Option<OutcomeView>,
    pub last_move: Option<LastMoveView>,
    /// SAN strings in play order.
    pub history: Vec<String>,
    /// Origin square to reachable squares, for drag/hover highlighting.
    /// Castling appears as the king hop (e1 to g1/c1).
    pub legal_moves: BTreeMap<String, Vec<String>>,
    /// Whether an engine binary is configured and present.
    pub ai_enabled: bool,
    /// Set when engine mode is selected but no binary is available.
    pub engine_warning: Option<String>,
}

/// Terminal result, absent while the game runs.
#[derive(Debug, Serialize)]
pub struct OutcomeView {
    /// "white" or "black", `None` for draws.
    pub winner: Option<&'static str>,
    /// "checkmate", "stalemate", "insufficient_material" or "draw".
    pub reason: &'static str,
}

/// Squares of the latest ply, for the board highlight.
#[derive(Debug, Serialize)]
pub struct LastMoveView {
    pub from: String,
    pub to: String,
}

impl GameView {
    /// Renders a session against the engine settings.
    pub fn render(session: &GameSession, engine: &EngineConfig) -> GameView {
        let status = session.status();
        let position = session.position();

        let engine_warning = match session.mode().engine_color() {
            Some(_) => engine.warning(),
            None => None,
        };

        GameView {
            fen: session.fen(),
            turn: side_name(session.turn()),
            mode: session.mode().wire_name(),
            ply: session.ply(),
            in_check: position.is_check(),
            game_over: status.is_game_over(),
            status: status.message(),
            outcome: outcome_view(status),
            last_move: session.last_move().map(|played| LastMoveView {
                from: played.from.to_string(),
                to: played.to.to_string(),
            }),
            history: session
                .history()
                .iter()
                .map(|played| played.san.clone())
                .collect(),
            legal_moves: legal_targets(position),
            ai_enabled: engine.available(),
            engine_warning,
        }
    }
}

fn outcome_view(status: GameStatus) -> Option<OutcomeView> {
    status.reason().map(|reason| OutcomeView {
        winner: status.winner().map(side_name),
        reason,
    })
}

fn side_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

/// Builds the origin-to-targets map off the position's legal moves. A
/// promotion square appears once however many pieces it offers.
fn legal_targets(position: &Chess) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for mv in position.legal_moves() {
        if let UciMove::Normal { from, to, .. } = mv.to_uci(CastlingMode::Standard) {
            map.entry(from.to_string()).or_default().push(to.to_string());
        }
    }
    for targets in map.values_mut() {
        targets.sort();
        targets.dedup();
    }
    map
}
