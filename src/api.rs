use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use shakmaty::{Role, Square};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::game::{GameMode, GameSession, MoveInput, PlayedMove};
use crate::sessions::{session_cookie, SessionStore};
use crate::view::GameView;
use kibitz_uci::UciEngine;

const INDEX_HTML: &str = include_str!("../assets/index.html");

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    // Store sessions: cookie id -> game
    sessions: SessionStore,
}

/// Body of `POST /api/move`: either a combined notation string, or the two
/// squares of a drag with an optional promotion piece.
#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    #[serde(rename = "move")]
    pub mv: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub promotion: Option<String>,
}

/// Body of `POST /api/mode`.
#[derive(Debug, Deserialize)]
pub struct ModeRequest {
    pub mode: String,
}

pub fn router(config: AppConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
        sessions: SessionStore::new(),
    };

    Router::new()
        .route("/", get(index))
        .route("/api/state", get(game_state))
        .route("/api/move", post(play_move))
        .route("/api/undo", post(undo))
        .route("/api/reset", post(reset))
        .route("/api/mode", post(set_mode))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    // Bind the session on first contact so the page's fetches find it.
    let (id, _session) = state.sessions.resolve(&headers);
    ([(header::SET_COOKIE, session_cookie(id))], Html(INDEX_HTML))
}

async fn game_state(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let (id, session) = state.sessions.resolve(&headers);
    let session = session.lock().await;
    let view = GameView::render(&session, &state.config.engine);
    ([(header::SET_COOKIE, session_cookie(id))], Json(view))
}

async fn play_move(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<MoveRequest>,
) -> AppResult<impl IntoResponse> {
    let (id, session) = state.sessions.resolve(&headers);
    let mut session = session.lock().await;

    let input = payload.into_input()?;
    let played = session.play(&input)?;
    info!(session = %id, san = %played.san, "move played");

    if let Err(err) = engine_reply_if_due(&mut session, &state.config).await {
        // The accepted human ply stays on the board.
        warn!(session = %id, error = %err, "engine reply failed");
        return Err(err);
    }

    let view = GameView::render(&session, &state.config.engine);
    Ok(([(header::SET_COOKIE, session_cookie(id))], Json(view)))
}

async fn undo(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let (id, session) = state.sessions.resolve(&headers);
    let mut session = session.lock().await;

    let plies = session.undo();
    info!(session = %id, plies, "undo");

    let view = GameView::render(&session, &state.config.engine);
    ([(header::SET_COOKIE, session_cookie(id))], Json(view))
}

async fn reset(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let (id, session) = state.sessions.resolve(&headers);
    let mut session = session.lock().await;

    session.reset();
    info!(session = %id, "game reset");

    // Tell a running engine the next search is a new game. Failure just
    // costs the handle; the next engine move respawns lazily.
    if let Some(mut engine) = session.engine.take() {
        match engine.new_game().await {
            Ok(()) => session.engine = Some(engine),
            Err(err) => warn!(session = %id, error = %err, "engine reset failed, dropping handle"),
        }
    }

    let view = GameView::render(&session, &state.config.engine);
    ([(header::SET_COOKIE, session_cookie(id))], Json(view))
}

async fn set_mode(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ModeRequest>,
) -> AppResult<impl IntoResponse> {
    let (id, session) = state.sessions.resolve(&headers);
    let mut session = session.lock().await;

    let mode = GameMode::from_wire(&payload.mode)
        .ok_or_else(|| AppError::bad_request(format!("unknown mode: {}", payload.mode)))?;
    session.set_mode(mode);
    info!(session = %id, mode = mode.wire_name(), "mode set");

    // Switching to engine mode mid-game can leave the engine on move.
    engine_reply_if_due(&mut session, &state.config).await?;

    let view = GameView::render(&session, &state.config.engine);
    Ok(([(header::SET_COOKIE, session_cookie(id))], Json(view)))
}

/// Plays the engine's answer when the session is in engine mode, the game
/// is still running, and it is the engine's turn. Runs under the session
/// lock, so the exchange is one blocking step of the request.
///
/// Without an available binary this is a no-op: engine mode degrades to
/// a normal board and the view carries the warning.
async fn engine_reply_if_due(
    session: &mut GameSession,
    config: &AppConfig,
) -> AppResult<Option<PlayedMove>> {
    if session.status().is_game_over() || !session.mode().is_engine_turn(session.turn()) {
        return Ok(None);
    }
    let Some(path) = config.engine.path.as_deref().filter(|p| p.exists()) else {
        return Ok(None);
    };

    let mut engine = match session.engine.take() {
        Some(engine) => engine,
        None => UciEngine::spawn(path, &config.engine.options()).await?,
    };

    let fen = session.fen();
    engine.set_position(&fen).await?;
    let token = engine
        .best_move(config.engine.depth)
        .await?
        .ok_or(AppError::NoEngineMove)?;
    let played = session.play_engine_uci(&token)?;
    info!(san = %played.san, uci = %token, "engine replied");

    // Error paths above dropped the handle, killing the process; the next
    // attempt respawns it. A healthy handle goes back for the next move.
    session.engine = Some(engine);
    Ok(Some(played))
}

impl MoveRequest {
    /// Turns the body into a [`MoveInput`], validating square names and
    /// the promotion piece. Legality stays with the game session.
    fn into_input(self) -> AppResult<MoveInput> {
        if let Some(text) = self.mv {
            return Ok(MoveInput::Text(text));
        }

        let (Some(from), Some(to)) = (self.from, self.to) else {
            return Err(AppError::bad_request(
                "provide either \"move\" or \"from\" and \"to\"",
            ));
        };
        let from: Square = from
            .parse()
            .map_err(|_| AppError::bad_request(format!("bad square: {from}")))?;
        let to: Square = to
            .parse()
            .map_err(|_| AppError::bad_request(format!("bad square: {to}")))?;

        let promotion = match self.promotion.as_deref() {
            None | Some("") => None,
            Some(text) => {
                let mut chars = text.chars();
                let role = match (chars.next(), chars.next()) {
                    (Some(ch), None) => Role::from_char(ch.to_ascii_lowercase()),
                    _ => None,
                };
                Some(role.ok_or_else(|| {
                    AppError::bad_request(format!("bad promotion piece: {text}"))
                })?)
            }
        };

        Ok(MoveInput::Coords {
            from,
            to,
            promotion,
        })
    }
}
