//! Web-layer error type
//!
//! Handlers bubble everything up as [`AppError`]; the response side turns
//! it into a status code and a JSON `{"error": ...}` body the page can
//! show. A rejected move is the caller's mistake; anything involving the
//! engine process answers as a bad gateway while the session keeps the
//! moves it already accepted.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::game::GameError;
use kibitz_uci::EngineError;

/// Everything a handler can fail with.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Player input rejected; the session did not change.
    #[error(transparent)]
    Game(#[from] GameError),

    /// Driver-level failure talking to the engine process.
    #[error("engine failure: {0}")]
    Engine(#[from] EngineError),

    /// The engine answered the search with no move.
    #[error("engine returned no move")]
    NoEngineMove,

    /// Request body failed validation.
    #[error("invalid request: {message}")]
    BadRequest { message: String },
}

/// Result type alias for handler bodies
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            // An engine-suggested move failing validation is the engine's
            // fault, not the player's.
            AppError::Game(GameError::EngineMove { .. }) => StatusCode::BAD_GATEWAY,
            AppError::Game(_) | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Engine(_) | AppError::NoEngineMove => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
