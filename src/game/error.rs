//! Error types for the game module
//!
//! Covers move input parsing, legality rejection, and engine-produced
//! moves that fail validation.

/// Errors that can occur while driving a game session
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Input could not be parsed as a move at all
    #[error("Invalid move format: {input}")]
    InvalidMove { input: String },

    /// Move parsed but is not legal in the current position
    #[error("Illegal move: {input}")]
    IllegalMove { input: String },

    /// Move submitted after the game ended
    #[error("The game is over")]
    GameOver,

    /// The engine returned a move the position does not allow
    #[error("Engine produced an invalid move: {uci}")]
    EngineMove { uci: String },
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
