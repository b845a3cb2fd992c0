//! Thin async driver for UCI chess engines.
//!
//! Speaks the engine's own text protocol (`uci`, `isready`, `position fen`,
//! `go depth`, `bestmove`) over the child process's stdio. The driver does
//! not understand chess: positions go in as FEN strings and moves come back
//! as UCI tokens for the caller to validate.

mod engine;

pub use engine::{EngineOptions, UciEngine};

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by the engine driver.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("engine gave no reply within {limit:?}")]
    Timeout { limit: Duration },

    #[error("engine closed its output stream")]
    Closed,

    #[error("unexpected engine reply: {line}")]
    Protocol { line: String },
}

pub type EngineResult<T> = Result<T, EngineError>;
