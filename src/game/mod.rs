//! Chess game logic module
//!
//! Per-session game state over the shakmaty rules library. The session
//! records plies and snapshots; every rules question (legality, check,
//! game end) is answered by the position itself.
//!
//! # Module Organization
//!
//! - `session` - Mutable per-browser game state (position, history, undo)
//! - `moves` - Move input resolution (coordinates, UCI or SAN text)
//! - `status` - Game status derived from the position
//! - `mode` - Human-vs-human or human-vs-engine selection
//! - `error` - Game-domain error types

pub mod error;
pub mod mode;
pub mod moves;
pub mod session;
pub mod status;

// Re-export the types the web layer works with
pub use error::{GameError, GameResult};
pub use mode::GameMode;
pub use moves::MoveInput;
pub use session::{GameSession, PlayedMove};
pub use status::GameStatus;
