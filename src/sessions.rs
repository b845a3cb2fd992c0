//! Browser-session tracking
//!
//! One game per browser, keyed by a `kibitz_sid` cookie holding a v4 UUID.
//! The map guard is held only to look up or insert; each session carries
//! its own async lock so a long engine exchange never blocks the other
//! sessions. Entries stay until the process exits: nothing is persisted
//! and nothing is evicted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::{header, HeaderMap};
use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;
use uuid::Uuid;

use crate::game::GameSession;

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "kibitz_sid";

/// Shared handle to one session's game.
pub type SharedSession = Arc<AsyncMutex<GameSession>>;

/// All live sessions.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, SharedSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the caller's session by cookie, creating a fresh one (under a
    /// fresh id) when the cookie is absent or unknown.
    pub fn resolve(&self, headers: &HeaderMap) -> (Uuid, SharedSession) {
        if let Some(id) = session_id(headers) {
            if let Some(session) = self.sessions.lock().unwrap().get(&id).cloned() {
                return (id, session);
            }
        }
        self.create()
    }

    fn create(&self) -> (Uuid, SharedSession) {
        let id = Uuid::new_v4();
        let session: SharedSession = Arc::new(AsyncMutex::new(GameSession::new()));
        self.sessions.lock().unwrap().insert(id, session.clone());
        debug!(session = %id, "created game session");
        (id, session)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `Set-Cookie` value that pins `id` to the browser.
pub fn session_cookie(id: Uuid) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

/// Pulls the session id out of the request's `Cookie` header.
fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            Uuid::parse_str(value.trim()).ok()
        } else {
            None
        }
    })
}
