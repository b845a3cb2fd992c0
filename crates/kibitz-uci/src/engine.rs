use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::time::timeout;
use tracing::{debug, info};

use crate::{EngineError, EngineResult};

/// How long a handshake reply (`uciok`, `readyok`) may take before the
/// engine is declared unresponsive. Searches are not bounded here; a
/// `go depth` on a slow machine legitimately takes longer than any cap
/// we could pick.
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// UCI options applied right after the `uci` handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// `setoption name Threads value ...`
    pub threads: u32,
    /// `setoption name Hash value ...` (MiB)
    pub hash_mb: u32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        // The UCI defaults most engines ship with.
        Self { threads: 1, hash_mb: 16 }
    }
}

/// A running UCI engine process.
///
/// One handle owns one child process. The child is killed when the handle
/// is dropped; call [`UciEngine::quit`] for an orderly exit instead.
#[derive(Debug)]
pub struct UciEngine {
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    name: Option<String>,
}

impl UciEngine {
    /// Starts the engine at `path`, completes the `uci`/`uciok` handshake,
    /// applies `options`, and waits for `readyok`.
    pub async fn spawn(path: &Path, options: &EngineOptions) -> EngineResult<Self> {
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let stdin = child.stdin.take().ok_or(EngineError::Closed)?;
        let stdout = child.stdout.take().ok_or(EngineError::Closed)?;

        let mut engine = Self {
            child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
            name: None,
        };
        engine.handshake(options).await?;
        info!(engine = ?engine.name, path = %path.display(), "uci engine ready");
        Ok(engine)
    }

    /// Engine-reported `id name`, when the handshake captured one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Tells the engine a fresh game is starting.
    pub async fn new_game(&mut self) -> EngineResult<()> {
        self.send("ucinewgame").await?;
        self.ready().await
    }

    /// Loads a position by full FEN.
    pub async fn set_position(&mut self, fen: &str) -> EngineResult<()> {
        self.send(&format!("position fen {fen}")).await
    }

    /// Runs a fixed-depth search and returns the engine's move as a UCI
    /// token, or `None` when the engine has no move to offer (`bestmove
    /// (none)` in mate/stalemate positions).
    pub async fn best_move(&mut self, depth: u8) -> EngineResult<Option<String>> {
        self.send(&format!("go depth {depth}")).await?;
        loop {
            let line = self.read_line().await?;
            if !line.starts_with("bestmove") {
                // info/option chatter
                continue;
            }
            let token = parse_bestmove(&line)
                .ok_or_else(|| EngineError::Protocol { line: line.clone() })?;
            return Ok(match token {
                "(none)" | "0000" => None,
                _ => Some(token.to_string()),
            });
        }
    }

    /// `isready`/`readyok` round trip.
    pub async fn ready(&mut self) -> EngineResult<()> {
        self.send("isready").await?;
        loop {
            let line = self.read_line_timeout(HANDSHAKE_TIMEOUT).await?;
            if line.trim() == "readyok" {
                return Ok(());
            }
        }
    }

    /// Asks the engine to exit and reaps the process, killing it if it
    /// ignores the request.
    pub async fn quit(mut self) -> EngineResult<()> {
        self.send("quit").await.ok();
        if timeout(HANDSHAKE_TIMEOUT, self.child.wait()).await.is_err() {
            self.child.kill().await?;
        }
        Ok(())
    }

    async fn handshake(&mut self, options: &EngineOptions) -> EngineResult<()> {
        self.send("uci").await?;
        loop {
            let line = self.read_line_timeout(HANDSHAKE_TIMEOUT).await?;
            if let Some(rest) = line.strip_prefix("id name ") {
                self.name = Some(rest.trim().to_string());
            }
            if line.trim() == "uciok" {
                break;
            }
        }
        self.send(&format!("setoption name Threads value {}", options.threads))
            .await?;
        self.send(&format!("setoption name Hash value {}", options.hash_mb))
            .await?;
        self.ready().await
    }

    async fn send(&mut self, command: &str) -> EngineResult<()> {
        debug!(command, "-> engine");
        self.stdin.write_all(command.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await?;
        Ok(())
    }

    async fn read_line(&mut self) -> EngineResult<String> {
        match self.stdout.next_line().await? {
            Some(line) => {
                debug!(line = line.as_str(), "<- engine");
                Ok(line)
            }
            None => Err(EngineError::Closed),
        }
    }

    async fn read_line_timeout(&mut self, limit: Duration) -> EngineResult<String> {
        timeout(limit, self.read_line())
            .await
            .map_err(|_| EngineError::Timeout { limit })?
    }
}

/// Extracts the move token from a well-formed `bestmove` line. Engines may
/// append `ponder <move>`; everything after the first token is ignored.
fn parse_bestmove(line: &str) -> Option<&str> {
    let mut words = line.split_whitespace();
    match words.next() {
        Some("bestmove") => words.next(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_bestmove() {
        assert_eq!(parse_bestmove("bestmove e2e4"), Some("e2e4"));
    }

    #[test]
    fn parses_bestmove_with_ponder() {
        assert_eq!(parse_bestmove("bestmove g1f3 ponder d7d5"), Some("g1f3"));
    }

    #[test]
    fn parses_promotion_token() {
        assert_eq!(parse_bestmove("bestmove e7e8q"), Some("e7e8q"));
    }

    #[test]
    fn ignores_info_lines() {
        assert_eq!(parse_bestmove("info depth 18 score cp 31 pv e2e4"), None);
        assert_eq!(parse_bestmove(""), None);
    }

    #[test]
    fn rejects_truncated_bestmove() {
        assert_eq!(parse_bestmove("bestmove"), None);
    }

    #[test]
    fn mate_position_token_passes_through() {
        // best_move() maps these to None; the parser just hands them over.
        assert_eq!(parse_bestmove("bestmove (none)"), Some("(none)"));
    }
}
