//! Game mode selection: two humans at one board, or one human against the
//! external engine.

use shakmaty::Color;

/// Who controls the pieces.
///
/// The page offers two entries; the engine side always plays Black there,
/// but the type carries the color so the session logic never assumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Two humans share the board.
    HumanVsHuman,
    /// One human against the engine, which plays `engine_color`.
    HumanVsEngine { engine_color: Color },
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::HumanVsHuman
    }
}

impl GameMode {
    /// The color the engine plays, `None` in human-vs-human.
    pub fn engine_color(&self) -> Option<Color> {
        match self {
            GameMode::HumanVsHuman => None,
            GameMode::HumanVsEngine { engine_color } => Some(*engine_color),
        }
    }

    /// True when the side to move belongs to the engine.
    pub fn is_engine_turn(&self, turn: Color) -> bool {
        self.engine_color() == Some(turn)
    }

    /// Name used on the wire between page and server.
    pub fn wire_name(&self) -> &'static str {
        match self {
            GameMode::HumanVsHuman => "human",
            GameMode::HumanVsEngine { .. } => "engine",
        }
    }

    /// Parses the wire name. The engine side is Black, the setup the page
    /// offers.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "human" => Some(GameMode::HumanVsHuman),
            "engine" => Some(GameMode::HumanVsEngine {
                engine_color: Color::Black,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for mode in [
            GameMode::HumanVsHuman,
            GameMode::HumanVsEngine {
                engine_color: Color::Black,
            },
        ] {
            assert_eq!(GameMode::from_wire(mode.wire_name()), Some(mode));
        }
        assert_eq!(GameMode::from_wire("bogus"), None);
    }

    #[test]
    fn engine_turn_detection() {
        let vs_engine = GameMode::HumanVsEngine {
            engine_color: Color::Black,
        };
        assert!(vs_engine.is_engine_turn(Color::Black));
        assert!(!vs_engine.is_engine_turn(Color::White));
        assert!(!GameMode::HumanVsHuman.is_engine_turn(Color::White));
        assert!(!GameMode::HumanVsHuman.is_engine_turn(Color::Black));
    }
}
