//! Game mode: who plays O.

use derive_more::{Display, Error};
use ocean_rules::Mark;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::instrument;

/// Whether O is a second human or the computer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Mode {
    /// Two humans share the board.
    #[default]
    #[serde(rename = "pvp")]
    PlayerVsPlayer,
    /// A human plays X, the computer plays O.
    #[serde(rename = "pvc")]
    PlayerVsComputer,
}

impl Mode {
    /// Label shown to players and stored in game records.
    pub fn label(self) -> &'static str {
        match self {
            Self::PlayerVsPlayer => "Player vs Player",
            Self::PlayerVsComputer => "Player vs Computer",
        }
    }

    /// Short code used on the command line and in config files.
    pub fn code(self) -> &'static str {
        match self {
            Self::PlayerVsPlayer => "pvp",
            Self::PlayerVsComputer => "pvc",
        }
    }

    /// Long command-line spelling, e.g. `player-vs-computer`.
    fn slug(self) -> &'static str {
        match self {
            Self::PlayerVsPlayer => "player-vs-player",
            Self::PlayerVsComputer => "player-vs-computer",
        }
    }

    /// Switches to the other mode.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            Self::PlayerVsPlayer => Self::PlayerVsComputer,
            Self::PlayerVsComputer => Self::PlayerVsPlayer,
        }
    }

    /// The mark played by the computer in this mode.
    pub fn computer_mark(self) -> Option<Mark> {
        match self {
            Self::PlayerVsPlayer => None,
            Self::PlayerVsComputer => Some(Mark::O),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Unrecognized mode name.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unknown mode '{}' (expected 'pvp' or 'pvc')", input)]
pub struct ParseModeError {
    input: String,
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::iter()
            .find(|mode| mode.code() == name || mode.slug() == name)
            .ok_or_else(|| ParseModeError {
                input: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("pvp".parse::<Mode>(), Ok(Mode::PlayerVsPlayer));
        assert_eq!("PVC".parse::<Mode>(), Ok(Mode::PlayerVsComputer));
        assert_eq!(
            "player-vs-computer".parse::<Mode>(),
            Ok(Mode::PlayerVsComputer)
        );
        assert!("solo".parse::<Mode>().is_err());
    }

    #[test]
    fn test_code_parses_back_and_matches_serde_name() {
        for mode in Mode::iter() {
            assert_eq!(mode.code().parse::<Mode>(), Ok(mode));
            assert_eq!(
                serde_json::to_string(&mode).unwrap(),
                format!("\"{}\"", mode.code())
            );
        }
    }

    #[test]
    fn test_only_computer_mode_has_computer_mark() {
        assert_eq!(Mode::PlayerVsPlayer.computer_mark(), None);
        assert_eq!(Mode::PlayerVsComputer.computer_mark(), Some(Mark::O));
        assert_eq!(Mode::PlayerVsPlayer.toggle(), Mode::PlayerVsComputer);
    }
}
