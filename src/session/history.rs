//! Log of finished games, most recent first.

use std::collections::VecDeque;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use ocean_rules::Mark;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// How a finished game ended.
///
/// Serialized as its display form: `"X"`, `"O"` or `"draw"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum GameResult {
    /// The given mark completed a line.
    Winner(Mark),
    /// The board filled with no line.
    Draw,
}

/// Renders as `X`, `O` or `draw`.
impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Winner(mark) => write!(f, "{mark}"),
            Self::Draw => f.write_str("draw"),
        }
    }
}

/// Unrecognized game result text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unknown game result '{}' (expected 'X', 'O' or 'draw')", input)]
pub struct ParseGameResultError {
    input: String,
}

impl FromStr for GameResult {
    type Err = ParseGameResultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" => Ok(Self::Winner(Mark::X)),
            "O" => Ok(Self::Winner(Mark::O)),
            "draw" => Ok(Self::Draw),
            _ => Err(ParseGameResultError {
                input: s.to_string(),
            }),
        }
    }
}

impl From<GameResult> for String {
    fn from(result: GameResult) -> Self {
        result.to_string()
    }
}

impl TryFrom<String> for GameResult {
    type Error = ParseGameResultError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Immutable summary of one finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct GameRecord {
    /// Winner or draw.
    result: GameResult,
    /// Moves played, counting both sides.
    moves: u32,
    /// When the game ended.
    #[serde(rename = "date")]
    played_at: DateTime<Utc>,
    /// Mode label at the time, e.g. "Player vs Computer".
    mode: String,
}

/// Win/draw counts over a history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HistoryTally {
    /// Games won by X.
    pub x_wins: usize,
    /// Games won by O.
    pub o_wins: usize,
    /// Drawn games.
    pub draws: usize,
}

/// Ordered record of finished games. Index 0 is the most recent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameHistory {
    records: VecDeque<GameRecord>,
}

impl GameHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a finished game at the front.
    #[instrument(skip(self), fields(total = self.records.len() + 1))]
    pub(crate) fn record(&mut self, record: GameRecord) {
        self.records.push_front(record);
    }

    /// Drops every record.
    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }

    /// Number of recorded games.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no game has finished yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records from most recent to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &GameRecord> {
        self.records.iter()
    }

    /// The most recently finished game.
    pub fn latest(&self) -> Option<&GameRecord> {
        self.records.front()
    }

    /// 1-based game number of the record at `index` (oldest game is #1).
    ///
    /// `None` when `index` is past the last record.
    pub fn game_number(&self, index: usize) -> Option<usize> {
        self.records.len().checked_sub(index).filter(|&n| n > 0)
    }

    /// Counts wins per mark and draws.
    pub fn tally(&self) -> HistoryTally {
        self.records
            .iter()
            .fold(HistoryTally::default(), |mut tally, record| {
                match record.result {
                    GameResult::Winner(Mark::X) => tally.x_wins += 1,
                    GameResult::Winner(Mark::O) => tally.o_wins += 1,
                    GameResult::Draw => tally.draws += 1,
                }
                tally
            })
    }
}
