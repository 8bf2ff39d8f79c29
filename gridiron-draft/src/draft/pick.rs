// Players, positions, and draft board entries as served by the draft backend.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Football positions recognized by roster slot assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Kicker,
    Defense,
}

impl Position {
    /// Every position, in the order the position filter cycles through them.
    pub const ALL: [Position; 6] = [
        Position::Quarterback,
        Position::RunningBack,
        Position::WideReceiver,
        Position::TightEnd,
        Position::Kicker,
        Position::Defense,
    ];

    /// Parse a backend position string into a Position.
    ///
    /// Team defenses arrive as either "DEF" or "D/ST" depending on the data
    /// source; both map to `Defense`. Matching is exact, so "rb" or " RB"
    /// are unrecognized and end up on the bench.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s {
            "QB" => Some(Position::Quarterback),
            "RB" => Some(Position::RunningBack),
            "WR" => Some(Position::WideReceiver),
            "TE" => Some(Position::TightEnd),
            "K" => Some(Position::Kicker),
            "DEF" | "D/ST" => Some(Position::Defense),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::Defense => "DEF",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Backend player identifier.
///
/// The backend may key players by integer or by string. The value is kept
/// exactly as received so it serializes back unchanged in a pick submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerId {
    Number(i64),
    Text(String),
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::Number(n) => write!(f, "{n}"),
            PlayerId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for PlayerId {
    fn from(n: i64) -> Self {
        PlayerId::Number(n)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        PlayerId::Text(s.to_string())
    }
}

/// A draftable player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Raw position string (e.g. "RB", "D/ST"). Kept verbatim so unknown
    /// positions can still be displayed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projected_points: f64,
}

impl Player {
    /// The parsed position, or `None` if the backend sent something we do
    /// not recognize.
    pub fn position(&self) -> Option<Position> {
        Position::from_str_pos(&self.position)
    }
}

/// A single completed pick on the draft board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftPick {
    /// Round number (1-indexed).
    pub round: u32,
    /// Absolute pick number (1-indexed).
    pub pick_number: u32,
    /// Name of the drafter credited with the pick.
    #[serde(default, deserialize_with = "null_as_default")]
    pub drafter: String,
    /// Name of the drafted player.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team: String,
}

/// Treat an explicit JSON `null` like a missing field, so one sparse record
/// does not fail the whole list.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
