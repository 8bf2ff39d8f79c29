// Draft backend client: the REST service that owns players and picks.
//
// The app talks to the backend only through the `DraftBackend` trait so the
// orchestrator can be driven by an in-memory fake in tests.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::draft::pick::{DraftPick, Player, PlayerId};
use crate::draft::PickAttribution;

pub use http::HttpBackend;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Body of `POST /draft-picks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickRequest {
    pub player_id: PlayerId,
    pub pick_number: u32,
    pub round: u32,
    pub drafter: String,
}

impl PickRequest {
    pub fn new(player_id: PlayerId, attribution: &PickAttribution) -> Self {
        PickRequest {
            player_id,
            pick_number: attribution.pick_number,
            round: attribution.round,
            drafter: attribution.drafter.clone(),
        }
    }
}

/// Server-side draft suggestion. Every field is optional; the backend may
/// answer with `{}` or `null` when it has nothing to suggest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub projected_points: Option<f64>,
}

impl Recommendation {
    /// Only a recommendation that names a player is worth showing.
    pub fn is_actionable(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    /// One-line summary, e.g. `Josh Allen (QB - BUF)`.
    pub fn headline(&self) -> String {
        let name = self.name.as_deref().unwrap_or("");
        let position = self.position.as_deref().unwrap_or("?");
        let team = self.team.as_deref().unwrap_or("?");
        format!("{name} ({position} - {team})")
    }
}

// ---------------------------------------------------------------------------
// Backend trait
// ---------------------------------------------------------------------------

/// Operations exposed by the draft backend.
#[async_trait]
pub trait DraftBackend: Send + Sync {
    /// `GET /available-players`
    async fn available_players(&self) -> Result<Vec<Player>, ApiError>;

    /// `GET /draft-board`
    async fn draft_board(&self) -> Result<Vec<DraftPick>, ApiError>;

    /// `GET /my-team?drafter=<name>`
    async fn team_roster(&self, drafter: &str) -> Result<Vec<Player>, ApiError>;

    /// `GET /recommendation`. `None` when the backend has no usable suggestion.
    async fn recommendation(&self) -> Result<Option<Recommendation>, ApiError>;

    /// `POST /draft-picks`
    async fn submit_pick(&self, pick: &PickRequest) -> Result<(), ApiError>;

    /// `DELETE /reset-draft`
    async fn reset_draft(&self) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_request_copies_attribution() {
        let attribution = PickAttribution {
            round: 2,
            pick_in_round: 1,
            drafter: "Team 9".into(),
            pick_number: 12,
        };
        let req = PickRequest::new(PlayerId::Number(301), &attribution);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "player_id": 301,
                "pick_number": 12,
                "round": 2,
                "drafter": "Team 9",
            })
        );
    }

    #[test]
    fn pick_request_keeps_string_ids() {
        let attribution = PickAttribution {
            round: 1,
            pick_in_round: 0,
            drafter: "You".into(),
            pick_number: 1,
        };
        let req = PickRequest::new(PlayerId::from("abc-1"), &attribution);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["player_id"], "abc-1");
    }

    #[test]
    fn empty_recommendation_is_not_actionable() {
        let rec: Recommendation = serde_json::from_str("{}").unwrap();
        assert!(!rec.is_actionable());

        let blank = Recommendation {
            name: Some("  ".into()),
            ..Default::default()
        };
        assert!(!blank.is_actionable());
    }

    #[test]
    fn recommendation_headline() {
        let rec: Recommendation = serde_json::from_str(
            r#"{"name": "Josh Allen", "position": "QB", "team": "BUF", "projected_points": 390.2, "reason": "value"}"#,
        )
        .unwrap();
        assert!(rec.is_actionable());
        assert_eq!(rec.headline(), "Josh Allen (QB - BUF)");
        assert_eq!(rec.projected_points, Some(390.2));
    }

    #[test]
    fn recommendation_accepts_null_fields() {
        let rec: Recommendation =
            serde_json::from_str(r#"{"name": "Sleeper", "position": null, "team": null}"#).unwrap();
        assert!(rec.is_actionable());
        assert_eq!(rec.headline(), "Sleeper (? - ?)");
    }
}
