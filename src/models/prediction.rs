//! Predictions and per-user prediction sheets.

use crate::models::game::{MatchId, MatchResult};
use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a user (anonymous, kept in the session cookie).
pub type UserId = Uuid;

/// Match id -> prediction, as consumed by the standings and bracket logic.
pub type PredictionMap = HashMap<MatchId, Prediction>;

/// One user's forecast for one match.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub home_score: Option<u8>,
    #[serde(default)]
    pub away_score: Option<u8>,
    /// Explicit knockout winner; overrides the score comparison.
    #[serde(default)]
    pub winner_id: Option<TeamId>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Prediction {
    /// A score-only prediction.
    pub fn score(home: u8, away: u8) -> Self {
        Self {
            home_score: Some(home),
            away_score: Some(away),
            ..Self::default()
        }
    }

    /// A score plus an explicit winner.
    pub fn with_winner(mut self, winner: impl Into<TeamId>) -> Self {
        self.winner_id = Some(winner.into());
        self
    }

    /// Both scores, if both are present.
    pub fn scores(&self) -> Option<(u8, u8)> {
        Some((self.home_score?, self.away_score?))
    }

    /// Complete for standings purposes: both scores present.
    pub fn is_complete(&self) -> bool {
        self.scores().is_some()
    }
}

impl From<&MatchResult> for Prediction {
    fn from(r: &MatchResult) -> Self {
        Self {
            home_score: Some(r.home_score),
            away_score: Some(r.away_score),
            winner_id: r.winner_id.clone(),
            updated_at: Some(r.recorded_at),
        }
    }
}

/// All predictions of one user, keyed by match (at most one per match).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PredictionSheet {
    pub user: UserId,
    pub predictions: PredictionMap,
    /// Last time anything on the sheet changed (used for inactivity cleanup).
    pub updated_at: DateTime<Utc>,
}

impl PredictionSheet {
    pub fn new(user: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user,
            predictions: HashMap::new(),
            updated_at: now,
        }
    }
}
