//! Match, Stage and recorded results.

use crate::models::slot::SlotCode;
use crate::models::team::{GroupId, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Match number. 1..=72 are group matches, 73..=104 knockout matches in dependency order.
pub type MatchId = u32;

/// Last group-stage match id.
pub const LAST_GROUP_MATCH: MatchId = 72;

/// First and last knockout match ids.
pub const FIRST_KNOCKOUT_MATCH: MatchId = 73;
pub const LAST_KNOCKOUT_MATCH: MatchId = 104;

/// Phase of the tournament a match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Group,
    RoundOf32,
    RoundOf16,
    QuarterFinal,
    SemiFinal,
    ThirdPlace,
    Final,
}

impl Stage {
    pub fn is_knockout(self) -> bool {
        self != Stage::Group
    }
}

/// The real score (and, for knockout matches decided on penalties, the winner).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub home_score: u8,
    pub away_score: u8,
    #[serde(default)]
    pub winner_id: Option<TeamId>,
    pub recorded_at: DateTime<Utc>,
}

/// A single fixture.
///
/// Group matches carry concrete teams. Knockout matches carry slot codes until
/// their participants are fixed; either side may hold both.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub stage: Stage,
    /// Set for group matches only.
    #[serde(default)]
    pub group: Option<GroupId>,
    #[serde(default)]
    pub home_team: Option<TeamId>,
    #[serde(default)]
    pub away_team: Option<TeamId>,
    #[serde(default)]
    pub home_code: Option<SlotCode>,
    #[serde(default)]
    pub away_code: Option<SlotCode>,
    /// Predictions are locked from kickoff onwards.
    #[serde(default)]
    pub kickoff: Option<DateTime<Utc>>,
    /// None until the real match has been played.
    #[serde(default)]
    pub result: Option<MatchResult>,
}

impl Match {
    /// A group-stage match between two known teams.
    pub fn group(id: MatchId, group: GroupId, home: impl Into<TeamId>, away: impl Into<TeamId>) -> Self {
        Self {
            id,
            stage: Stage::Group,
            group: Some(group),
            home_team: Some(home.into()),
            away_team: Some(away.into()),
            home_code: None,
            away_code: None,
            kickoff: None,
            result: None,
        }
    }

    /// A knockout match whose participants are given by slot codes.
    pub fn knockout(id: MatchId, stage: Stage, home: SlotCode, away: SlotCode) -> Self {
        Self {
            id,
            stage,
            group: None,
            home_team: None,
            away_team: None,
            home_code: Some(home),
            away_code: Some(away),
            kickoff: None,
            result: None,
        }
    }

    pub fn with_kickoff(mut self, kickoff: DateTime<Utc>) -> Self {
        self.kickoff = Some(kickoff);
        self
    }

    pub fn is_group(&self) -> bool {
        self.stage == Stage::Group
    }

    /// True once kickoff has passed (predictions no longer accepted).
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.kickoff.is_some_and(|k| k <= now)
    }

    /// True if `team` plays in this match (concrete team ids only).
    pub fn involves(&self, team: &str) -> bool {
        self.home_team.as_deref() == Some(team) || self.away_team.as_deref() == Some(team)
    }
}
