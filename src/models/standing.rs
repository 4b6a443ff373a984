//! Standing rows for group tables and the third-place ranking.

use crate::models::team::{GroupId, TeamId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A team's aggregated group-stage record. Always derived, never stored.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub team: TeamId,
    pub group: Option<GroupId>,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
}

impl Standing {
    /// All-zero row for a team that has no complete prediction yet.
    pub fn new(team: impl Into<TeamId>, group: Option<GroupId>) -> Self {
        Self {
            team: team.into(),
            group,
            ..Self::default()
        }
    }

    /// Add one finished match from this team's point of view.
    pub fn record(&mut self, scored: u8, conceded: u8) {
        let (scored, conceded) = (u32::from(scored), u32::from(conceded));
        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        self.goal_difference += scored as i32 - conceded as i32;
        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.won += 1;
                self.points += 3;
            }
            Ordering::Equal => {
                self.drawn += 1;
                self.points += 1;
            }
            Ordering::Less => self.lost += 1,
        }
    }
}

/// Table order: points, goal difference, goals for, wins; all descending.
pub fn table_order(a: &Standing, b: &Standing) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| b.won.cmp(&a.won))
}

/// A group's third-placed team in the global third-place ranking.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ThirdPlaceEntry {
    pub group: GroupId,
    pub standing: Standing,
    /// True for the best eight; the rest are listed for display only.
    pub qualified: bool,
}
