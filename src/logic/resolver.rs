//! Knockout bracket resolution: slot codes to concrete teams.
//!
//! Works over the 32 knockout matches in ascending id order. Group positions come
//! from the group tables, third-place slots from the third-place ranking, and
//! `W`/`L` slots from the already-resolved feeder match plus its prediction.
//! Anything that cannot be determined yet stays `None`.

use crate::logic::bracket_table::BracketStructure;
use crate::models::{
    GroupId, Match, MatchId, Prediction, PredictionMap, SlotCode, Standing, TeamId, ThirdPlaceEntry,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// The two teams of one knockout match; `None` while undetermined.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPair {
    pub home: Option<TeamId>,
    pub away: Option<TeamId>,
}

impl ResolvedPair {
    /// Both teams, if both are known.
    pub fn teams(&self) -> Option<(&TeamId, &TeamId)> {
        Some((self.home.as_ref()?, self.away.as_ref()?))
    }

    pub fn is_complete(&self) -> bool {
        self.home.is_some() && self.away.is_some()
    }
}

/// Knockout match id -> resolved pair.
pub type BracketMap = BTreeMap<MatchId, ResolvedPair>;

/// Group-position and third-place lookups for one resolution pass.
struct SlotTable<'a> {
    structure: &'a BracketStructure,
    /// (rank, group) -> team, for ranks 1 and 2.
    group_ranks: HashMap<(u8, GroupId), TeamId>,
    /// Group -> its third-placed team, qualified teams only.
    qualified_thirds: HashMap<GroupId, TeamId>,
    /// Highest-ranked qualified third-placed team.
    best_third: Option<TeamId>,
}

impl<'a> SlotTable<'a> {
    fn build(
        structure: &'a BracketStructure,
        standings: &BTreeMap<GroupId, Vec<Standing>>,
        third_place: &[ThirdPlaceEntry],
    ) -> Self {
        let mut group_ranks = HashMap::new();
        for (group, rows) in standings {
            for (rank, row) in [1u8, 2].into_iter().zip(rows.iter()) {
                group_ranks.insert((rank, *group), row.team.clone());
            }
        }

        let qualified: Vec<&ThirdPlaceEntry> = third_place.iter().filter(|e| e.qualified).collect();
        let qualified_thirds = qualified
            .iter()
            .map(|e| (e.group, e.standing.team.clone()))
            .collect();
        let best_third = qualified.first().map(|e| e.standing.team.clone());

        Self {
            structure,
            group_ranks,
            qualified_thirds,
            best_third,
        }
    }

    /// Walk the match's priority list (or the code's own groups) and take the
    /// first group whose third-placed team qualified. If none did, fall back to
    /// the best qualified third-placed team overall.
    fn third_place(&self, match_id: MatchId, groups: &[GroupId]) -> Option<TeamId> {
        let priority = self.structure.third_place_priority(match_id).unwrap_or(groups);
        priority
            .iter()
            .find_map(|g| self.qualified_thirds.get(g).cloned())
            .or_else(|| self.best_third.clone())
    }
}

/// Winner and loser of a knockout match, given its resolved teams and prediction.
///
/// An explicit `winner_id` wins over the scores. Otherwise both teams and both
/// scores must be known; a draw decides nothing.
fn outcome(pair: Option<&ResolvedPair>, prediction: Option<&Prediction>) -> (Option<TeamId>, Option<TeamId>) {
    let Some(prediction) = prediction else {
        return (None, None);
    };
    let teams = pair.and_then(ResolvedPair::teams);

    if let Some(winner) = &prediction.winner_id {
        let loser = teams.and_then(|(home, away)| {
            if winner == home {
                Some(away.clone())
            } else if winner == away {
                Some(home.clone())
            } else {
                None
            }
        });
        return (Some(winner.clone()), loser);
    }

    match (teams, prediction.scores()) {
        (Some((home, away)), Some((home_score, away_score))) => match home_score.cmp(&away_score) {
            Ordering::Greater => (Some(home.clone()), Some(away.clone())),
            Ordering::Less => (Some(away.clone()), Some(home.clone())),
            Ordering::Equal => (None, None),
        },
        _ => (None, None),
    }
}

fn resolve_code(
    code: &SlotCode,
    match_id: MatchId,
    slots: &SlotTable<'_>,
    resolved: &BracketMap,
    predictions: &PredictionMap,
) -> Option<TeamId> {
    match code {
        SlotCode::GroupRank { rank, group } => slots.group_ranks.get(&(*rank, *group)).cloned(),
        SlotCode::ThirdPlace { groups } => slots.third_place(match_id, groups),
        SlotCode::Winner(feeder) | SlotCode::Loser(feeder) => {
            // Only earlier matches are resolved at this point.
            if *feeder >= match_id {
                return None;
            }
            let (winner, loser) = outcome(resolved.get(feeder), predictions.get(feeder));
            if matches!(code, SlotCode::Winner(_)) {
                winner
            } else {
                loser
            }
        }
    }
}

/// Resolve every knockout match to concrete teams.
///
/// Pure: the same inputs always give the same map. Matches missing from the
/// structure fall back to their own team ids, then their own slot codes.
pub fn resolve_bracket(
    structure: &BracketStructure,
    standings: &BTreeMap<GroupId, Vec<Standing>>,
    third_place: &[ThirdPlaceEntry],
    matches: &[Match],
    predictions: &PredictionMap,
) -> BracketMap {
    let slots = SlotTable::build(structure, standings, third_place);

    let mut knockout: Vec<&Match> = matches.iter().filter(|m| !m.is_group()).collect();
    knockout.sort_by_key(|m| m.id);

    let mut resolved = BracketMap::new();
    for m in knockout {
        let pair = match structure.fixture(m.id) {
            Some(feeders) => ResolvedPair {
                home: resolve_code(&feeders.home, m.id, &slots, &resolved, predictions),
                away: resolve_code(&feeders.away, m.id, &slots, &resolved, predictions),
            },
            None => {
                log::warn!("Knockout match {} missing from bracket structure", m.id);
                let side = |team: &Option<TeamId>, code: &Option<SlotCode>| {
                    team.clone().or_else(|| {
                        code.as_ref()
                            .and_then(|c| resolve_code(c, m.id, &slots, &resolved, predictions))
                    })
                };
                ResolvedPair {
                    home: side(&m.home_team, &m.home_code),
                    away: side(&m.away_team, &m.away_code),
                }
            }
        };
        resolved.insert(m.id, pair);
    }

    log::debug!(
        "Resolved bracket: {}/{} knockout matches fully known",
        resolved.values().filter(|p| p.is_complete()).count(),
        resolved.len()
    );
    resolved
}
