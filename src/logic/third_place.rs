//! Ranking of the twelve third-placed teams.

use crate::logic::standings::group_standings;
use crate::models::{table_order, GroupId, Match, PredictionMap, Standing, ThirdPlaceEntry};
use std::collections::BTreeMap;

/// How many third-placed teams reach the Round of 32.
pub const QUALIFYING_THIRDS: usize = 8;

/// Rank every group's third-placed team straight from matches and predictions.
pub fn rank_third_placed(
    matches: &[Match],
    predictions: &PredictionMap,
    groups: &[GroupId],
) -> Vec<ThirdPlaceEntry> {
    let standings = groups
        .iter()
        .map(|&g| (g, group_standings(matches, predictions, g)))
        .collect();
    rank_thirds_from_standings(&standings, groups)
}

/// Rank every group's third-placed team with the table order.
///
/// Groups with fewer than three rows contribute nothing. The first eight entries
/// are marked `qualified`, but only once at least eight groups have a third-placed
/// team; before that nobody qualifies. Entries past the eighth are kept for display.
pub fn rank_thirds_from_standings(
    standings: &BTreeMap<GroupId, Vec<Standing>>,
    groups: &[GroupId],
) -> Vec<ThirdPlaceEntry> {
    let mut thirds: Vec<ThirdPlaceEntry> = groups
        .iter()
        .filter_map(|g| {
            let third = standings.get(g)?.get(2)?;
            Some(ThirdPlaceEntry {
                group: *g,
                standing: third.clone(),
                qualified: false,
            })
        })
        .collect();

    thirds.sort_by(|a, b| table_order(&a.standing, &b.standing));

    if thirds.len() >= QUALIFYING_THIRDS {
        for entry in thirds.iter_mut().take(QUALIFYING_THIRDS) {
            entry.qualified = true;
        }
    }
    thirds
}
