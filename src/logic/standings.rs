//! Group tables from group matches and predictions.

use crate::models::{table_order, GroupId, Match, PredictionMap, Standing, GROUPS};
use std::collections::BTreeMap;

/// Compute a ranked table from group matches.
///
/// Every team that appears in the input gets a row, even with nothing predicted.
/// Only matches with both scores present count; a half-filled prediction adds
/// nothing, not even a played match. Knockout matches in the input are ignored.
/// Rows are sorted by points, goal difference, goals for, then wins; remaining
/// ties keep the order in which teams first appear.
pub fn compute_standings<'a, I>(matches: I, predictions: &PredictionMap) -> Vec<Standing>
where
    I: IntoIterator<Item = &'a Match>,
{
    let mut rows: Vec<Standing> = Vec::new();

    fn row_index(rows: &mut Vec<Standing>, team: &str, group: Option<GroupId>) -> usize {
        match rows.iter().position(|s| s.team == team) {
            Some(idx) => idx,
            None => {
                rows.push(Standing::new(team, group));
                rows.len() - 1
            }
        }
    }

    for m in matches.into_iter().filter(|m| m.is_group()) {
        let (Some(home), Some(away)) = (m.home_team.as_deref(), m.away_team.as_deref()) else {
            continue;
        };
        let home_idx = row_index(&mut rows, home, m.group);
        let away_idx = row_index(&mut rows, away, m.group);

        let Some((home_score, away_score)) = predictions.get(&m.id).and_then(|p| p.scores()) else {
            continue;
        };
        rows[home_idx].record(home_score, away_score);
        rows[away_idx].record(away_score, home_score);
    }

    rows.sort_by(table_order);
    rows
}

/// Table for a single group.
pub fn group_standings(matches: &[Match], predictions: &PredictionMap, group: GroupId) -> Vec<Standing> {
    compute_standings(matches.iter().filter(|m| m.group == Some(group)), predictions)
}

/// Tables for all twelve groups, keyed by group letter.
pub fn all_group_standings(
    matches: &[Match],
    predictions: &PredictionMap,
) -> BTreeMap<GroupId, Vec<Standing>> {
    GROUPS
        .iter()
        .map(|&g| (g, group_standings(matches, predictions, g)))
        .collect()
}
