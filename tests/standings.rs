//! Integration tests for group tables.

mod common;

use wc_predictor::{
    all_group_standings, compute_standings, group_standings, table_order, Match, Prediction,
    PredictionMap, Standing,
};

fn three_team_group() -> Vec<Match> {
    vec![
        Match::group(1, 'A', "AAA", "BBB"),
        Match::group(2, 'A', "BBB", "CCC"),
        Match::group(3, 'A', "CCC", "AAA"),
    ]
}

fn row<'a>(table: &'a [Standing], team: &str) -> &'a Standing {
    table.iter().find(|s| s.team == team).unwrap()
}

#[test]
fn football_table_from_complete_predictions() {
    let matches = three_team_group();
    let mut predictions = PredictionMap::new();
    predictions.insert(1, Prediction::score(2, 1));
    predictions.insert(2, Prediction::score(0, 0));
    predictions.insert(3, Prediction::score(1, 1));

    let table = compute_standings(&matches, &predictions);
    let order: Vec<&str> = table.iter().map(|s| s.team.as_str()).collect();
    assert_eq!(order, ["AAA", "CCC", "BBB"]);

    let a = row(&table, "AAA");
    assert_eq!((a.points, a.goal_difference, a.goals_for, a.goals_against), (4, 1, 3, 2));
    assert_eq!((a.played, a.won, a.drawn, a.lost), (2, 1, 1, 0));

    let b = row(&table, "BBB");
    assert_eq!((b.points, b.goal_difference, b.goals_for, b.goals_against), (1, -1, 1, 2));
    assert_eq!((b.played, b.won, b.drawn, b.lost), (2, 0, 1, 1));

    let c = row(&table, "CCC");
    assert_eq!((c.points, c.goal_difference, c.goals_for, c.goals_against), (2, 0, 1, 1));

    // Two teams per complete match.
    let played: u32 = table.iter().map(|s| s.played).sum();
    assert_eq!(played, 2 * 3);
}

#[test]
fn incomplete_prediction_counts_for_nothing() {
    let matches = three_team_group();
    let mut predictions = PredictionMap::new();
    predictions.insert(1, Prediction { home_score: None, away_score: Some(3), ..Prediction::default() });
    predictions.insert(2, Prediction::score(2, 0));
    predictions.insert(3, Prediction::score(1, 0));

    let mut with = compute_standings(&matches, &predictions);
    let mut without = compute_standings(&matches[1..], &predictions);
    with.sort_by(|a, b| a.team.cmp(&b.team));
    without.sort_by(|a, b| a.team.cmp(&b.team));
    assert_eq!(with, without);

    let a = row(&with, "AAA");
    assert_eq!((a.played, a.goals_against, a.points), (1, 1, 0));
}

#[test]
fn teams_without_predictions_still_get_a_row() {
    let matches = three_team_group();
    let table = compute_standings(&matches, &PredictionMap::new());
    assert_eq!(table.len(), 3);
    assert!(table.iter().all(|s| s.played == 0 && s.points == 0));
    // Untouched ties keep first-appearance order.
    let order: Vec<&str> = table.iter().map(|s| s.team.as_str()).collect();
    assert_eq!(order, ["AAA", "BBB", "CCC"]);
}

#[test]
fn knockout_matches_are_ignored() {
    let t = common::tournament();
    let predictions = common::predict_groups_thirds_e_to_l(&t);
    let group_a: Vec<Match> = t.matches.iter().filter(|m| m.group == Some('A')).cloned().collect();
    let mut all = group_a.clone();
    all.extend(t.matches.iter().filter(|m| !m.is_group()).cloned());
    assert_eq!(compute_standings(&all, &predictions), compute_standings(&group_a, &predictions));
}

#[test]
fn tie_breakers_apply_in_order() {
    let base = Standing {
        points: 4,
        goal_difference: 2,
        goals_for: 5,
        won: 1,
        ..Standing::new("X", Some('A'))
    };
    let better_gd = Standing { goal_difference: 3, goals_for: 1, won: 0, ..base.clone() };
    let better_gf = Standing { goals_for: 6, won: 0, ..base.clone() };
    let better_wins = Standing { won: 2, ..base.clone() };
    let more_points = Standing { points: 5, goal_difference: -4, ..base.clone() };

    use std::cmp::Ordering::*;
    assert_eq!(table_order(&more_points, &better_gd), Less);
    assert_eq!(table_order(&better_gd, &better_gf), Less);
    assert_eq!(table_order(&better_gf, &better_wins), Less);
    assert_eq!(table_order(&better_wins, &base), Less);
    assert_eq!(table_order(&base, &base.clone()), Equal);
}

#[test]
fn equal_points_sorted_by_goal_difference_from_matches() {
    // AAA and BBB both beat CCC and draw each other; AAA wins by more.
    let matches = three_team_group();
    let mut predictions = PredictionMap::new();
    predictions.insert(1, Prediction::score(1, 1));
    predictions.insert(2, Prediction::score(1, 0));
    predictions.insert(3, Prediction::score(0, 3));
    let table = compute_standings(&matches, &predictions);
    assert_eq!(table[0].team, "AAA");
    assert_eq!(table[1].team, "BBB");
    assert_eq!(table[0].points, table[1].points);
}

#[test]
fn every_group_has_four_rows_and_consistent_played() {
    let t = common::tournament();
    let mut predictions = common::predict_groups_thirds_e_to_l(&t);
    // Leave one match in group C half-filled.
    let c_match = t.matches.iter().find(|m| m.group == Some('C')).unwrap().id;
    predictions.get_mut(&c_match).unwrap().away_score = None;

    let tables = all_group_standings(&t.matches, &predictions);
    assert_eq!(tables.len(), 12);
    for (g, rows) in &tables {
        assert_eq!(rows.len(), 4, "group {g}");
        let complete = t
            .matches
            .iter()
            .filter(|m| m.group == Some(*g))
            .filter(|m| predictions.get(&m.id).is_some_and(|p| p.is_complete()))
            .count() as u32;
        let played: u32 = rows.iter().map(|s| s.played).sum();
        assert_eq!(played, 2 * complete, "group {g}");
    }

    let a = group_standings(&t.matches, &predictions, 'A');
    let order: Vec<String> = a.iter().map(|s| s.team.clone()).collect();
    let expected: Vec<String> = (0..4).map(|i| common::team_at(&t, 'A', i)).collect();
    assert_eq!(order, expected);
}
