//! One full pass: group tables, third-place ranking, resolved bracket.

use crate::logic::bracket_table::BracketStructure;
use crate::logic::outcomes::{score_map, ScoreSource};
use crate::logic::resolver::{resolve_bracket, BracketMap};
use crate::logic::standings::all_group_standings;
use crate::logic::third_place::rank_thirds_from_standings;
use crate::models::{
    GroupId, Match, PredictionMap, Standing, ThirdPlaceEntry, Tournament, UserId, GROUPS,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything derived from one set of matches and predictions.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Evaluation {
    pub standings: BTreeMap<GroupId, Vec<Standing>>,
    pub third_place: Vec<ThirdPlaceEntry>,
    pub bracket: BracketMap,
}

/// Recompute everything from scratch. Nothing is cached between calls.
pub fn evaluate(structure: &BracketStructure, matches: &[Match], predictions: &PredictionMap) -> Evaluation {
    let standings = all_group_standings(matches, predictions);
    let third_place = rank_thirds_from_standings(&standings, &GROUPS);
    let bracket = resolve_bracket(structure, &standings, &third_place, matches, predictions);
    Evaluation {
        standings,
        third_place,
        bracket,
    }
}

/// Evaluate one user's sheet with the chosen score source.
pub fn evaluate_user(tournament: &Tournament, user: UserId, source: ScoreSource) -> Evaluation {
    let predictions = score_map(&tournament.matches, &tournament.predictions_for(user), source);
    evaluate(&tournament.bracket, &tournament.matches, &predictions)
}
