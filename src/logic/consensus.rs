//! Peer comparison: how all users predicted one match.

use crate::models::{MatchId, PredictionSheet, UserId};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Outcome counts across every complete prediction for a match.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Consensus {
    pub match_id: MatchId,
    pub predictions: u32,
    pub home_wins: u32,
    pub draws: u32,
    pub away_wins: u32,
    /// Most common exact score; ties go to the lowest score.
    pub top_score: Option<(u8, u8)>,
}

pub fn consensus(match_id: MatchId, sheets: &HashMap<UserId, PredictionSheet>) -> Consensus {
    let mut summary = Consensus {
        match_id,
        ..Consensus::default()
    };
    let mut scores: BTreeMap<(u8, u8), u32> = BTreeMap::new();

    for (h, a) in sheets
        .values()
        .filter_map(|s| s.predictions.get(&match_id))
        .filter_map(|p| p.scores())
    {
        summary.predictions += 1;
        match h.cmp(&a) {
            std::cmp::Ordering::Greater => summary.home_wins += 1,
            std::cmp::Ordering::Equal => summary.draws += 1,
            std::cmp::Ordering::Less => summary.away_wins += 1,
        }
        *scores.entry((h, a)).or_default() += 1;
    }

    // BTreeMap iterates lowest score first; keep the first maximum.
    let mut best: Option<((u8, u8), u32)> = None;
    for (score, n) in scores {
        if best.map_or(true, |(_, top)| n > top) {
            best = Some((score, n));
        }
    }
    summary.top_score = best.map(|(score, _)| score);
    summary
}
