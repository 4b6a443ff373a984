//! Which scores feed the tables and the bracket: forecasts, real results, or both.

use crate::models::{Match, Prediction, PredictionMap};
use serde::{Deserialize, Serialize};

/// Source of the scores used for an evaluation pass.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// The user's own predictions only.
    #[default]
    Predictions,
    /// Recorded real results only.
    Results,
    /// Real results where played, predictions everywhere else.
    Blended,
}

/// Build the match id -> prediction map the engine consumes.
pub fn score_map(matches: &[Match], predictions: &PredictionMap, source: ScoreSource) -> PredictionMap {
    let results = || {
        matches
            .iter()
            .filter_map(|m| m.result.as_ref().map(|r| (m.id, Prediction::from(r))))
    };
    match source {
        ScoreSource::Predictions => predictions.clone(),
        ScoreSource::Results => results().collect(),
        ScoreSource::Blended => {
            let mut merged = predictions.clone();
            merged.extend(results());
            merged
        }
    }
}
