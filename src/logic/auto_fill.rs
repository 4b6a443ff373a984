//! Auto-fill: random but ranking-weighted scores for every unpredicted match.

use crate::logic::evaluation::evaluate;
use crate::models::{Match, Prediction, PredictionMap, TeamId, Tournament};
use chrono::{DateTime, Utc};
use rand::Rng;

/// Goals expected from an evenly matched side.
const BASE_GOALS: f64 = 1.3;
/// Ranking places per extra expected goal.
const RANKING_SPREAD: f64 = 60.0;

/// Complete for resolution purposes: group matches need both scores, knockout
/// matches a winner pick or a decisive score.
pub fn is_complete_for(m: &Match, prediction: &Prediction) -> bool {
    if m.is_group() {
        return prediction.is_complete();
    }
    prediction.winner_id.is_some() || prediction.scores().is_some_and(|(h, a)| h != a)
}

/// Poisson sample (Knuth), capped at 9 goals.
fn sample_goals<R: Rng>(rng: &mut R, expected: f64) -> u8 {
    let limit = (-expected).exp();
    let mut goals = 0u8;
    let mut p = rng.gen::<f64>();
    while p > limit && goals < 9 {
        goals += 1;
        p *= rng.gen::<f64>();
    }
    goals
}

fn ranking(tournament: &Tournament, team: &str) -> f64 {
    tournament.team(team).map(|t| f64::from(t.ranking)).unwrap_or(50.0)
}

fn random_score<R: Rng>(tournament: &Tournament, home: &str, away: &str, rng: &mut R) -> (u8, u8) {
    let edge = (ranking(tournament, away) - ranking(tournament, home)) / RANKING_SPREAD;
    let home_xg = (BASE_GOALS + edge / 2.0).clamp(0.2, 3.5);
    let away_xg = (BASE_GOALS - edge / 2.0).clamp(0.2, 3.5);
    (sample_goals(rng, home_xg), sample_goals(rng, away_xg))
}

/// Predictions for every match the user has not completed yet.
///
/// Complete predictions and locked matches are left alone. Group matches are
/// filled first; knockout matches are then filled in id order against the
/// bracket as it resolves, always with an explicit winner (a drawn score gets a
/// coin flip). Returns only the new predictions.
pub fn auto_fill<R: Rng>(
    tournament: &Tournament,
    existing: &PredictionMap,
    now: DateTime<Utc>,
    rng: &mut R,
) -> PredictionMap {
    let mut working = existing.clone();
    let mut added = PredictionMap::new();

    let needs_fill = |m: &Match, working: &PredictionMap| {
        !m.is_locked(now) && !working.get(&m.id).is_some_and(|p| is_complete_for(m, p))
    };

    for m in tournament.matches.iter().filter(|m| m.is_group()) {
        if !needs_fill(m, &working) {
            continue;
        }
        let (Some(home), Some(away)) = (m.home_team.as_deref(), m.away_team.as_deref()) else {
            continue;
        };
        let (h, a) = random_score(tournament, home, away, rng);
        let prediction = Prediction::score(h, a);
        working.insert(m.id, prediction.clone());
        added.insert(m.id, prediction);
    }

    for m in tournament.matches.iter().filter(|m| !m.is_group()) {
        if !needs_fill(m, &working) {
            continue;
        }
        let bracket = evaluate(&tournament.bracket, &tournament.matches, &working).bracket;
        let Some((home, away)) = bracket.get(&m.id).and_then(|p| p.teams()) else {
            continue;
        };
        let (h, a) = random_score(tournament, home, away, rng);
        let winner: TeamId = match h.cmp(&a) {
            std::cmp::Ordering::Greater => home.clone(),
            std::cmp::Ordering::Less => away.clone(),
            std::cmp::Ordering::Equal if rng.gen_bool(0.5) => home.clone(),
            std::cmp::Ordering::Equal => away.clone(),
        };
        let prediction = Prediction::score(h, a).with_winner(winner);
        working.insert(m.id, prediction.clone());
        added.insert(m.id, prediction);
    }

    log::debug!("Auto-fill produced {} predictions", added.len());
    added
}
