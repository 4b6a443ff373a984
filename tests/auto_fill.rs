//! Integration tests for auto-fill.

mod common;

use chrono::{TimeZone, Utc};
use common::tournament;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;
use wc_predictor::{auto_fill, evaluate, is_complete_for, Prediction, PredictionMap};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

#[test]
fn fills_every_match_and_resolves_the_whole_bracket() {
    let t = tournament();
    let mut rng = StdRng::seed_from_u64(7);
    let filled = auto_fill(&t, &PredictionMap::new(), now(), &mut rng);
    assert_eq!(filled.len(), 104);

    for m in &t.matches {
        let p = &filled[&m.id];
        assert!(is_complete_for(m, p), "match {}", m.id);
        if m.is_group() {
            assert!(p.winner_id.is_none());
        } else {
            assert!(p.winner_id.is_some());
        }
    }

    let bracket = evaluate(&t.bracket, &t.matches, &filled).bracket;
    for (id, pair) in &bracket {
        let (home, away) = pair.teams().unwrap_or_else(|| panic!("match {id} unresolved"));
        let winner = filled[id].winner_id.as_ref().unwrap();
        assert!(winner == home || winner == away, "match {id}");
    }
}

#[test]
fn filled_sheet_passes_validation_in_one_batch() {
    let mut t = tournament();
    let user = Uuid::new_v4();
    let filled = auto_fill(&t, &PredictionMap::new(), now(), &mut StdRng::seed_from_u64(11));
    assert_eq!(t.set_predictions(user, filled, now()), Ok(104));

    // A second pass has nothing left to fill.
    let again = auto_fill(&t, &t.predictions_for(user), now(), &mut StdRng::seed_from_u64(12));
    assert!(again.is_empty());
}

#[test]
fn keeps_complete_predictions_and_replaces_incomplete_ones() {
    let t = tournament();
    let mut existing = PredictionMap::new();
    existing.insert(1, Prediction::score(9, 9));
    existing.insert(2, Prediction {
        home_score: Some(1),
        ..Prediction::default()
    });

    let filled = auto_fill(&t, &existing, now(), &mut StdRng::seed_from_u64(1));
    assert!(!filled.contains_key(&1));
    assert!(filled[&2].is_complete());
    assert_eq!(filled.len(), 103);
}

#[test]
fn skips_locked_matches() {
    let mut t = tournament();
    t.matches[4].kickoff = Some(now());
    let filled = auto_fill(&t, &PredictionMap::new(), now(), &mut StdRng::seed_from_u64(3));
    assert!(!filled.contains_key(&5));
    // The group table still settles, so the knockout stage fills.
    assert!(filled.contains_key(&104));
}

#[test]
fn same_seed_gives_same_predictions() {
    let t = tournament();
    let a = auto_fill(&t, &PredictionMap::new(), now(), &mut StdRng::seed_from_u64(42));
    let b = auto_fill(&t, &PredictionMap::new(), now(), &mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
}

#[test]
fn knockout_draw_counts_as_incomplete() {
    let t = tournament();
    let m73 = t.get_match(73).unwrap();
    assert!(!is_complete_for(m73, &Prediction::score(1, 1)));
    assert!(is_complete_for(m73, &Prediction::score(1, 1).with_winner("MEX")));
    assert!(is_complete_for(m73, &Prediction::score(2, 1)));
    let m1 = t.get_match(1).unwrap();
    assert!(is_complete_for(m1, &Prediction::score(1, 1)));
}
