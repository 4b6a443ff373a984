//! Prediction game logic: setup, group tables, third-place ranking, bracket resolution.

mod auto_fill;
mod bracket_table;
mod consensus;
mod evaluation;
mod outcomes;
mod resolver;
mod setup;
mod standings;
mod third_place;

pub use auto_fill::{auto_fill, is_complete_for};
pub use bracket_table::{BracketStructure, FeederPair, KNOCKOUT_FIXTURES, THIRD_PLACE_PRIORITY};
pub use consensus::{consensus, Consensus};
pub use evaluation::{evaluate, evaluate_user, Evaluation};
pub use outcomes::{score_map, ScoreSource};
pub use resolver::{resolve_bracket, BracketMap, ResolvedPair};
pub use setup::{
    build_schedule, default_teams, parse_teams_csv, standard_tournament, tournament_from_teams,
    validate_roster,
};
pub use standings::{all_group_standings, compute_standings, group_standings};
pub use third_place::{rank_third_placed, rank_thirds_from_standings, QUALIFYING_THIRDS};
