//! Data structures for the prediction game: teams, matches, predictions, standings, tournament state.

mod game;
mod prediction;
mod slot;
mod standing;
mod team;
mod tournament;

pub use game::{
    Match, MatchId, MatchResult, Stage, FIRST_KNOCKOUT_MATCH, LAST_GROUP_MATCH, LAST_KNOCKOUT_MATCH,
};
pub use prediction::{Prediction, PredictionMap, PredictionSheet, UserId};
pub use slot::{SlotCode, SlotCodeError};
pub use standing::{table_order, Standing, ThirdPlaceEntry};
pub use team::{is_group, GroupId, Team, TeamId, GROUPS, GROUP_SIZE};
pub use tournament::{Tournament, TournamentError};
