//! Tournament prediction game: library with models and the standings / bracket engine.

pub mod config;
pub mod logic;
pub mod models;

pub use config::ServerConfig;
pub use logic::{
    all_group_standings, auto_fill, build_schedule, compute_standings, consensus, default_teams,
    evaluate, evaluate_user, group_standings, is_complete_for, parse_teams_csv, rank_third_placed,
    rank_thirds_from_standings, resolve_bracket, score_map, standard_tournament,
    tournament_from_teams, validate_roster, BracketMap, BracketStructure, Consensus, Evaluation,
    FeederPair, ResolvedPair, ScoreSource, KNOCKOUT_FIXTURES, QUALIFYING_THIRDS,
    THIRD_PLACE_PRIORITY,
};
pub use models::{
    table_order, GroupId, Match, MatchId, MatchResult, Prediction, PredictionMap, PredictionSheet,
    SlotCode, SlotCodeError, Stage, Standing, Team, TeamId, ThirdPlaceEntry, Tournament,
    TournamentError, UserId, FIRST_KNOCKOUT_MATCH, GROUPS, GROUP_SIZE, LAST_GROUP_MATCH,
    LAST_KNOCKOUT_MATCH,
};
