//! Tournament: roster, schedule, bracket structure and prediction sheets.

use crate::logic::{evaluate, score_map, BracketStructure, ScoreSource};
use crate::models::game::{Match, MatchId, MatchResult};
use crate::models::prediction::{Prediction, PredictionMap, PredictionSheet, UserId};
use crate::models::slot::SlotCodeError;
use crate::models::team::{Team, TeamId};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// No match with this id in the schedule.
    MatchNotFound(MatchId),
    /// Team code is not on the roster.
    UnknownTeam(TeamId),
    /// Group matches are decided by score only.
    WinnerOnGroupMatch(MatchId),
    /// Winner is not one of the two teams playing.
    WinnerNotInMatch { match_id: MatchId, team: TeamId },
    /// Kickoff has passed; the prediction can no longer change.
    PredictionLocked(MatchId),
    /// Roster does not describe 12 groups of 4 unique teams.
    InvalidRoster(String),
    /// Schedule does not line up with the bracket structure.
    InvalidSchedule(String),
    /// A slot code failed to parse.
    SlotCode(SlotCodeError),
    /// Roster CSV could not be read.
    Csv(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            TournamentError::UnknownTeam(team) => write!(f, "Unknown team '{}'", team),
            TournamentError::WinnerOnGroupMatch(id) => {
                write!(f, "Match {} is a group match and cannot have a winner pick", id)
            }
            TournamentError::WinnerNotInMatch { match_id, team } => {
                write!(f, "Team '{}' does not play in match {}", team, match_id)
            }
            TournamentError::PredictionLocked(id) => {
                write!(f, "Match {} has kicked off; predictions are locked", id)
            }
            TournamentError::InvalidRoster(msg) => write!(f, "Invalid roster: {}", msg),
            TournamentError::InvalidSchedule(msg) => write!(f, "Invalid schedule: {}", msg),
            TournamentError::SlotCode(e) => write!(f, "{}", e),
            TournamentError::Csv(msg) => write!(f, "Could not read roster CSV: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

impl From<SlotCodeError> for TournamentError {
    fn from(e: SlotCodeError) -> Self {
        TournamentError::SlotCode(e)
    }
}

impl From<csv::Error> for TournamentError {
    fn from(e: csv::Error) -> Self {
        TournamentError::Csv(e.to_string())
    }
}

/// Full tournament state: teams, the 104 matches and every user's predictions.
#[derive(Clone, Debug)]
pub struct Tournament {
    pub teams: Vec<Team>,
    /// Sorted by id.
    pub matches: Vec<Match>,
    /// Parsed knockout structure, shared by every resolution pass.
    pub bracket: BracketStructure,
    pub sheets: HashMap<UserId, PredictionSheet>,
}

impl Tournament {
    /// Assemble a tournament. Matches are sorted by id; no predictions yet.
    pub fn new(teams: Vec<Team>, mut matches: Vec<Match>, bracket: BracketStructure) -> Self {
        matches.sort_by_key(|m| m.id);
        Self {
            teams,
            matches,
            bracket,
            sheets: HashMap::new(),
        }
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn get_match(&self, id: MatchId) -> Option<&Match> {
        let idx = self.matches.binary_search_by_key(&id, |m| m.id).ok()?;
        Some(&self.matches[idx])
    }

    fn get_match_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        let idx = self.matches.binary_search_by_key(&id, |m| m.id).ok()?;
        Some(&mut self.matches[idx])
    }

    /// The user's sheet, if they have predicted anything.
    pub fn sheet(&self, user: UserId) -> Option<&PredictionSheet> {
        self.sheets.get(&user)
    }

    /// Copy of the user's predictions (empty if none).
    pub fn predictions_for(&self, user: UserId) -> PredictionMap {
        self.sheets
            .get(&user)
            .map(|s| s.predictions.clone())
            .unwrap_or_default()
    }

    /// Winner picks are allowed on knockout matches only and must name a roster
    /// team. Once both teams of the match are known, either concrete on the match
    /// or resolved from `scores`, the pick must be one of them.
    fn validate_winner(
        &self,
        m: &Match,
        winner: Option<&TeamId>,
        scores: &PredictionMap,
    ) -> Result<(), TournamentError> {
        let Some(winner) = winner else {
            return Ok(());
        };
        if m.is_group() {
            return Err(TournamentError::WinnerOnGroupMatch(m.id));
        }
        if self.team(winner).is_none() {
            return Err(TournamentError::UnknownTeam(winner.clone()));
        }

        let playing = match (&m.home_team, &m.away_team) {
            (Some(home), Some(away)) => Some((home.clone(), away.clone())),
            _ => evaluate(&self.bracket, &self.matches, scores)
                .bracket
                .get(&m.id)
                .and_then(|pair| pair.teams())
                .map(|(home, away)| (home.clone(), away.clone())),
        };
        match playing {
            Some((home, away)) if *winner != home && *winner != away => {
                Err(TournamentError::WinnerNotInMatch {
                    match_id: m.id,
                    team: winner.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Existence, lock and winner checks for one prediction, against the sheet
    /// the prediction would land on.
    fn validate_prediction(
        &self,
        match_id: MatchId,
        prediction: &Prediction,
        sheet: &PredictionMap,
        now: DateTime<Utc>,
    ) -> Result<(), TournamentError> {
        let m = self
            .get_match(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        if m.is_locked(now) {
            return Err(TournamentError::PredictionLocked(match_id));
        }
        self.validate_winner(m, prediction.winner_id.as_ref(), sheet)
    }

    fn sheet_mut(&mut self, user: UserId, now: DateTime<Utc>) -> &mut PredictionSheet {
        let sheet = self
            .sheets
            .entry(user)
            .or_insert_with(|| PredictionSheet::new(user, now));
        sheet.updated_at = now;
        sheet
    }

    /// Insert or replace the user's prediction for one match.
    pub fn set_prediction(
        &mut self,
        user: UserId,
        match_id: MatchId,
        mut prediction: Prediction,
        now: DateTime<Utc>,
    ) -> Result<&Prediction, TournamentError> {
        let mut sheet = self.predictions_for(user);
        sheet.insert(match_id, prediction.clone());
        self.validate_prediction(match_id, &prediction, &sheet, now)?;

        prediction.updated_at = Some(now);
        let sheet = self.sheet_mut(user, now);
        sheet.predictions.insert(match_id, prediction);
        Ok(&sheet.predictions[&match_id])
    }

    /// Insert or replace several predictions at once.
    ///
    /// Every prediction is checked against the sheet as it will look afterwards;
    /// if any is rejected nothing is written. Returns how many were stored.
    pub fn set_predictions(
        &mut self,
        user: UserId,
        predictions: PredictionMap,
        now: DateTime<Utc>,
    ) -> Result<usize, TournamentError> {
        let mut sheet = self.predictions_for(user);
        sheet.extend(predictions.iter().map(|(id, p)| (*id, p.clone())));

        let mut ids: Vec<MatchId> = predictions.keys().copied().collect();
        ids.sort_unstable();
        for id in &ids {
            self.validate_prediction(*id, &predictions[id], &sheet, now)?;
        }

        let count = predictions.len();
        let sheet = self.sheet_mut(user, now);
        for (id, mut prediction) in predictions {
            prediction.updated_at = Some(now);
            sheet.predictions.insert(id, prediction);
        }
        Ok(count)
    }

    /// Remove the user's prediction for one match. Returns whether one existed.
    pub fn clear_prediction(
        &mut self,
        user: UserId,
        match_id: MatchId,
        now: DateTime<Utc>,
    ) -> Result<bool, TournamentError> {
        let m = self
            .get_match(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        if m.is_locked(now) {
            return Err(TournamentError::PredictionLocked(match_id));
        }
        let Some(sheet) = self.sheets.get_mut(&user) else {
            return Ok(false);
        };
        sheet.updated_at = now;
        Ok(sheet.predictions.remove(&match_id).is_some())
    }

    /// Record the real outcome of a match.
    pub fn set_result(&mut self, match_id: MatchId, result: MatchResult) -> Result<(), TournamentError> {
        let m = self
            .get_match(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        let results = score_map(&self.matches, &PredictionMap::new(), ScoreSource::Results);
        self.validate_winner(m, result.winner_id.as_ref(), &results)?;
        if let Some(m) = self.get_match_mut(match_id) {
            m.result = Some(result);
        }
        Ok(())
    }

    /// Forget a recorded outcome. Returns whether one existed.
    pub fn clear_result(&mut self, match_id: MatchId) -> Result<bool, TournamentError> {
        let m = self
            .get_match_mut(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        Ok(m.result.take().is_some())
    }

    /// Drop sheets that have not changed for `max_idle`. Returns how many were removed.
    pub fn remove_inactive_sheets(&mut self, max_idle: Duration, now: DateTime<Utc>) -> usize {
        let before = self.sheets.len();
        self.sheets.retain(|_, sheet| now - sheet.updated_at < max_idle);
        before - self.sheets.len()
    }
}
