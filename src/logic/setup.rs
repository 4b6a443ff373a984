//! Setup: roster loading and the 104-match schedule.

use crate::logic::bracket_table::BracketStructure;
use crate::models::{
    is_group, GroupId, Match, MatchId, Team, Tournament, TournamentError, GROUPS, GROUP_SIZE,
};
use serde::Deserialize;
use std::collections::HashSet;

/// Built-in roster: (code, name, group, ranking).
const DEFAULT_ROSTER: [(&str, &str, GroupId, u32); 48] = [
    ("MEX", "Mexico", 'A', 15),
    ("RSA", "South Africa", 'A', 61),
    ("KOR", "Korea Republic", 'A', 22),
    ("DEN", "Denmark", 'A', 21),
    ("CAN", "Canada", 'B', 27),
    ("ITA", "Italy", 'B', 12),
    ("QAT", "Qatar", 'B', 51),
    ("SUI", "Switzerland", 'B', 17),
    ("BRA", "Brazil", 'C', 5),
    ("MAR", "Morocco", 'C', 11),
    ("HAI", "Haiti", 'C', 84),
    ("SCO", "Scotland", 'C', 36),
    ("USA", "United States", 'D', 14),
    ("PAR", "Paraguay", 'D', 39),
    ("AUS", "Australia", 'D', 26),
    ("TUR", "Türkiye", 'D', 25),
    ("GER", "Germany", 'E', 9),
    ("CUW", "Curaçao", 'E', 82),
    ("CIV", "Côte d'Ivoire", 'E', 42),
    ("ECU", "Ecuador", 'E', 23),
    ("NED", "Netherlands", 'F', 7),
    ("JPN", "Japan", 'F', 18),
    ("POL", "Poland", 'F', 31),
    ("TUN", "Tunisia", 'F', 40),
    ("BEL", "Belgium", 'G', 8),
    ("EGY", "Egypt", 'G', 34),
    ("IRN", "Iran", 'G', 20),
    ("NZL", "New Zealand", 'G', 86),
    ("ESP", "Spain", 'H', 1),
    ("CPV", "Cape Verde", 'H', 68),
    ("KSA", "Saudi Arabia", 'H', 60),
    ("URU", "Uruguay", 'H', 16),
    ("FRA", "France", 'I', 3),
    ("SEN", "Senegal", 'I', 19),
    ("IRQ", "Iraq", 'I', 58),
    ("NOR", "Norway", 'I', 29),
    ("ARG", "Argentina", 'J', 2),
    ("ALG", "Algeria", 'J', 35),
    ("AUT", "Austria", 'J', 24),
    ("JOR", "Jordan", 'J', 66),
    ("POR", "Portugal", 'K', 6),
    ("COD", "DR Congo", 'K', 56),
    ("UZB", "Uzbekistan", 'K', 50),
    ("COL", "Colombia", 'K', 13),
    ("ENG", "England", 'L', 4),
    ("CRO", "Croatia", 'L', 10),
    ("GHA", "Ghana", 'L', 73),
    ("PAN", "Panama", 'L', 30),
];

/// Round-robin pairings per matchday, as indices into a group's roster order.
const MATCHDAY_PAIRS: [[(usize, usize); 2]; 3] = [[(0, 1), (2, 3)], [(0, 2), (3, 1)], [(3, 0), (1, 2)]];

/// The built-in 48-team roster.
pub fn default_teams() -> Vec<Team> {
    DEFAULT_ROSTER
        .iter()
        .map(|&(code, name, group, ranking)| Team::new(code, name, group, ranking))
        .collect()
}

#[derive(Deserialize)]
struct TeamRow {
    code: String,
    name: String,
    group: String,
    ranking: u32,
}

/// Read a roster CSV with header `code,name,group,ranking`.
pub fn parse_teams_csv<R: std::io::Read>(reader: R) -> Result<Vec<Team>, TournamentError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut teams = Vec::new();
    for row in rdr.deserialize() {
        let row: TeamRow = row?;
        let mut letters = row.group.chars();
        let group = match (letters.next(), letters.next()) {
            (Some(g), None) => g.to_ascii_uppercase(),
            _ => {
                return Err(TournamentError::InvalidRoster(format!(
                    "team {} has group '{}'",
                    row.code, row.group
                )))
            }
        };
        teams.push(Team::new(row.code, row.name, group, row.ranking));
    }
    validate_roster(&teams)?;
    Ok(teams)
}

/// Twelve groups `A`..`L` of exactly four teams, no duplicate codes.
pub fn validate_roster(teams: &[Team]) -> Result<(), TournamentError> {
    let mut codes = HashSet::new();
    for t in teams {
        if t.id.is_empty() {
            return Err(TournamentError::InvalidRoster("empty team code".to_string()));
        }
        if !codes.insert(t.id.as_str()) {
            return Err(TournamentError::InvalidRoster(format!("duplicate team {}", t.id)));
        }
        if !is_group(t.group) {
            return Err(TournamentError::InvalidRoster(format!(
                "team {} has unknown group {}",
                t.id, t.group
            )));
        }
    }
    for g in GROUPS {
        let n = teams.iter().filter(|t| t.group == g).count();
        if n != GROUP_SIZE {
            return Err(TournamentError::InvalidRoster(format!(
                "group {} has {} teams, expected {}",
                g, n, GROUP_SIZE
            )));
        }
    }
    Ok(())
}

/// Generate all 104 matches.
///
/// Group matches get ids 1..=72, matchday by matchday and group by group within
/// a matchday. Knockout matches take their ids and slot codes from `structure`.
pub fn build_schedule(teams: &[Team], structure: &BracketStructure) -> Result<Vec<Match>, TournamentError> {
    validate_roster(teams)?;

    let mut matches = Vec::with_capacity(104);
    let mut next_id: MatchId = 1;
    for pairs in MATCHDAY_PAIRS {
        for g in GROUPS {
            let group: Vec<&Team> = teams.iter().filter(|t| t.group == g).collect();
            for (home, away) in pairs {
                matches.push(Match::group(next_id, g, group[home].id.clone(), group[away].id.clone()));
                next_id += 1;
            }
        }
    }

    for (id, feeders) in structure.fixtures() {
        if id < next_id {
            return Err(TournamentError::InvalidSchedule(format!(
                "knockout match {} overlaps the group stage",
                id
            )));
        }
        matches.push(Match::knockout(id, feeders.stage, feeders.home.clone(), feeders.away.clone()));
    }
    Ok(matches)
}

/// Tournament for a given roster with the standard knockout structure.
pub fn tournament_from_teams(teams: Vec<Team>) -> Result<Tournament, TournamentError> {
    let structure = BracketStructure::standard()?;
    let matches = build_schedule(&teams, &structure)?;
    log::info!(
        "Loaded tournament: {} teams, {} matches, {} knockout fixtures",
        teams.len(),
        matches.len(),
        structure.len()
    );
    Ok(Tournament::new(teams, matches, structure))
}

/// Tournament with the built-in roster.
pub fn standard_tournament() -> Result<Tournament, TournamentError> {
    tournament_from_teams(default_teams())
}
