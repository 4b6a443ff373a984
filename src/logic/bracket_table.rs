//! Knockout structure: which slots feed each of matches 73..=104.

use crate::models::{
    GroupId, MatchId, SlotCode, Stage, TournamentError, FIRST_KNOCKOUT_MATCH, LAST_KNOCKOUT_MATCH,
};
use std::collections::BTreeMap;

/// Feeder codes for every knockout match, in id order.
///
/// A `W`/`L` code always points at a lower match id, so resolving in ascending
/// id order never needs a match that has not been resolved yet.
pub const KNOCKOUT_FIXTURES: [(MatchId, Stage, &str, &str); 32] = [
    // Round of 32
    (73, Stage::RoundOf32, "2A", "2B"),
    (74, Stage::RoundOf32, "1E", "3ABCDF"),
    (75, Stage::RoundOf32, "1F", "2C"),
    (76, Stage::RoundOf32, "1C", "2F"),
    (77, Stage::RoundOf32, "1I", "3CDFGH"),
    (78, Stage::RoundOf32, "2E", "2I"),
    (79, Stage::RoundOf32, "1A", "3CEFHI"),
    (80, Stage::RoundOf32, "1L", "3EHIJK"),
    (81, Stage::RoundOf32, "1D", "3BEFIJ"),
    (82, Stage::RoundOf32, "1G", "3AEHIJ"),
    (83, Stage::RoundOf32, "2K", "2L"),
    (84, Stage::RoundOf32, "1H", "2J"),
    (85, Stage::RoundOf32, "1B", "3EFGIJ"),
    (86, Stage::RoundOf32, "1J", "2H"),
    (87, Stage::RoundOf32, "1K", "3DEIJL"),
    (88, Stage::RoundOf32, "2D", "2G"),
    // Round of 16
    (89, Stage::RoundOf16, "W73", "W74"),
    (90, Stage::RoundOf16, "W75", "W76"),
    (91, Stage::RoundOf16, "W77", "W78"),
    (92, Stage::RoundOf16, "W79", "W80"),
    (93, Stage::RoundOf16, "W81", "W82"),
    (94, Stage::RoundOf16, "W83", "W84"),
    (95, Stage::RoundOf16, "W85", "W86"),
    (96, Stage::RoundOf16, "W87", "W88"),
    // Quarter-finals
    (97, Stage::QuarterFinal, "W89", "W90"),
    (98, Stage::QuarterFinal, "W91", "W92"),
    (99, Stage::QuarterFinal, "W93", "W94"),
    (100, Stage::QuarterFinal, "W95", "W96"),
    // Semi-finals
    (101, Stage::SemiFinal, "W97", "W98"),
    (102, Stage::SemiFinal, "W99", "W100"),
    // Third-place playoff and final
    (103, Stage::ThirdPlace, "L101", "L102"),
    (104, Stage::Final, "W101", "W102"),
];

/// Seeding preference for each Round-of-32 slot filled by a third-placed team.
pub const THIRD_PLACE_PRIORITY: [(MatchId, &[GroupId]); 8] = [
    (74, &['A', 'B', 'C', 'D', 'F']),
    (77, &['C', 'D', 'F', 'G', 'H']),
    (79, &['C', 'E', 'F', 'H', 'I']),
    (80, &['E', 'H', 'I', 'J', 'K']),
    (81, &['B', 'E', 'F', 'I', 'J']),
    (82, &['A', 'E', 'H', 'I', 'J']),
    (85, &['E', 'F', 'G', 'I', 'J']),
    (87, &['D', 'E', 'I', 'J', 'L']),
];

/// The two feeder slots of one knockout match.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeederPair {
    pub stage: Stage,
    pub home: SlotCode,
    pub away: SlotCode,
}

/// Parsed knockout structure. Built once, then shared by every resolution pass.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BracketStructure {
    fixtures: BTreeMap<MatchId, FeederPair>,
    third_place_priority: BTreeMap<MatchId, Vec<GroupId>>,
}

impl BracketStructure {
    /// The standard 32-match knockout tree.
    pub fn standard() -> Result<Self, TournamentError> {
        Self::from_table(&KNOCKOUT_FIXTURES, &THIRD_PLACE_PRIORITY)
    }

    /// Parse and check a structure table.
    ///
    /// Rejects malformed codes, ids outside 73..=104, duplicate ids, and any
    /// `W`/`L` code that does not point at an earlier match of the same table.
    pub fn from_table(
        rows: &[(MatchId, Stage, &str, &str)],
        priorities: &[(MatchId, &[GroupId])],
    ) -> Result<Self, TournamentError> {
        let mut fixtures = BTreeMap::new();
        for &(id, stage, home, away) in rows {
            if !(FIRST_KNOCKOUT_MATCH..=LAST_KNOCKOUT_MATCH).contains(&id) || !stage.is_knockout() {
                return Err(TournamentError::InvalidSchedule(format!(
                    "match {} is not a knockout fixture",
                    id
                )));
            }
            let pair = FeederPair {
                stage,
                home: home.parse()?,
                away: away.parse()?,
            };
            for code in [&pair.home, &pair.away] {
                if let Some(feeder) = code.feeder_match() {
                    if feeder >= id || !fixtures.contains_key(&feeder) {
                        return Err(TournamentError::InvalidSchedule(format!(
                            "match {} depends on {} which is not an earlier knockout match",
                            id, code
                        )));
                    }
                }
            }
            if fixtures.insert(id, pair).is_some() {
                return Err(TournamentError::InvalidSchedule(format!("match {} listed twice", id)));
            }
        }

        let third_place_priority = priorities
            .iter()
            .map(|&(id, groups)| (id, groups.to_vec()))
            .collect();

        Ok(Self {
            fixtures,
            third_place_priority,
        })
    }

    pub fn fixture(&self, id: MatchId) -> Option<&FeederPair> {
        self.fixtures.get(&id)
    }

    /// Fixtures in ascending id order.
    pub fn fixtures(&self) -> impl Iterator<Item = (MatchId, &FeederPair)> {
        self.fixtures.iter().map(|(id, pair)| (*id, pair))
    }

    /// Preferred groups for a third-place slot in this match, if it has one.
    pub fn third_place_priority(&self, id: MatchId) -> Option<&[GroupId]> {
        self.third_place_priority.get(&id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}
