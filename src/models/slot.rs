//! Symbolic slot codes for knockout participants that are not yet known.

use crate::models::game::MatchId;
use crate::models::team::{is_group, GroupId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A parsed slot code.
///
/// - `1A` / `2A`: winner / runner-up of group A.
/// - `3ABCDF`: a third-placed team from one of the listed groups, in priority order.
/// - `W73` / `L73`: winner / loser of match 73.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SlotCode {
    GroupRank { rank: u8, group: GroupId },
    ThirdPlace { groups: Vec<GroupId> },
    Winner(MatchId),
    Loser(MatchId),
}

impl SlotCode {
    /// The knockout match this code feeds from, if any.
    pub fn feeder_match(&self) -> Option<MatchId> {
        match self {
            SlotCode::Winner(id) | SlotCode::Loser(id) => Some(*id),
            _ => None,
        }
    }
}

/// Why a slot code string was rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlotCodeError {
    pub code: String,
}

impl fmt::Display for SlotCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Malformed slot code '{}'", self.code)
    }
}

impl std::error::Error for SlotCodeError {}

impl FromStr for SlotCode {
    type Err = SlotCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || SlotCodeError { code: s.to_string() };
        let mut chars = s.chars();
        let head = chars.next().ok_or_else(err)?;
        let rest = chars.as_str();

        match head {
            '1' | '2' => {
                let mut rest_chars = rest.chars();
                let group = rest_chars.next().ok_or_else(err)?;
                if rest_chars.next().is_some() || !is_group(group) {
                    return Err(err());
                }
                Ok(SlotCode::GroupRank {
                    rank: if head == '1' { 1 } else { 2 },
                    group,
                })
            }
            '3' => {
                let groups: Vec<GroupId> = rest.chars().collect();
                if groups.is_empty() || !groups.iter().all(|g| is_group(*g)) {
                    return Err(err());
                }
                let mut seen = groups.clone();
                seen.sort_unstable();
                seen.dedup();
                if seen.len() != groups.len() {
                    return Err(err());
                }
                Ok(SlotCode::ThirdPlace { groups })
            }
            'W' | 'L' => {
                if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(err());
                }
                let id: MatchId = rest.parse().map_err(|_| err())?;
                Ok(if head == 'W' {
                    SlotCode::Winner(id)
                } else {
                    SlotCode::Loser(id)
                })
            }
            _ => Err(err()),
        }
    }
}

impl fmt::Display for SlotCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotCode::GroupRank { rank, group } => write!(f, "{}{}", rank, group),
            SlotCode::ThirdPlace { groups } => {
                write!(f, "3")?;
                for g in groups {
                    write!(f, "{}", g)?;
                }
                Ok(())
            }
            SlotCode::Winner(id) => write!(f, "W{}", id),
            SlotCode::Loser(id) => write!(f, "L{}", id),
        }
    }
}

impl TryFrom<String> for SlotCode {
    type Error = SlotCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotCode> for String {
    fn from(code: SlotCode) -> Self {
        code.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_three_grammars() {
        assert_eq!("1A".parse(), Ok(SlotCode::GroupRank { rank: 1, group: 'A' }));
        assert_eq!("2L".parse(), Ok(SlotCode::GroupRank { rank: 2, group: 'L' }));
        assert_eq!(
            "3ABCDF".parse(),
            Ok(SlotCode::ThirdPlace {
                groups: vec!['A', 'B', 'C', 'D', 'F']
            })
        );
        assert_eq!("W73".parse(), Ok(SlotCode::Winner(73)));
        assert_eq!("L101".parse(), Ok(SlotCode::Loser(101)));
    }

    #[test]
    fn rejects_malformed_codes() {
        for bad in ["", "1", "4A", "1M", "1AB", "3", "3AA", "3AZ", "W", "W7x", "L-1", "X73", "w73"] {
            assert!(bad.parse::<SlotCode>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn display_is_canonical() {
        for code in ["1A", "2K", "3EFGIJ", "W89", "L102"] {
            assert_eq!(code.parse::<SlotCode>().unwrap().to_string(), code);
        }
    }

    #[test]
    fn serde_uses_string_form() {
        let json = serde_json::to_string(&SlotCode::Winner(97)).unwrap();
        assert_eq!(json, "\"W97\"");
        let back: SlotCode = serde_json::from_str("\"3AEHIJ\"").unwrap();
        assert_eq!(back.to_string(), "3AEHIJ");
        assert!(serde_json::from_str::<SlotCode>("\"Q1\"").is_err());
    }
}
