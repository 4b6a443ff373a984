//! Team and group identifiers.

use serde::{Deserialize, Serialize};

/// Stable team code (e.g. "USA"), used in matches, predictions and lookups.
pub type TeamId = String;

/// Group letter, `A` through `L`.
pub type GroupId = char;

/// The twelve groups in their fixed order.
pub const GROUPS: [GroupId; 12] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L'];

/// Teams per group.
pub const GROUP_SIZE: usize = 4;

/// A team in the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub group: GroupId,
    /// World ranking; only the auto-fill heuristic reads it (lower is stronger).
    pub ranking: u32,
}

impl Team {
    /// Create a team. The code is trimmed and upper-cased.
    pub fn new(id: impl Into<String>, name: impl Into<String>, group: GroupId, ranking: u32) -> Self {
        Self {
            id: id.into().trim().to_ascii_uppercase(),
            name: name.into(),
            group,
            ranking,
        }
    }
}

/// True if `group` is one of the twelve tournament groups.
pub fn is_group(group: GroupId) -> bool {
    GROUPS.contains(&group)
}
