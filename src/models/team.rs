//! The two-team partition of a full roster.

use crate::models::player::Player;
use serde::{Deserialize, Serialize};

/// Which side of the split a player ended up on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::A => "Team A",
            Side::B => "Team B",
        }
    }
}

/// Two equal, disjoint teams whose union is the roster at split time.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamSplit {
    pub team_a: Vec<Player>,
    pub team_b: Vec<Player>,
}

impl TeamSplit {
    pub fn team(&self, side: Side) -> &[Player] {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    /// Side a player was put on, if they are in the split.
    pub fn side_of(&self, display_name: &str) -> Option<Side> {
        if self.team_a.iter().any(|p| p.display_name == display_name) {
            Some(Side::A)
        } else if self.team_b.iter().any(|p| p.display_name == display_name) {
            Some(Side::B)
        } else {
            None
        }
    }
}
