//! Final score and per-player statistics of a played match.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether the match has been played.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Upcoming,
    Completed,
}

/// Goals scored by each side of the split.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub team_a: u32,
    pub team_b: u32,
}

/// What one player did in one match. Missing fields read as zero.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub goals: u32,
    pub assists: u32,
    pub clean_sheets: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: Score,
    /// Keyed by display name; players without an entry recorded nothing.
    pub player_stats: BTreeMap<String, PlayerStats>,
}

impl MatchResult {
    pub fn stats_for(&self, display_name: &str) -> PlayerStats {
        self.player_stats
            .get(display_name)
            .copied()
            .unwrap_or_default()
    }
}
