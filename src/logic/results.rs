//! Recording the final score and player statistics of a match.

use crate::models::{Match, MatchResult, MatchStatus, PlayerStats, Score};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResultError {
    /// Stats were sent for someone not on the roster.
    UnknownPlayer(String),
}

impl ResultError {
    /// Stable tag for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            ResultError::UnknownPlayer(_) => "unknown_player",
        }
    }
}

impl std::fmt::Display for ResultError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultError::UnknownPlayer(name) => write!(f, "{} is not in this game", name),
        }
    }
}

impl std::error::Error for ResultError {}

/// Store the score and per-player stats and mark the match completed.
///
/// Every stats entry must name a roster player; otherwise nothing is changed.
/// Recording again replaces the previous result.
pub fn record_result(
    game: &mut Match,
    score: Score,
    player_stats: BTreeMap<String, PlayerStats>,
) -> Result<(), ResultError> {
    if let Some(name) = player_stats.keys().find(|name| !game.roster.contains(name)) {
        return Err(ResultError::UnknownPlayer(name.clone()));
    }
    game.result = Some(MatchResult {
        score,
        player_stats,
    });
    game.status = MatchStatus::Completed;
    Ok(())
}
