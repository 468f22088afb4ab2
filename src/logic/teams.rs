//! Team splitter: random, unweighted partition of a full roster into two teams.

use crate::models::{Match, Roster, TeamSplit};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SplitError {
    /// Teams can only be drawn once every slot is taken.
    RosterNotFull { players: usize, capacity: usize },
}

impl SplitError {
    /// Stable tag for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            SplitError::RosterNotFull { .. } => "roster_not_full",
        }
    }
}

impl std::fmt::Display for SplitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitError::RosterNotFull { players, capacity } => write!(
                f,
                "Need {} players to generate teams ({} joined)",
                capacity, players
            ),
        }
    }
}

impl std::error::Error for SplitError {}

/// Split a full roster using the thread-local RNG. Each call may give a different split.
pub fn split(roster: &Roster) -> Result<TeamSplit, SplitError> {
    split_with_rng(roster, &mut rand::thread_rng())
}

/// Split with a caller-supplied RNG.
///
/// `SliceRandom::shuffle` is a Fisher-Yates shuffle, so every permutation is equally
/// likely. The first `capacity / 2` players form team A, the rest team B.
pub fn split_with_rng<R: Rng + ?Sized>(roster: &Roster, rng: &mut R) -> Result<TeamSplit, SplitError> {
    let capacity = roster.config().capacity;
    if roster.len() != capacity {
        return Err(SplitError::RosterNotFull {
            players: roster.len(),
            capacity,
        });
    }
    let mut shuffled = roster.players().to_vec();
    shuffled.shuffle(rng);
    let team_b = shuffled.split_off(capacity / 2);
    Ok(TeamSplit {
        team_a: shuffled,
        team_b,
    })
}

/// Draw teams for a match, replacing any previous split.
pub fn generate_teams(game: &mut Match) -> Result<&TeamSplit, SplitError> {
    let teams = split(&game.roster)?;
    Ok(game.teams.insert(teams))
}
