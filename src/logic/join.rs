//! Join policy: admit or reject a candidate into a roster.

use crate::logic::teams::split;
use crate::models::{Match, MatchFormat, Player, Position, Roster};

/// Why a join request was rejected. The roster is left unchanged in every case.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum JoinError {
    /// Name is empty after trimming.
    EmptyName,
    /// A player with exactly this name is already on the roster.
    DuplicatePlayer(String),
    /// Roster already holds `capacity` players.
    RosterFull { capacity: usize },
    /// Requested position is held by another player (manual positions only).
    PositionTaken { position: Position, holder: String },
    /// The format's pitch layout has no such position (manual positions only).
    PositionNotInFormat { position: Position, format: MatchFormat },
}

impl JoinError {
    /// Stable tag for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            JoinError::EmptyName => "empty_name",
            JoinError::DuplicatePlayer(_) => "duplicate_player",
            JoinError::RosterFull { .. } => "roster_full",
            JoinError::PositionTaken { .. } => "position_taken",
            JoinError::PositionNotInFormat { .. } => "position_not_in_format",
        }
    }
}

impl std::fmt::Display for JoinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinError::EmptyName => write!(f, "Please enter your name to join the game"),
            JoinError::DuplicatePlayer(name) => write!(f, "{} has already joined this game", name),
            JoinError::RosterFull { capacity } => {
                write!(f, "This game is full ({} players)", capacity)
            }
            JoinError::PositionTaken { position, holder } => {
                write!(f, "Position {} is already taken by {}", position, holder)
            }
            JoinError::PositionNotInFormat { position, format } => {
                write!(f, "There is no {} position in {}", position, format)
            }
        }
    }
}

impl std::error::Error for JoinError {}

/// Add a player to the roster.
///
/// Checks, in order: non-empty name, unique name, free capacity, position on the
/// format's layout, free position.
/// With `auto_assign_positions` the requested position is ignored and the next
/// slot of the format's layout is used instead.
pub fn join(
    roster: &mut Roster,
    candidate_name: &str,
    requested_position: Option<Position>,
) -> Result<Player, JoinError> {
    let name = candidate_name.trim();
    if name.is_empty() {
        return Err(JoinError::EmptyName);
    }
    if roster.contains(name) {
        return Err(JoinError::DuplicatePlayer(name.to_string()));
    }
    let config = roster.config();
    if roster.len() >= config.capacity {
        return Err(JoinError::RosterFull {
            capacity: config.capacity,
        });
    }

    let position = if config.auto_assign_positions {
        Some(config.format.auto_position(roster.len()))
    } else {
        if let Some(position) = requested_position {
            if !config.format.has_position(position) {
                return Err(JoinError::PositionNotInFormat {
                    position,
                    format: config.format,
                });
            }
            if let Some(holder) = roster.position_holder(position) {
                return Err(JoinError::PositionTaken {
                    position,
                    holder: holder.display_name.clone(),
                });
            }
        }
        requested_position
    };

    let player = Player::with_position(name, position);
    roster.push(player.clone());
    Ok(player)
}

/// Pick the joining name: the signed-in display name wins over a typed guest name.
pub fn resolve_candidate_name(identity: Option<&str>, guest_name: Option<&str>) -> Option<String> {
    identity
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .or_else(|| guest_name.map(str::trim).filter(|n| !n.is_empty()))
        .map(str::to_string)
}

/// Join a match. The join that fills the roster also draws the teams if none exist yet.
pub fn join_match(
    game: &mut Match,
    candidate_name: &str,
    requested_position: Option<Position>,
) -> Result<Player, JoinError> {
    let player = join(&mut game.roster, candidate_name, requested_position)?;
    if game.teams.is_none() {
        if let Ok(teams) = split(&game.roster) {
            game.teams = Some(teams);
        }
    }
    Ok(player)
}
