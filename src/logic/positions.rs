//! Position assignor: one player per position when positions are chosen by hand.

use crate::models::{Match, MatchFormat, Position, Roster};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AssignError {
    /// No player with this name on the roster.
    UnknownPlayer(String),
    /// Another player already holds the position.
    PositionTaken { position: Position, holder: String },
    /// The format's pitch layout has no such position.
    PositionNotInFormat { position: Position, format: MatchFormat },
}

impl AssignError {
    /// Stable tag for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            AssignError::UnknownPlayer(_) => "unknown_player",
            AssignError::PositionTaken { .. } => "position_taken",
            AssignError::PositionNotInFormat { .. } => "position_not_in_format",
        }
    }
}

impl std::fmt::Display for AssignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignError::UnknownPlayer(name) => write!(f, "{} is not in this game", name),
            AssignError::PositionTaken { position, holder } => {
                write!(f, "Position {} is already taken by {}", position, holder)
            }
            AssignError::PositionNotInFormat { position, format } => {
                write!(f, "There is no {} position in {}", position, format)
            }
        }
    }
}

impl std::error::Error for AssignError {}

/// Move `player_name` to `position`.
///
/// With `auto_assign_positions` positions are cosmetic and neither the layout nor the
/// uniqueness check applies.
pub fn assign_position(
    roster: &mut Roster,
    player_name: &str,
    position: Position,
) -> Result<(), AssignError> {
    if !roster.contains(player_name) {
        return Err(AssignError::UnknownPlayer(player_name.to_string()));
    }
    let config = roster.config();
    if !config.auto_assign_positions {
        if !config.format.has_position(position) {
            return Err(AssignError::PositionNotInFormat {
                position,
                format: config.format,
            });
        }
        if let Some(holder) = roster.position_holder(position) {
            if holder.display_name != player_name {
                return Err(AssignError::PositionTaken {
                    position,
                    holder: holder.display_name.clone(),
                });
            }
        }
    }
    if let Some(p) = roster.player_mut(player_name) {
        p.position = Some(position);
    }
    Ok(())
}

/// Assign a position on a match and mirror it into the drawn teams, if any.
pub fn assign_match_position(
    game: &mut Match,
    player_name: &str,
    position: Position,
) -> Result<(), AssignError> {
    assign_position(&mut game.roster, player_name, position)?;
    if let Some(teams) = &mut game.teams {
        for p in teams
            .team_a
            .iter_mut()
            .chain(teams.team_b.iter_mut())
            .filter(|p| p.display_name == player_name)
        {
            p.position = Some(position);
        }
    }
    Ok(())
}
