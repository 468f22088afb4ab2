//! Data structures for KickHub: formats, players, rosters, team splits and matches.

mod format;
mod game;
mod player;
mod result;
mod roster;
mod settings;
mod team;

pub use format::{MatchFormat, PitchSlot, Position, UnknownPosition};
pub use game::{Match, MatchId};
pub use player::{initials_of, Player};
pub use result::{MatchResult, MatchStatus, PlayerStats, Score};
pub use roster::{Roster, RosterError, RosterState};
pub use settings::{validate_capacity, ConfigError, MatchConfig, MatchSettings};
pub use team::{Side, TeamSplit};
