//! KickHub: friendly football match organizer. Library with models, roster logic and the match store.

pub mod config;
pub mod export;
pub mod logic;
pub mod models;
pub mod store;

pub use config::AppConfig;
pub use export::team_sheet_csv;
pub use logic::{
    assign_match_position, assign_position, generate_teams, join, join_match,
    record_result, resolve_candidate_name, split, split_with_rng, AssignError, JoinError,
    ResultError, SplitError,
};
pub use models::{
    initials_of, ConfigError, Match, MatchConfig, MatchFormat, MatchId, MatchResult,
    MatchSettings, MatchStatus, PitchSlot, Player, PlayerStats, Position, Roster, RosterError,
    RosterState, Score, Side, TeamSplit,
};
pub use store::{MatchStore, StoreConfig, StoreError, UpdateError, Versioned};
