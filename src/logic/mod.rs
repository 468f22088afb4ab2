//! Roster business logic: joining, position assignment, the team split and results.
//!
//! Everything here is synchronous and free of I/O; `store::MatchStore` handles persistence.

mod join;
mod positions;
mod results;
mod teams;

pub use join::{join, join_match, resolve_candidate_name, JoinError};
pub use positions::{assign_match_position, assign_position, AssignError};
pub use results::{record_result, ResultError};
pub use teams::{generate_teams, split, split_with_rng, SplitError};
