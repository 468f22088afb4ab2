//! Player data structure and initials derivation.

use crate::models::format::Position;
use serde::{Deserialize, Serialize};

/// A confirmed player on a match roster. Identified by `display_name` within one roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub display_name: String,
    /// Shown on the pitch marker instead of the full name.
    pub initials: String,
    pub position: Option<Position>,
}

impl Player {
    /// Create a player with no position. Initials are derived from the name.
    pub fn new(display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        let initials = initials_of(&display_name);
        Self {
            display_name,
            initials,
            position: None,
        }
    }

    /// Same as `new` with a position already set.
    pub fn with_position(display_name: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            position,
            ..Self::new(display_name)
        }
    }
}

/// First letter of each whitespace-separated word, uppercased ("Jo   smith" -> "JS").
pub fn initials_of(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}
