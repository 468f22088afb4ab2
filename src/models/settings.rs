//! Match configuration (roster rules) and match settings (where, when, who).

use crate::models::format::MatchFormat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Errors raised when building or editing a match configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// Capacity must be even and at least 2 so the roster splits into two equal teams.
    InvalidCapacity(usize),
    /// The new capacity is smaller than the number of players already joined.
    CapacityBelowRoster { capacity: usize, players: usize },
}

impl ConfigError {
    /// Stable tag for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::InvalidCapacity(_) => "invalid_capacity",
            ConfigError::CapacityBelowRoster { .. } => "capacity_below_roster",
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidCapacity(c) => {
                write!(f, "Capacity must be an even number of at least 2 (got {})", c)
            }
            ConfigError::CapacityBelowRoster { capacity, players } => write!(
                f,
                "Capacity {} is below the {} players already joined",
                capacity, players
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Roster rules for one match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub format: MatchFormat,
    /// Maximum roster size. Always even and >= 2.
    pub capacity: usize,
    pub allow_substitutes: bool,
    /// Only meaningful when `allow_substitutes`; kept at 0 otherwise.
    pub substitute_limit: u32,
    /// When true, positions are handed out in join order and never enforced.
    pub auto_assign_positions: bool,
}

impl MatchConfig {
    /// Config for `format` with its default capacity, no substitutes, manual positions.
    pub fn new(format: MatchFormat) -> Self {
        Self {
            format,
            capacity: format.default_capacity(),
            allow_substitutes: false,
            substitute_limit: 0,
            auto_assign_positions: false,
        }
    }

    /// Build a config from loose input, falling back to the format's capacity.
    pub fn from_parts(
        format: MatchFormat,
        capacity: Option<usize>,
        allow_substitutes: bool,
        substitute_limit: u32,
        auto_assign_positions: bool,
    ) -> Result<Self, ConfigError> {
        let config = Self::new(format)
            .with_capacity(capacity.unwrap_or_else(|| format.default_capacity()))?
            .with_substitutes(allow_substitutes, substitute_limit)
            .with_auto_assign_positions(auto_assign_positions);
        Ok(config)
    }

    /// Override the capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Result<Self, ConfigError> {
        validate_capacity(capacity)?;
        self.capacity = capacity;
        Ok(self)
    }

    pub fn with_substitutes(mut self, allow: bool, limit: u32) -> Self {
        self.allow_substitutes = allow;
        self.substitute_limit = if allow { limit } else { 0 };
        self
    }

    pub fn with_auto_assign_positions(mut self, auto: bool) -> Self {
        self.auto_assign_positions = auto;
        self
    }

    /// Players per team once the roster is split.
    pub fn team_size(&self) -> usize {
        self.capacity / 2
    }
}

/// Capacity must allow an equal two-team split.
pub fn validate_capacity(capacity: usize) -> Result<(), ConfigError> {
    if capacity < 2 || capacity % 2 != 0 {
        return Err(ConfigError::InvalidCapacity(capacity));
    }
    Ok(())
}

/// Descriptive match details shown on the match page.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchSettings {
    pub location: String,
    pub kickoff: DateTime<Utc>,
    /// Display name of whoever created the match.
    pub owner_name: String,
}
