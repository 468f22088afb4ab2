//! Roster: the authoritative player list of one match plus its configuration.
//!
//! Read access is public; mutation goes through `logic::join` and
//! `logic::assign_position` so the invariants hold:
//! - `players.len() <= config.capacity`
//! - display names are unique
//! - with manual positions, no two players share a position

use crate::models::format::Position;
use crate::models::player::Player;
use crate::models::settings::{validate_capacity, ConfigError, MatchConfig};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// A stored roster that breaks one of the roster invariants.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RosterError {
    Config(ConfigError),
    OverCapacity { players: usize, capacity: usize },
    EmptyName,
    DuplicatePlayer(String),
    DuplicatePosition(Position),
    PositionNotInFormat(Position),
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::Config(e) => e.fmt(f),
            RosterError::OverCapacity { players, capacity } => {
                write!(f, "{} players exceed the capacity of {}", players, capacity)
            }
            RosterError::EmptyName => write!(f, "Player with an empty name"),
            RosterError::DuplicatePlayer(name) => write!(f, "Player {} listed twice", name),
            RosterError::DuplicatePosition(p) => write!(f, "Position {} held twice", p),
            RosterError::PositionNotInFormat(p) => write!(f, "Position {} is not on the pitch", p),
        }
    }
}

impl std::error::Error for RosterError {}

/// Observable roster state. `Open -> Full` happens on the last successful join.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterState {
    Open,
    Full,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Roster {
    config: MatchConfig,
    /// Join order.
    players: Vec<Player>,
}

impl Roster {
    /// Empty roster for the given config.
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            players: Vec::new(),
        }
    }

    /// Rebuild a roster from stored parts, checking every invariant.
    pub fn from_parts(config: MatchConfig, players: Vec<Player>) -> Result<Self, RosterError> {
        validate_capacity(config.capacity).map_err(RosterError::Config)?;
        if players.len() > config.capacity {
            return Err(RosterError::OverCapacity {
                players: players.len(),
                capacity: config.capacity,
            });
        }
        let mut names = HashSet::new();
        let mut positions = HashSet::new();
        for p in &players {
            if p.display_name.trim().is_empty() {
                return Err(RosterError::EmptyName);
            }
            if !names.insert(p.display_name.as_str()) {
                return Err(RosterError::DuplicatePlayer(p.display_name.clone()));
            }
            if config.auto_assign_positions {
                continue;
            }
            if let Some(position) = p.position {
                if !config.format.has_position(position) {
                    return Err(RosterError::PositionNotInFormat(position));
                }
                if !positions.insert(position) {
                    return Err(RosterError::DuplicatePosition(position));
                }
            }
        }
        Ok(Self { config, players })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Players in join order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.config.capacity
    }

    pub fn remaining_slots(&self) -> usize {
        self.config.capacity.saturating_sub(self.players.len())
    }

    pub fn state(&self) -> RosterState {
        if self.is_full() {
            RosterState::Full
        } else {
            RosterState::Open
        }
    }

    /// Exact, case-sensitive name lookup.
    pub fn player(&self, display_name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.display_name == display_name)
    }

    pub fn contains(&self, display_name: &str) -> bool {
        self.player(display_name).is_some()
    }

    /// Player currently holding `position`, if any.
    pub fn position_holder(&self, position: Position) -> Option<&Player> {
        self.players.iter().find(|p| p.position == Some(position))
    }

    pub(crate) fn player_mut(&mut self, display_name: &str) -> Option<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.display_name == display_name)
    }

    pub(crate) fn push(&mut self, player: Player) {
        self.players.push(player);
    }

    /// Replace the config after an edit.
    ///
    /// Fails if the new capacity cannot hold the current players. Positions are then
    /// brought in line with the new config:
    /// - auto positions: re-dealt from the new format's layout in join order
    /// - auto to manual: cleared, since auto-assigned ones may repeat
    /// - manual to manual: positions missing from the new layout are cleared
    pub fn reconfigure(&mut self, config: MatchConfig) -> Result<(), ConfigError> {
        if config.capacity < self.players.len() {
            return Err(ConfigError::CapacityBelowRoster {
                capacity: config.capacity,
                players: self.players.len(),
            });
        }
        let format = config.format;
        if config.auto_assign_positions {
            for (i, p) in self.players.iter_mut().enumerate() {
                p.position = Some(format.auto_position(i));
            }
        } else if self.config.auto_assign_positions {
            for p in &mut self.players {
                p.position = None;
            }
        } else {
            for p in &mut self.players {
                if p.position.is_some_and(|pos| !format.has_position(pos)) {
                    p.position = None;
                }
            }
        }
        self.config = config;
        Ok(())
    }
}

impl<'de> Deserialize<'de> for Roster {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Stored {
            config: MatchConfig,
            players: Vec<Player>,
        }

        let Stored { config, players } = Stored::deserialize(deserializer)?;
        Roster::from_parts(config, players).map_err(serde::de::Error::custom)
    }
}
