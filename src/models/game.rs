//! Match document: settings, roster and the active team split.

use crate::models::result::{MatchResult, MatchStatus};
use crate::models::roster::{Roster, RosterState};
use crate::models::settings::{ConfigError, MatchConfig, MatchSettings};
use crate::models::team::TeamSplit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// One friendly match as stored by `MatchStore`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub settings: MatchSettings,
    pub roster: Roster,
    /// At most one active split; `None` until teams are generated.
    pub teams: Option<TeamSplit>,
    #[serde(default)]
    pub status: MatchStatus,
    /// Set once the score is recorded; re-recording replaces it.
    #[serde(default)]
    pub result: Option<MatchResult>,
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// New match with an empty roster.
    pub fn new(settings: MatchSettings, config: MatchConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            settings,
            roster: Roster::new(config),
            teams: None,
            status: MatchStatus::Upcoming,
            result: None,
            created_at: Utc::now(),
        }
    }

    pub fn state(&self) -> RosterState {
        self.roster.state()
    }

    /// Apply an edit from the match owner.
    ///
    /// A config change discards the current split; the roster must still fit.
    pub fn update_settings(
        &mut self,
        settings: MatchSettings,
        config: MatchConfig,
    ) -> Result<(), ConfigError> {
        if &config != self.roster.config() {
            self.roster.reconfigure(config)?;
            self.teams = None;
        }
        self.settings = settings;
        Ok(())
    }
}
