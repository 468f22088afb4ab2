//! In-memory match store with versioned documents.
//!
//! Writes are compare-and-swap on the document version. `update` wraps the
//! read-modify-write cycle and retries from a fresh snapshot on conflict, so
//! callers never apply a join against a stale roster.

use crate::models::{Match, MatchId};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Store settings, fixed at construction.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Extra attempts `update` makes after a version conflict.
    pub max_write_retries: u32,
    /// Matches not read or written for this long are removed by `purge_inactive`.
    pub inactivity_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_write_retries: 5,
            inactivity_timeout: Duration::from_secs(12 * 3600),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    NotFound(MatchId),
    /// The document changed since it was read.
    VersionConflict { id: MatchId, expected: u64, actual: u64 },
    LockPoisoned,
}

impl StoreError {
    /// Stable tag for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "not_found",
            StoreError::VersionConflict { .. } => "version_conflict",
            StoreError::LockPoisoned => "internal",
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(_) => write!(f, "No match"),
            StoreError::VersionConflict { expected, actual, .. } => write!(
                f,
                "Match was changed by someone else (expected version {}, found {})",
                expected, actual
            ),
            StoreError::LockPoisoned => write!(f, "lock error"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Failure of `MatchStore::update`: either the store or the caller's own check.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UpdateError<E> {
    Store(StoreError),
    Rejected(E),
}

impl<E: std::fmt::Display> std::fmt::Display for UpdateError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateError::Store(e) => e.fmt(f),
            UpdateError::Rejected(e) => e.fmt(f),
        }
    }
}

impl<E: std::fmt::Debug + std::fmt::Display> std::error::Error for UpdateError<E> {}

impl<E> From<StoreError> for UpdateError<E> {
    fn from(e: StoreError) -> Self {
        UpdateError::Store(e)
    }
}

/// A snapshot together with the version it was read at.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Versioned<T> {
    pub value: T,
    pub version: u64,
}

struct MatchEntry {
    game: Match,
    version: u64,
    last_activity: Instant,
}

pub struct MatchStore {
    entries: RwLock<HashMap<MatchId, MatchEntry>>,
    config: StoreConfig,
}

impl MatchStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Store a new match at version 1.
    pub fn insert(&self, game: Match) -> Result<Versioned<Match>, StoreError> {
        let mut g = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        let id = game.id;
        g.insert(
            id,
            MatchEntry {
                game: game.clone(),
                version: 1,
                last_activity: Instant::now(),
            },
        );
        log::debug!("Stored match {}", id);
        Ok(Versioned {
            value: game,
            version: 1,
        })
    }

    /// Snapshot of one match. Refreshes its activity time.
    pub fn read_one(&self, id: MatchId) -> Result<Versioned<Match>, StoreError> {
        let mut g = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        let entry = g.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        entry.last_activity = Instant::now();
        Ok(Versioned {
            value: entry.game.clone(),
            version: entry.version,
        })
    }

    /// Replace a match if it is still at `expected_version`. Returns the new version.
    pub fn write_one(&self, id: MatchId, game: Match, expected_version: u64) -> Result<u64, StoreError> {
        let mut g = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        let entry = g.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if entry.version != expected_version {
            return Err(StoreError::VersionConflict {
                id,
                expected: expected_version,
                actual: entry.version,
            });
        }
        entry.game = game;
        entry.version += 1;
        entry.last_activity = Instant::now();
        Ok(entry.version)
    }

    /// Read-modify-write with retry on version conflict.
    ///
    /// `f` runs against a fresh copy on every attempt, so it must not have side
    /// effects outside the match. An `Err` from `f` aborts immediately.
    pub fn update<T, E, F>(&self, id: MatchId, mut f: F) -> Result<(Versioned<Match>, T), UpdateError<E>>
    where
        F: FnMut(&mut Match) -> Result<T, E>,
    {
        let mut attempt = 0;
        loop {
            let snapshot = self.read_one(id)?;
            let mut game = snapshot.value;
            let out = f(&mut game).map_err(UpdateError::Rejected)?;
            match self.write_one(id, game.clone(), snapshot.version) {
                Ok(version) => {
                    return Ok((
                        Versioned {
                            value: game,
                            version,
                        },
                        out,
                    ))
                }
                Err(StoreError::VersionConflict { .. }) if attempt < self.config.max_write_retries => {
                    attempt += 1;
                    log::warn!(
                        "Version conflict on match {} (attempt {}), retrying from fresh read",
                        id,
                        attempt
                    );
                }
                Err(e) => return Err(UpdateError::Store(e)),
            }
        }
    }

    pub fn remove(&self, id: MatchId) -> Result<Match, StoreError> {
        let mut g = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        g.remove(&id)
            .map(|entry| entry.game)
            .ok_or(StoreError::NotFound(id))
    }

    /// All matches, soonest kickoff first.
    pub fn list(&self) -> Result<Vec<Versioned<Match>>, StoreError> {
        let g = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut games: Vec<Versioned<Match>> = g
            .values()
            .map(|entry| Versioned {
                value: entry.game.clone(),
                version: entry.version,
            })
            .collect();
        games.sort_by_key(|v| (v.value.settings.kickoff, v.value.created_at));
        Ok(games)
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let g = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(g.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Drop matches idle longer than the configured timeout. Returns how many were removed.
    pub fn purge_inactive(&self) -> Result<usize, StoreError> {
        self.purge_idle_for(self.config.inactivity_timeout)
    }

    /// Drop matches idle for at least `idle`.
    pub fn purge_idle_for(&self, idle: Duration) -> Result<usize, StoreError> {
        let mut g = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        let before = g.len();
        g.retain(|_, entry| entry.last_activity.elapsed() < idle);
        Ok(before - g.len())
    }
}
