//! Save stores and the periodic autosaver.
//!
//! Persistence never feeds back into the economy: a failed save is logged
//! and reported through [`SyncStatus`], and the game keeps running.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::engine::Economy;
use crate::error::{EconomyError, EconomyResult};
use crate::rng::RandomSource;
use crate::snapshot::{prefer_snapshot, Snapshot};

/// Ticks between autosaves.
pub const AUTOSAVE_INTERVAL_TICKS: u64 = 30;

/// Somewhere a [`Snapshot`] can be kept.
pub trait SaveStore {
    /// Persist `snapshot`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Any storage or encoding failure.
    fn save(&mut self, snapshot: &Snapshot) -> EconomyResult<()>;

    /// The stored snapshot, or `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Any storage or decoding failure.
    fn load(&mut self) -> EconomyResult<Option<Snapshot>>;
}

// =============================================================================
// Stores
// =============================================================================

/// In-memory store. Keeps the encoded JSON so loads go through the codec.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    json: Option<String>,
    saves: u64,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with raw JSON, e.g. a save from another client.
    #[must_use]
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            json: Some(json.into()),
            saves: 0,
        }
    }

    /// Raw JSON of the last save.
    #[must_use]
    pub fn json(&self) -> Option<&str> {
        self.json.as_deref()
    }

    /// Number of successful saves.
    #[must_use]
    pub fn saves(&self) -> u64 {
        self.saves
    }
}

impl SaveStore for MemoryStore {
    fn save(&mut self, snapshot: &Snapshot) -> EconomyResult<()> {
        self.json = Some(snapshot.to_json()?);
        self.saves += 1;
        Ok(())
    }

    fn load(&mut self) -> EconomyResult<Option<Snapshot>> {
        self.json.as_deref().map(Snapshot::from_json).transpose()
    }
}

/// One JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

impl SaveStore for JsonFileStore {
    /// Writes to a sibling `.tmp` file, then renames over the target.
    fn save(&mut self, snapshot: &Snapshot) -> EconomyResult<()> {
        let json = snapshot.to_json_pretty()?;
        let staging = self.staging_path();
        fs::write(&staging, json)?;
        fs::rename(&staging, &self.path)?;
        debug!(target: "economy.persist", path = %self.path.display(), "save written");
        Ok(())
    }

    fn load(&mut self) -> EconomyResult<Option<Snapshot>> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Snapshot::from_json(&json).map(Some),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

// =============================================================================
// Autosave
// =============================================================================

/// Last known state of the save pipeline, for the UI indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// Nothing saved yet this session.
    Offline,
    /// A save is in progress.
    Syncing,
    /// The last save succeeded.
    Saved,
    /// The last save failed.
    Error,
}

/// Saves every [`AUTOSAVE_INTERVAL_TICKS`] ticks.
#[derive(Debug, Clone)]
pub struct Autosaver {
    interval: u64,
    since_save: u64,
    status: SyncStatus,
    last_error: Option<String>,
    saves: u64,
}

impl Default for Autosaver {
    fn default() -> Self {
        Self::new(AUTOSAVE_INTERVAL_TICKS)
    }
}

impl Autosaver {
    /// Autosaver firing every `interval` ticks. Zero is treated as 1.
    #[must_use]
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            since_save: 0,
            status: SyncStatus::Offline,
            last_error: None,
            saves: 0,
        }
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> SyncStatus {
        self.status
    }

    /// Message of the most recent failure, cleared by the next success.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Successful saves this session.
    #[must_use]
    pub fn saves(&self) -> u64 {
        self.saves
    }

    /// Call once per tick; saves when the interval elapses.
    pub fn on_tick<R, C, S>(&mut self, economy: &Economy<R, C>, store: &mut S) -> SyncStatus
    where
        R: RandomSource,
        C: Clock,
        S: SaveStore + ?Sized,
    {
        self.since_save += 1;
        if self.since_save >= self.interval {
            self.save_now(economy, store)
        } else {
            self.status
        }
    }

    /// Save immediately and restart the interval.
    pub fn save_now<R, C, S>(&mut self, economy: &Economy<R, C>, store: &mut S) -> SyncStatus
    where
        R: RandomSource,
        C: Clock,
        S: SaveStore + ?Sized,
    {
        self.since_save = 0;
        self.status = SyncStatus::Syncing;
        match store.save(&economy.snapshot()) {
            Ok(()) => {
                self.status = SyncStatus::Saved;
                self.last_error = None;
                self.saves += 1;
                debug!(target: "economy.persist", tick = economy.ticks(), "autosaved");
            }
            Err(err) => {
                self.status = SyncStatus::Error;
                warn!(target: "economy.persist", tick = economy.ticks(), %err, "autosave failed");
                self.last_error = Some(err.to_string());
            }
        }
        self.status
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Restore `economy` from `store`. Returns `false` if the store is empty.
///
/// # Errors
///
/// Propagates the store's load failure; the economy is untouched then.
pub fn load_into<R, C, S>(economy: &mut Economy<R, C>, store: &mut S) -> EconomyResult<bool>
where
    R: RandomSource,
    C: Clock,
    S: SaveStore + ?Sized,
{
    match store.load()? {
        Some(snapshot) => {
            economy.restore(&snapshot);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Load from both stores and restore whichever [`prefer_snapshot`] picks.
/// A store that fails to load is treated as empty.
///
/// # Errors
///
/// [`EconomyError::Persistence`] if both stores fail.
pub fn reconcile<R, C, L, S>(
    economy: &mut Economy<R, C>,
    local: &mut L,
    remote: &mut S,
) -> EconomyResult<bool>
where
    R: RandomSource,
    C: Clock,
    L: SaveStore + ?Sized,
    S: SaveStore + ?Sized,
{
    let local = local.load();
    let remote = remote.load();
    let chosen = match (local, remote) {
        (Err(l), Err(r)) => {
            return Err(EconomyError::Persistence(format!(
                "local: {l}; remote: {r}"
            )))
        }
        (Ok(Some(l)), Ok(Some(r))) => Some(prefer_snapshot(l, r)),
        (Ok(one), Err(err)) | (Err(err), Ok(one)) => {
            warn!(target: "economy.persist", %err, "one save store failed to load");
            one
        }
        (Ok(l), Ok(r)) => l.or(r),
    };
    match chosen {
        Some(snapshot) => {
            economy.restore(&snapshot);
            info!(target: "economy.persist", earnings = snapshot.total_earnings, "save reconciled");
            Ok(true)
        }
        None => Ok(false),
    }
}
