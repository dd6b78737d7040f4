//! Artifact cache - mediates between the session tier and the durable tier
//!
//! Writes go through to disk (`write_both`), reads come through from disk
//! only when the session has nothing usable (`load_into_session`). The
//! aggregate queries all judge a session entry with
//! [`artifact::is_valid`](crate::cache::artifact::is_valid).

use crate::cache::artifact::{is_valid, Artifact};
use crate::cache::catalog::{self, Stage, STAGES};
use crate::cache::durable::DurableStore;
use crate::cache::session::{MemorySession, SessionStore};
use crate::config::schema::CacheConfig;
use crate::error::{StageCacheError, StageCacheResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of loading one stage into the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOutcome {
    /// Session already held a usable value; disk was not touched
    AlreadyLoaded,
    /// Value read from disk and installed in the session
    Restored,
    /// Nothing on disk to restore
    NotPersisted,
}

impl LoadOutcome {
    /// Whether the session now holds the stage's value
    pub fn is_loaded(&self) -> bool {
        !matches!(self, Self::NotPersisted)
    }
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyLoaded => write!(f, "already loaded"),
            Self::Restored => write!(f, "restored"),
            Self::NotPersisted => write!(f, "not persisted"),
        }
    }
}

/// Which tiers a clear touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearScope {
    pub session: bool,
    pub file: bool,
}

impl ClearScope {
    pub fn session_only() -> Self {
        Self {
            session: true,
            file: false,
        }
    }

    pub fn files_only() -> Self {
        Self {
            session: false,
            file: true,
        }
    }

    pub fn both() -> Self {
        Self {
            session: true,
            file: true,
        }
    }
}

impl Default for ClearScope {
    fn default() -> Self {
        Self::session_only()
    }
}

/// Presence of one stage in each tier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageStatus {
    pub stage: &'static str,
    pub in_session: bool,
    pub in_file: bool,
    pub file_path: Option<PathBuf>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl StageStatus {
    pub fn is_complete(&self) -> bool {
        self.in_session || self.in_file
    }
}

/// Status of every catalog stage, in catalog order
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct CacheStatus {
    stages: Vec<StageStatus>,
}

impl CacheStatus {
    pub fn get(&self, stage_id: &str) -> Option<&StageStatus> {
        self.stages.iter().find(|s| s.stage == stage_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StageStatus> {
        self.stages.iter()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

/// Per-stage results of a bulk operation, in catalog order.
///
/// Every catalog stage has an entry, whatever happened to the others.
#[derive(Debug)]
pub struct StageReport<T> {
    entries: Vec<(&'static str, StageCacheResult<T>)>,
}

impl<T> StageReport<T> {
    fn collect(mut op: impl FnMut(&'static Stage) -> StageCacheResult<T>) -> Self {
        Self {
            entries: STAGES.iter().map(|s| (s.id, op(s))).collect(),
        }
    }

    pub fn get(&self, stage_id: &str) -> Option<&StageCacheResult<T>> {
        self.entries
            .iter()
            .find(|(id, _)| *id == stage_id)
            .map(|(_, r)| r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &StageCacheResult<T>)> {
        self.entries.iter().map(|(id, r)| (*id, r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stages whose operation returned an error
    pub fn failures(&self) -> Vec<(&'static str, &StageCacheError)> {
        self.entries
            .iter()
            .filter_map(|(id, r)| r.as_ref().err().map(|e| (*id, e)))
            .collect()
    }

    pub fn all_ok(&self) -> bool {
        self.entries.iter().all(|(_, r)| r.is_ok())
    }
}

impl StageReport<LoadOutcome> {
    /// Stages the session now holds
    pub fn loaded(&self) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|(_, r)| matches!(r, Ok(o) if o.is_loaded()))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Whether the stage counts as recovered
    pub fn succeeded(&self, stage_id: &str) -> bool {
        matches!(self.get(stage_id), Some(Ok(o)) if o.is_loaded())
    }
}

/// Two-tier pipeline artifact cache
#[derive(Debug)]
pub struct ArtifactCache<S = MemorySession> {
    durable: DurableStore,
    session: S,
}

impl ArtifactCache<MemorySession> {
    /// Open a cache with a fresh in-memory session
    pub fn open_fresh(root: impl Into<PathBuf>) -> StageCacheResult<Self> {
        let session = MemorySession::new();
        debug!(
            "Session {} started at {}",
            session.id(),
            session.started_at().to_rfc3339()
        );
        Self::open(root, session)
    }
}

impl<S: SessionStore> ArtifactCache<S> {
    /// Open a cache over `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>, session: S) -> StageCacheResult<Self> {
        Ok(Self {
            durable: DurableStore::open(root)?,
            session,
        })
    }

    /// Open a cache as configured
    pub fn from_config(config: &CacheConfig, session: S) -> StageCacheResult<Self> {
        let durable = DurableStore::open(config.resolved_root())?.with_pretty(config.pretty);
        Ok(Self { durable, session })
    }

    pub fn root(&self) -> &Path {
        self.durable.root()
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Direct access to the session tier, bypassing the cache
    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    /// Give the session tier back to the host
    pub fn into_session(self) -> S {
        self.session
    }

    /// Persist `value` as the stage's durable artifact
    pub fn write_durable(&self, stage_id: &str, value: &Artifact) -> StageCacheResult<()> {
        let stage = known_stage(stage_id)?;
        self.durable.write(stage, value).inspect_err(|e| {
            warn!("Failed to save {}: {}", stage_id, e);
        })
    }

    /// The stage's durable artifact, `None` if it was never written
    pub fn read_durable(&self, stage_id: &str) -> StageCacheResult<Option<Artifact>> {
        let stage = known_stage(stage_id)?;
        self.durable.read(stage).inspect_err(|e| {
            warn!("Failed to load {}: {}", stage_id, e);
        })
    }

    /// Set the session entry, then write through to disk.
    ///
    /// The session write happens for any key; the result reflects only the
    /// durable write.
    pub fn write_both(&mut self, stage_id: &str, value: Artifact) -> StageCacheResult<()> {
        let result = self.write_durable(stage_id, &value);
        self.session.set(stage_id, value);
        result
    }

    /// Fill the session entry from disk unless it already holds a usable value.
    ///
    /// With `force`, disk always wins over the current session entry.
    pub fn load_into_session(
        &mut self,
        stage_id: &str,
        force: bool,
    ) -> StageCacheResult<LoadOutcome> {
        if !force && self.in_session(stage_id) {
            debug!("{} already in session", stage_id);
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        match self.read_durable(stage_id)? {
            Some(Artifact::Null) | None => Ok(LoadOutcome::NotPersisted),
            Some(value) => {
                self.session.set(stage_id, value);
                debug!("Restored {} into session", stage_id);
                Ok(LoadOutcome::Restored)
            }
        }
    }

    /// `load_into_session` for every catalog stage
    pub fn restore_all(&mut self, force: bool) -> StageReport<LoadOutcome> {
        let report = StageReport::collect(|stage| self.load_into_session(stage.id, force));
        info!(
            "Restored {}/{} stages into session",
            report.loaded().len(),
            report.len()
        );
        report
    }

    /// Tier presence of every catalog stage
    pub fn status(&self) -> CacheStatus {
        CacheStatus {
            stages: STAGES.iter().map(|s| self.stage_status(s)).collect(),
        }
    }

    /// Stages with neither a usable session entry nor a durable file
    pub fn missing_stages(&self) -> Vec<&'static str> {
        self.partition().1
    }

    /// Stages with a usable session entry or a durable file
    pub fn completed_stages(&self) -> Vec<&'static str> {
        self.partition().0
    }

    /// Drop a stage from the requested tiers.
    ///
    /// Missing entries are not errors. Ids outside the catalog have no file,
    /// so for them only the session entry is dropped.
    pub fn clear_stage(&mut self, stage_id: &str, scope: ClearScope) -> StageCacheResult<()> {
        if scope.session && self.session.delete(stage_id).is_some() {
            debug!("Cleared {} from session", stage_id);
        }

        if scope.file {
            let Some(stage) = catalog::lookup(stage_id) else {
                debug!("{} is not a catalog stage; no file to delete", stage_id);
                return Ok(());
            };
            if self
                .durable
                .remove(stage)
                .inspect_err(|e| warn!("Failed to delete file for {}: {}", stage_id, e))?
            {
                info!("Deleted durable artifact for {}", stage_id);
            }
        }

        Ok(())
    }

    /// `clear_stage` for every catalog stage
    pub fn clear_all(&mut self, scope: ClearScope) -> StageReport<()> {
        StageReport::collect(|stage| self.clear_stage(stage.id, scope))
    }

    fn in_session(&self, stage_id: &str) -> bool {
        is_valid(self.session.get(stage_id))
    }

    fn stage_status(&self, stage: &Stage) -> StageStatus {
        let in_file = self.durable.exists(stage);
        StageStatus {
            stage: stage.id,
            in_session: self.in_session(stage.id),
            in_file,
            file_path: in_file.then(|| self.durable.path_for(stage)),
            modified_at: if in_file {
                self.durable.modified_at(stage)
            } else {
                None
            },
        }
    }

    /// (completed, missing), both in catalog order
    fn partition(&self) -> (Vec<&'static str>, Vec<&'static str>) {
        let (completed, missing): (Vec<_>, Vec<_>) = STAGES
            .iter()
            .map(|s| self.stage_status(s))
            .partition(StageStatus::is_complete);
        (
            completed.into_iter().map(|s| s.stage).collect(),
            missing.into_iter().map(|s| s.stage).collect(),
        )
    }
}

fn known_stage(stage_id: &str) -> StageCacheResult<&'static Stage> {
    catalog::lookup(stage_id).ok_or_else(|| {
        warn!("Unknown stage '{}'", stage_id);
        StageCacheError::unknown_stage(stage_id)
    })
}
