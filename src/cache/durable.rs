//! Durable tier - one JSON file per catalog stage
//!
//! File existence is the presence signal; there is no manifest. Writes land
//! in a hidden temp file next to the target and are renamed into place.

use crate::cache::artifact::Artifact;
use crate::cache::catalog::Stage;
use crate::error::{StageCacheError, StageCacheResult};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory-backed artifact store
#[derive(Debug, Clone)]
pub struct DurableStore {
    root: PathBuf,
    pretty: bool,
}

impl DurableStore {
    /// Open the store, creating `root` and its parents if needed
    pub fn open(root: impl Into<PathBuf>) -> StageCacheResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            StageCacheError::io(format!("creating artifacts directory {}", root.display()), e)
        })?;
        debug!("Durable tier at {}", root.display());
        Ok(Self {
            root,
            pretty: false,
        })
    }

    /// Pretty-print artifacts on write
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of a stage's file, whether or not it exists
    pub fn path_for(&self, stage: &Stage) -> PathBuf {
        self.root.join(stage.file_name)
    }

    pub fn exists(&self, stage: &Stage) -> bool {
        self.path_for(stage).is_file()
    }

    /// Last modification time of the stage's file
    pub fn modified_at(&self, stage: &Stage) -> Option<DateTime<Utc>> {
        fs::metadata(self.path_for(stage))
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Utc>::from)
    }

    /// Serialize `artifact` and replace the stage's file with it.
    ///
    /// Non-finite floats are rejected before anything touches disk; serde_json
    /// would write them as `null` and the file would never decode.
    pub fn write(&self, stage: &Stage, artifact: &Artifact) -> StageCacheResult<()> {
        if !artifact.is_finite() {
            return Err(StageCacheError::NonFinite {
                stage: stage.id.to_string(),
            });
        }

        let encoded = if self.pretty {
            serde_json::to_vec_pretty(artifact)
        } else {
            serde_json::to_vec(artifact)
        }
        .map_err(|source| StageCacheError::Encode {
            stage: stage.id.to_string(),
            source,
        })?;

        let path = self.path_for(stage);
        let tmp = self.tmp_path_for(stage);

        fs::write(&tmp, &encoded)
            .map_err(|e| StageCacheError::io(format!("writing {}", tmp.display()), e))?;

        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(StageCacheError::io(
                format!("replacing {}", path.display()),
                e,
            ));
        }

        debug!("Wrote {} ({} bytes)", stage.id, encoded.len());
        Ok(())
    }

    /// Read the stage's artifact; `None` when nothing has been written
    pub fn read(&self, stage: &Stage) -> StageCacheResult<Option<Artifact>> {
        let path = self.path_for(stage);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StageCacheError::io(
                    format!("reading {}", path.display()),
                    e,
                ))
            }
        };

        let artifact =
            serde_json::from_slice(&bytes).map_err(|source| StageCacheError::Decode {
                stage: stage.id.to_string(),
                path: path.clone(),
                source,
            })?;

        debug!("Read {} from {}", stage.id, path.display());
        Ok(Some(artifact))
    }

    /// Delete the stage's file. Returns whether a file was removed.
    pub fn remove(&self, stage: &Stage) -> StageCacheResult<bool> {
        let path = self.path_for(stage);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StageCacheError::io(
                format!("removing {}", path.display()),
                e,
            )),
        }
    }

    fn tmp_path_for(&self, stage: &Stage) -> PathBuf {
        self.root.join(format!(".{}.tmp", stage.file_name))
    }
}
