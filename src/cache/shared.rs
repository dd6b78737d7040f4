//! Process-wide shared cache
//!
//! Components should receive an [`ArtifactCache`] explicitly. Hosts that
//! cannot thread one through use [`get_instance`]: the first call fixes the
//! root directory, later calls get the same handle back.

use crate::cache::manager::ArtifactCache;
use crate::error::{StageCacheError, StageCacheResult};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// Handle to the shared cache
pub type SharedCache = Arc<Mutex<ArtifactCache>>;

static INSTANCE: OnceLock<SharedCache> = OnceLock::new();

/// Get the shared cache, creating it on first use.
///
/// `root` is required on the first call and ignored afterwards.
pub fn get_instance(root: Option<&Path>) -> StageCacheResult<SharedCache> {
    if let Some(existing) = INSTANCE.get() {
        if let Some(root) = root {
            debug!(
                "Shared cache already initialized; ignoring root {}",
                root.display()
            );
        }
        return Ok(Arc::clone(existing));
    }

    let root = root.ok_or(StageCacheError::NotInitialized)?;
    let cache = Arc::new(Mutex::new(ArtifactCache::open_fresh(root)?));

    // A concurrent first call may have won; theirs is the instance
    let shared = INSTANCE.get_or_init(|| cache);
    info!("Shared cache at {}", shared.lock().root().display());
    Ok(Arc::clone(shared))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::artifact::Artifact;
    use crate::cache::session::SessionStore;
    use tempfile::TempDir;

    // The instance is per process, so the whole lifecycle lives in one test
    #[test]
    fn shared_instance_lifecycle() {
        assert!(matches!(
            get_instance(None),
            Err(StageCacheError::NotInitialized)
        ));

        let first_root = TempDir::new().unwrap();
        let other_root = TempDir::new().unwrap();

        let first = get_instance(Some(first_root.path())).unwrap();

        let again = get_instance(Some(other_root.path())).unwrap();
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(again.lock().root(), first_root.path());

        first
            .lock()
            .write_both("training_time", Artifact::Float(1.25))
            .unwrap();
        let without_root = get_instance(None).unwrap();
        assert_eq!(
            without_root.lock().session().get("training_time"),
            Some(&Artifact::Float(1.25))
        );
    }
}
