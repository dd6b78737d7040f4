//! Resume scenarios against the library API

use stagecache::cache::{catalog, CacheStatus, Table};
use stagecache::{Artifact, ArtifactCache, ClearScope, LoadOutcome, MemorySession, SessionStore};
use std::collections::BTreeMap;
use tempfile::TempDir;

fn recommendations() -> Artifact {
    let table = Table::new(vec!["user_id".to_string(), "outfit".to_string()])
        .with_row(vec![Artifact::Int(1), "casual-03".into()])
        .with_row(vec![Artifact::Int(2), "formal-11".into()]);
    Artifact::Table(table)
}

fn in_session(status: &CacheStatus, id: &str) -> bool {
    status.get(id).map(|s| s.in_session).unwrap_or(false)
}

#[test]
fn interrupted_session_resumes_from_disk() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("artifacts");

    // First session runs two steps, then goes away
    {
        let mut cache = ArtifactCache::open_fresh(&root).unwrap();
        cache.write_both("outfit_recommendations", recommendations()).unwrap();
        cache.write_both("training_time", Artifact::Float(42.5)).unwrap();
        assert!(in_session(&cache.status(), "training_time"));
    }

    // Second session starts empty and picks up where the first stopped
    let mut cache = ArtifactCache::open_fresh(&root).unwrap();
    let before = cache.status();
    assert!(!in_session(&before, "training_time"));
    assert!(before.get("training_time").unwrap().in_file);

    let report = cache.restore_all(false);
    assert_eq!(report.loaded(), vec!["outfit_recommendations", "training_time"]);
    assert_eq!(
        cache.session().get("outfit_recommendations"),
        Some(&recommendations())
    );

    let missing = cache.missing_stages();
    assert_eq!(missing.len(), catalog::STAGES.len() - 2);
    assert!(!missing.contains(&"training_time"));
}

#[test]
fn host_supplied_session_store() {
    /// Session backed by the host's own map
    #[derive(Default)]
    struct HostSession {
        values: BTreeMap<String, Artifact>,
        writes: usize,
    }

    impl SessionStore for HostSession {
        fn get(&self, key: &str) -> Option<&Artifact> {
            self.values.get(key)
        }

        fn set(&mut self, key: &str, value: Artifact) {
            self.writes += 1;
            self.values.insert(key.to_string(), value);
        }

        fn delete(&mut self, key: &str) -> Option<Artifact> {
            self.values.remove(key)
        }

        fn keys(&self) -> Vec<String> {
            self.values.keys().cloned().collect()
        }
    }

    let temp = TempDir::new().unwrap();
    let mut cache = ArtifactCache::open(temp.path(), HostSession::default()).unwrap();

    cache.write_both("gnn_training_time", Artifact::Float(0.0)).unwrap();
    assert_eq!(
        cache.load_into_session("gnn_training_time", false).unwrap(),
        LoadOutcome::AlreadyLoaded
    );
    assert_eq!(
        cache.load_into_session("gnn_training_time", true).unwrap(),
        LoadOutcome::Restored
    );

    cache.clear_all(ClearScope::session_only());
    let host = cache.into_session();
    assert!(host.values.is_empty());
    assert_eq!(host.writes, 2);
}

#[test]
fn clearing_files_keeps_session_results() {
    let temp = TempDir::new().unwrap();
    let mut cache = ArtifactCache::open(temp.path(), MemorySession::new()).unwrap();
    cache.write_both("cbf_predictions", recommendations()).unwrap();

    let report = cache.clear_all(ClearScope::files_only());
    assert!(report.all_ok());

    let status = cache.status();
    let entry = status.get("cbf_predictions").unwrap();
    assert!(entry.in_session);
    assert!(!entry.in_file);
    assert!(cache.completed_stages().contains(&"cbf_predictions"));
}
