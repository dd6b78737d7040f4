//! Session tier
//!
//! The ephemeral, per-session working set. The cache only talks to it through
//! [`SessionStore`], so hosts can plug in their own session context; the
//! in-process default is [`MemorySession`].

use crate::cache::artifact::Artifact;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

/// Key-value storage for the session tier.
///
/// Keys are stage ids but are not restricted to catalog members.
pub trait SessionStore {
    /// Current entry for `key`, valid or not
    fn get(&self, key: &str) -> Option<&Artifact>;

    /// Insert or overwrite the entry for `key`
    fn set(&mut self, key: &str, value: Artifact);

    /// Remove the entry for `key`, returning it if it was present
    fn delete(&mut self, key: &str) -> Option<Artifact>;

    /// Keys currently held, in no particular order
    fn keys(&self) -> Vec<String>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// In-memory session tier, alive as long as the value is
#[derive(Debug, Clone)]
pub struct MemorySession {
    id: Uuid,
    started_at: DateTime<Utc>,
    entries: HashMap<String, Artifact>,
}

impl MemorySession {
    /// Start a new, empty session
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            entries: HashMap::new(),
        }
    }

    /// Unique session ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// When the session was started
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemorySession {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<&Artifact> {
        self.entries.get(key)
    }

    fn set(&mut self, key: &str, value: Artifact) {
        self.entries.insert(key.to_string(), value);
    }

    fn delete(&mut self, key: &str) -> Option<Artifact> {
        self.entries.remove(key)
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_new_is_empty() {
        let session = MemorySession::new();
        assert!(session.is_empty());
        assert!(session.keys().is_empty());
        assert!(session.started_at() <= Utc::now());
    }

    #[test]
    fn sessions_get_distinct_ids() {
        assert_ne!(MemorySession::new().id(), MemorySession::new().id());
    }

    #[test]
    fn set_get_delete() {
        let mut session = MemorySession::new();
        session.set("training_time", Artifact::Float(1.5));
        assert!(session.contains("training_time"));
        assert_eq!(session.get("training_time"), Some(&Artifact::Float(1.5)));

        session.set("training_time", Artifact::Float(2.0));
        assert_eq!(session.len(), 1);

        assert_eq!(session.delete("training_time"), Some(Artifact::Float(2.0)));
        assert!(session.delete("training_time").is_none());
    }

    #[test]
    fn keys_are_not_limited_to_the_catalog() {
        let mut session = MemorySession::new();
        session.set("scratch", Artifact::Null);
        assert_eq!(session.keys(), vec!["scratch".to_string()]);
    }
}
