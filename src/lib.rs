//! stagecache - pipeline artifact cache
//!
//! Persists intermediate outputs of a multi-stage pipeline in two tiers, an
//! in-memory session and a directory of per-stage files, so a step-driven
//! session can be interrupted and resumed without recomputation.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod ui;

pub use cache::{Artifact, ArtifactCache, ClearScope, LoadOutcome, MemorySession, SessionStore};
pub use error::{StageCacheError, StageCacheResult};
