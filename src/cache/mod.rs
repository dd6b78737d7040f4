//! Two-tier pipeline artifact cache
//!
//! Persists the outputs of named pipeline stages so an interactive session
//! can be interrupted and resumed without recomputing finished steps.
//!
//! # Tiers
//!
//! | Tier | Storage | Lifetime |
//! |------|---------|----------|
//! | Session | [`SessionStore`] (in memory by default) | One interactive session |
//! | Durable | One JSON file per stage under the root | Until cleared |
//!
//! # Stage States
//!
//! | In session | On disk | Reported as |
//! |------------|---------|-------------|
//! | valid | any | completed |
//! | missing or empty | yes | completed |
//! | missing or empty | no | missing |

pub mod artifact;
pub mod catalog;
pub mod durable;
pub mod manager;
pub mod session;
pub mod shared;

pub use artifact::{is_valid, Artifact, Table};
pub use catalog::{Stage, StageGroup, STAGES};
pub use durable::DurableStore;
pub use manager::{ArtifactCache, CacheStatus, ClearScope, LoadOutcome, StageReport, StageStatus};
pub use session::{MemorySession, SessionStore};
pub use shared::{get_instance, SharedCache};
