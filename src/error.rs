//! Error types for stagecache
//!
//! All modules use `StageCacheResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for stagecache operations
pub type StageCacheResult<T> = Result<T, StageCacheError>;

/// All errors that can occur in stagecache
#[derive(Error, Debug)]
pub enum StageCacheError {
    // Catalog errors
    #[error("Unknown stage: {0}")]
    UnknownStage(String),

    // Codec errors
    #[error("Failed to encode artifact for stage {stage}: {source}")]
    Encode {
        stage: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot persist stage {stage}: artifact contains NaN or an infinite float")]
    NonFinite { stage: String },

    #[error("Failed to decode artifact for stage {stage} from {path}: {source}")]
    Decode {
        stage: String,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // Lifecycle errors
    #[error("Artifact cache not initialized: a root directory must be provided on first use")]
    NotInitialized,

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl StageCacheError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an unknown stage error
    pub fn unknown_stage(stage: impl Into<String>) -> Self {
        Self::UnknownStage(stage.into())
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::UnknownStage(_) => Some("Run: stagecache stages"),
            Self::NotInitialized => Some("Pass the artifacts root on the first call"),
            Self::NonFinite { .. } => Some("Store NaN or infinite values as text"),
            Self::Decode { .. } => {
                Some("Rewrite the stage or run: stagecache clear <stage> --files")
            }
            Self::ConfigInvalid { .. } => Some("Run: stagecache config init --force"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StageCacheError::unknown_stage("bogus");
        assert_eq!(err.to_string(), "Unknown stage: bogus");
    }

    #[test]
    fn error_hint() {
        assert_eq!(
            StageCacheError::unknown_stage("x").hint(),
            Some("Run: stagecache stages")
        );
        assert!(StageCacheError::User("nope".to_string()).hint().is_none());
    }

    #[test]
    fn non_finite_error_names_stage() {
        let err = StageCacheError::NonFinite {
            stage: "training_time".to_string(),
        };
        assert!(err.to_string().contains("training_time"));
        assert!(err.hint().is_some());
    }

    #[test]
    fn decode_error_names_stage_and_path() {
        let source = serde_json::from_str::<u8>("{").unwrap_err();
        let err = StageCacheError::Decode {
            stage: "gnn_graph".to_string(),
            path: PathBuf::from("/tmp/gnn_graph.json"),
            source,
        };
        let message = err.to_string();
        assert!(message.contains("gnn_graph"));
        assert!(message.contains("/tmp/gnn_graph.json"));
        assert!(err.hint().is_some());
    }
}
