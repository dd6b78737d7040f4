//! Stage catalog
//!
//! The fixed set of pipeline stages whose outputs are cached, and the file
//! each one occupies under the durable root. The catalog is a compile-time
//! constant; adding a stage is an additive change to [`STAGES`].

use serde::Serialize;
use std::fmt;

/// Pipeline step a stage belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageGroup {
    Preprocessing,
    Graph,
    ContentBased,
    Hybrid,
    Evaluation,
    Filtering,
    Recommendation,
    Timing,
}

impl fmt::Display for StageGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Preprocessing => "preprocessing",
            Self::Graph => "graph",
            Self::ContentBased => "content_based",
            Self::Hybrid => "hybrid",
            Self::Evaluation => "evaluation",
            Self::Filtering => "filtering",
            Self::Recommendation => "recommendation",
            Self::Timing => "timing",
        };
        write!(f, "{}", name)
    }
}

/// A catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Stage {
    /// Stable identifier used as the session key
    pub id: &'static str,

    /// File name relative to the durable root
    pub file_name: &'static str,

    /// Pipeline step group
    pub group: StageGroup,
}

const fn stage(id: &'static str, file_name: &'static str, group: StageGroup) -> Stage {
    Stage {
        id,
        file_name,
        group,
    }
}

/// All cached stages, in pipeline order
pub const STAGES: &[Stage] = &[
    stage("pruned_interactions", "pruned_interactions.json", StageGroup::Preprocessing),
    stage("feature_encoding", "feature_encoding.json", StageGroup::Preprocessing),
    stage("user_profiles", "user_profiles.json", StageGroup::Preprocessing),
    stage("gnn_graph", "gnn_graph.json", StageGroup::Graph),
    stage("gnn_propagation", "gnn_propagation.json", StageGroup::Graph),
    stage("gnn_training", "gnn_training.json", StageGroup::Graph),
    stage("gnn_predictions", "streamlit_gnn_predictions.json", StageGroup::Graph),
    stage("cbf_predictions", "streamlit_cbf_predictions.json", StageGroup::ContentBased),
    stage("hybrid_predictions", "streamlit_hybrid_predictions.json", StageGroup::Hybrid),
    stage("cbf_evaluation_metrics", "cbf_evaluation_metrics.json", StageGroup::Evaluation),
    stage("gnn_evaluation_metrics", "gnn_evaluation_metrics.json", StageGroup::Evaluation),
    stage("hybrid_evaluation_metrics", "hybrid_evaluation_metrics.json", StageGroup::Evaluation),
    stage("personalized_filters", "personalized_filters.json", StageGroup::Filtering),
    stage("outfit_recommendations", "outfit_recommendations.json", StageGroup::Recommendation),
    stage("training_time", "training_time.json", StageGroup::Timing),
    stage("inference_time", "inference_time.json", StageGroup::Timing),
    stage("gnn_training_time", "gnn_training_time.json", StageGroup::Timing),
    stage("gnn_inference_time", "gnn_inference_time.json", StageGroup::Timing),
];

/// Find a stage by id
pub fn lookup(id: &str) -> Option<&'static Stage> {
    STAGES.iter().find(|s| s.id == id)
}

/// Whether `id` names a catalog stage
pub fn is_known(id: &str) -> bool {
    lookup(id).is_some()
}

/// Stage ids in catalog order
pub fn stage_ids() -> impl Iterator<Item = &'static str> {
    STAGES.iter().map(|s| s.id)
}
