//! AI configuration.

use serde::{Deserialize, Serialize};

/// Knobs for the decision pipeline. The defaults are what the engine ships
/// with; callers override per session, not per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// When the teammate is already winning a trick, feed points into it
    /// (the long-standing behavior). Disabling switches to a conservative
    /// line that keeps point cards back when the teammate's win already
    /// looks secure.
    pub legacy_teammate_contribution: bool,

    /// Reserved for deterministic tie-breaking extensions. The pipeline
    /// itself never draws randomness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            legacy_teammate_contribution: true,
            seed: None,
        }
    }
}
