//! Merge configuration.
//!
//! Loaded from TOML; missing keys fall back to their defaults. The threshold
//! is validated when an engine is built.

use serde::{Deserialize, Serialize};

use redline_diff::DEFAULT_SIMILARITY_THRESHOLD;

use crate::error::{MergeError, MergeResult};

/// Configuration for the structural merge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Minimum word-bag similarity for two blocks to be treated as the same
    /// block, edited. Pairs below it are shown as a full replacement.
    pub similarity_threshold: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl MergeConfig {
    /// Builder-style threshold setter. Call [`validate`](Self::validate)
    /// (or construct a [`MergeEngine`](crate::MergeEngine)) to check it.
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> MergeResult<()> {
        let t = self.similarity_threshold;
        if t.is_nan() || !(0.0..=1.0).contains(&t) {
            return Err(MergeError::InvalidThreshold(t));
        }
        Ok(())
    }

    /// Parse and validate a TOML configuration. Missing keys take their
    /// default values.
    pub fn from_toml_str(s: &str) -> MergeResult<Self> {
        let config: MergeConfig = toml::from_str(s).map_err(|e| MergeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
