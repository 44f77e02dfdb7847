//! Reconciliation settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PatriResult, ValidationError};
use crate::time::SampleInterval;

/// Settings for [`crate::Reconciler`] and trajectory sampling.
///
/// Missing JSON fields fall back to their defaults.
///
/// # Examples
///
/// ```
/// use patrilang::{ReconcileConfig, SampleInterval};
///
/// let config = ReconcileConfig::from_json_str(r#"{"sample_interval": "yearly"}"#).unwrap();
/// assert_eq!(config.sample_interval, SampleInterval::Yearly);
/// assert_eq!(config.planned_label, "Prévu");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Spacing of trajectory samples.
    pub sample_interval: SampleInterval,
    /// Upper bound on samples per trajectory.
    pub max_samples: usize,
    /// Label prefixed to planned possessions in merged cases.
    pub planned_label: String,
    /// Label prefixed to done possessions in merged cases.
    pub done_label: String,
    /// Fail with `MissingCase` when a planned case declares objectives but
    /// has no done counterpart.
    pub require_done_for_objectives: bool,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            sample_interval: SampleInterval::Monthly,
            max_samples: 1200,
            planned_label: "Prévu".to_string(),
            done_label: "Réalisé".to_string(),
            require_done_for_objectives: false,
        }
    }
}

impl ReconcileConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_samples == 0 {
            return Err(ValidationError::InvalidConfig {
                reason: "max_samples must be > 0".to_string(),
            });
        }
        if self.planned_label.trim().is_empty() || self.done_label.trim().is_empty() {
            return Err(ValidationError::InvalidConfig {
                reason: "labels must not be empty".to_string(),
            });
        }
        if self.planned_label == self.done_label {
            return Err(ValidationError::InvalidConfig {
                reason: "planned_label and done_label must differ".to_string(),
            });
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> PatriResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> PatriResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
