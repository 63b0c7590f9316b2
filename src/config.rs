//! Demo configuration.
//!
//! Every field has a default, so a JSON config file only needs the fields it
//! changes:
//!
//! ```json
//! { "epochs": 400, "checkpoints": [10, 100, 400] }
//! ```

use crate::checkpoint::CheckpointSchedule;
use crate::error::ConfigError;
use crate::model::Parameters;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub batch_size: usize,
    /// Epoch counts after which the fit line is captured.
    pub checkpoints: CheckpointSchedule,
    /// Right end of every fit line segment, in MB.
    pub fit_line_x_max: f64,
    pub prediction_sizes_mb: Vec<f64>,
    /// Starting `(k, b)`.
    pub initial: Parameters,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            epochs: 200,
            learning_rate: 0.0005,
            batch_size: 32,
            checkpoints: CheckpointSchedule::default(),
            fit_line_x_max: 10.0,
            prediction_sizes_mb: vec![1.0, 100.0, 10000.0],
            initial: Parameters::default(),
        }
    }
}

impl DemoConfig {
    /// Reads and validates a JSON config file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.epochs == 0 {
            return Err(ConfigError::Invalid("epochs must be positive".into()));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be positive".into()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "learning_rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        if let Some(last) = self.checkpoints.last() {
            if last > self.epochs {
                return Err(ConfigError::Invalid(format!(
                    "checkpoint at epoch {last} is past the last epoch ({})",
                    self.epochs
                )));
            }
        }
        if !(self.fit_line_x_max.is_finite() && self.fit_line_x_max > 0.0) {
            return Err(ConfigError::Invalid(
                "fit_line_x_max must be positive and finite".into(),
            ));
        }
        if self.prediction_sizes_mb.iter().any(|s| !s.is_finite()) {
            return Err(ConfigError::Invalid(
                "prediction sizes must be finite".into(),
            ));
        }
        if !(self.initial.k.is_finite() && self.initial.b.is_finite()) {
            return Err(ConfigError::Invalid(
                "initial parameters must be finite".into(),
            ));
        }
        Ok(())
    }
}
