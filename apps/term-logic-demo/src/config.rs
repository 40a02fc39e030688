//! Demo configuration
//!
//! Inputs and the centre-of-gravity threshold, loaded from TOML:
//!
//! ```toml
//! threshold = 10.0
//! inputs = [
//!     [1.0, 2.0, 21.0, 21.0],
//!     [3.0, 6.0, 5.1, 5.0],
//! ]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DemoError, Result};
use crate::features::FEATURE_SLOTS;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "TERM_LOGIC_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Both centre coordinates must exceed this for the box to be selected
    pub threshold: f64,
    /// Bounding boxes as `[min_x, min_y, size_x, size_y]`
    pub inputs: Vec<Vec<f64>>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            threshold: 10.0,
            inputs: vec![vec![1.0, 2.0, 21.0, 21.0], vec![3.0, 6.0, 5.1, 5.0]],
        }
    }
}

impl DemoConfig {
    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Resolve the config from an explicit path, then the environment,
    /// falling back to the built-in inputs
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            tracing::info!(path = %path.display(), "loading config");
            return Self::from_file(path);
        }

        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = Path::new(&path);
                tracing::info!(path = %path.display(), env = CONFIG_ENV, "loading config from environment");
                Self::from_file(path)
            }
            None => {
                tracing::info!("using built-in inputs");
                Ok(Self::default())
            }
        }
    }

    /// Check that every input has a value for each feature slot
    pub fn validate(&self) -> Result<()> {
        for (row, input) in self.inputs.iter().enumerate() {
            if input.len() < FEATURE_SLOTS {
                return Err(DemoError::InputTooShort {
                    row,
                    len: input.len(),
                    required: FEATURE_SLOTS,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = DemoConfig::default();
        assert_eq!(config.threshold, 10.0);
        assert_eq!(config.inputs.len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = DemoConfig::from_toml("threshold = 4.5\ninputs = [[0.0, 0.0, 2.0, 3.0]]").unwrap();
        assert_eq!(config.threshold, 4.5);
        assert_eq!(config.inputs, vec![vec![0.0, 0.0, 2.0, 3.0]]);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = DemoConfig::from_toml("threshold = 1.0").unwrap();
        assert_eq!(config.inputs, DemoConfig::default().inputs);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            DemoConfig::from_toml("threshold = ["),
            Err(DemoError::Parse(_))
        ));
    }

    #[test]
    fn test_short_input_rejected() {
        let config = DemoConfig {
            threshold: 10.0,
            inputs: vec![vec![1.0, 2.0, 3.0, 4.0], vec![1.0, 2.0]],
        };
        assert!(matches!(
            config.validate(),
            Err(DemoError::InputTooShort {
                row: 1,
                len: 2,
                required: 4
            })
        ));
    }
}
