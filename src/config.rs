//! Sweep configuration, loadable from TOML.
//!
//! Every field is optional; missing ones fall back to the stock experiment
//! (default grid, 100 epochs, seed 42, sequential).
//!
//! ```toml
//! epochs = 100
//! seed = 42
//! parallel = false
//!
//! [grid]
//! hidden_units = [25, 50, 100]
//! batch_sizes = [1, 10, 50, 5000]
//! learning_rates = [0.5, 1.0, 10.0]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::hyperparameters::SweepGrid;
use crate::sweep::{SweepRunner, DEFAULT_SEED};
use crate::trainer::Trainer;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    pub grid: SweepGrid,
    pub epochs: usize,
    pub seed: u64,
    pub parallel: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            grid: SweepGrid::default(),
            epochs: Trainer::DEFAULT_EPOCHS,
            seed: DEFAULT_SEED,
            parallel: false,
        }
    }
}

impl SweepConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        Trainer::new(self.epochs)?;
        self.grid.validate()
    }

    pub fn runner(&self) -> Result<SweepRunner> {
        self.validate()?;
        Ok(SweepRunner::new(
            self.grid.clone(),
            Trainer::new(self.epochs)?,
            self.seed,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_empty_file_is_stock_experiment() {
        let cfg = SweepConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, SweepConfig::default());
        assert_eq!(cfg.epochs, 100);
        assert_eq!(cfg.grid.len(), 36);
    }

    #[test]
    fn test_partial_override() {
        let cfg = SweepConfig::from_toml_str(
            r#"
            epochs = 5
            parallel = true

            [grid]
            learning_rates = [0.1]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.epochs, 5);
        assert!(cfg.parallel);
        assert_eq!(cfg.seed, DEFAULT_SEED);
        assert_eq!(cfg.grid.learning_rates, vec![0.1]);
        assert_eq!(cfg.grid.hidden_units, vec![25, 50, 100]);
        assert_eq!(cfg.grid.len(), 12);
    }

    #[test]
    fn test_rejects_unknown_keys_and_bad_values() {
        assert!(matches!(
            SweepConfig::from_toml_str("epoch = 3"),
            Err(Error::ConfigFile(_))
        ));

        let cfg = SweepConfig::from_toml_str("epochs = 0").unwrap();
        assert!(matches!(cfg.validate(), Err(Error::Configuration(_))));

        let cfg = SweepConfig::from_toml_str("[grid]\nbatch_sizes = [0]").unwrap();
        assert!(cfg.runner().is_err());
    }
}
