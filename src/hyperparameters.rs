use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One point of the hyperparameter grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HyperparameterConfig {
    /// Width of the hidden layer
    pub hidden_units: usize,

    /// Rows per gradient update; values above the example count mean full-batch descent
    pub batch_size: usize,

    /// Step size of the SGD optimizer
    pub learning_rate: f32,
}

impl HyperparameterConfig {
    pub fn new(hidden_units: usize, batch_size: usize, learning_rate: f32) -> Self {
        Self {
            hidden_units,
            batch_size,
            learning_rate,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.hidden_units == 0 {
            return Err(Error::config(format!("{self}: hidden units must be > 0")));
        }
        if self.batch_size == 0 {
            return Err(Error::config(format!("{self}: batch size must be > 0")));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::config(format!(
                "{self}: learning rate must be finite and > 0"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for HyperparameterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hidden_units={} batch_size={} learning_rate={}",
            self.hidden_units, self.batch_size, self.learning_rate
        )
    }
}

/// Candidate values for each swept axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepGrid {
    pub hidden_units: Vec<usize>,
    pub batch_sizes: Vec<usize>,
    pub learning_rates: Vec<f32>,
}

impl Default for SweepGrid {
    fn default() -> Self {
        SweepGrid {
            hidden_units: vec![25, 50, 100],
            batch_sizes: vec![1, 10, 50, 5000],
            learning_rates: vec![0.5, 1.0, 10.0],
        }
    }
}

impl SweepGrid {
    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.hidden_units.len() * self.batch_sizes.len() * self.learning_rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every grid point, batch size outermost and learning rate innermost.
    pub fn configs(&self) -> Vec<HyperparameterConfig> {
        let mut configs = Vec::with_capacity(self.len());
        for &batch_size in &self.batch_sizes {
            for &hidden_units in &self.hidden_units {
                for &learning_rate in &self.learning_rates {
                    configs.push(HyperparameterConfig {
                        hidden_units,
                        batch_size,
                        learning_rate,
                    });
                }
            }
        }
        configs
    }

    /// Rejects empty axes and invalid values before any training happens.
    pub fn validate(&self) -> Result<()> {
        if self.hidden_units.is_empty() {
            return Err(Error::config("grid has no hidden unit candidates"));
        }
        if self.batch_sizes.is_empty() {
            return Err(Error::config("grid has no batch size candidates"));
        }
        if self.learning_rates.is_empty() {
            return Err(Error::config("grid has no learning rate candidates"));
        }
        self.configs().iter().try_for_each(HyperparameterConfig::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let grid = SweepGrid::default();

        assert_eq!(grid.hidden_units, vec![25, 50, 100]);
        assert_eq!(grid.batch_sizes, vec![1, 10, 50, 5000]);
        assert_eq!(grid.learning_rates, vec![0.5, 1.0, 10.0]);
        assert_eq!(grid.len(), 36);
        assert_eq!(grid.configs().len(), 36);
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_enumeration_order() {
        let grid = SweepGrid {
            hidden_units: vec![25, 50],
            batch_sizes: vec![1, 10],
            learning_rates: vec![0.5, 1.0],
        };
        let configs = grid.configs();

        assert_eq!(configs[0], HyperparameterConfig::new(25, 1, 0.5));
        assert_eq!(configs[1], HyperparameterConfig::new(25, 1, 1.0));
        assert_eq!(configs[2], HyperparameterConfig::new(50, 1, 0.5));
        assert_eq!(configs[4], HyperparameterConfig::new(25, 10, 0.5));
        assert_eq!(configs[7], HyperparameterConfig::new(50, 10, 1.0));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(HyperparameterConfig::new(0, 1, 0.5).validate().is_err());
        assert!(HyperparameterConfig::new(25, 0, 0.5).validate().is_err());
        assert!(HyperparameterConfig::new(25, 1, 0.0).validate().is_err());
        assert!(HyperparameterConfig::new(25, 1, -1.0).validate().is_err());
        assert!(HyperparameterConfig::new(25, 5000, 10.0).validate().is_ok());

        let grid = SweepGrid {
            learning_rates: vec![0.5, -2.0],
            ..SweepGrid::default()
        };
        assert!(matches!(grid.validate(), Err(Error::Configuration(_))));

        let empty = SweepGrid {
            batch_sizes: vec![],
            ..SweepGrid::default()
        };
        assert!(empty.is_empty());
        assert!(empty.validate().is_err());
    }
}
