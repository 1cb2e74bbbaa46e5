//! Error types for the gridfit crate.

use thiserror::Error;

use crate::hyperparameters::HyperparameterConfig;

/// Top-level error type for model construction, training and sweeps.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid hyperparameter or model structure, caught before training starts.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Feature/label dimensions disagree or label rows are not distributions.
    #[error("data shape error: {0}")]
    DataShape(String),

    /// A batch produced a non-finite loss.
    #[error("training diverged at epoch {epoch}, batch {batch}: loss is {loss}")]
    Training { epoch: usize, batch: usize, loss: f32 },

    /// A configuration failed mid-sweep and the remaining grid was skipped.
    #[error("sweep aborted at {config}: {source}")]
    SweepAborted {
        config: HyperparameterConfig,
        #[source]
        source: Box<Error>,
    },

    #[error("invalid sweep config file: {0}")]
    ConfigFile(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn shape(msg: impl Into<String>) -> Self {
        Self::DataShape(msg.into())
    }

    /// The configuration a sweep was aborted at, if any.
    pub fn failed_config(&self) -> Option<&HyperparameterConfig> {
        match self {
            Self::SweepAborted { config, .. } => Some(config),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
