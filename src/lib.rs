//! Hyperparameter sweep harness for a one-hidden-layer digit classifier.
//!
//! A sweep walks the grid of hidden widths, batch sizes and learning rates,
//! and for every point runs the same three stages:
//!
//! 1. [`Model::classifier`] builds a fresh, seeded `784 -> h -> 10` network.
//! 2. [`Model::compile`] binds SGD, categorical cross-entropy and accuracy.
//! 3. [`Trainer::fit`] runs a fixed number of epochs and returns the loss history.
//!
//! [`SweepRunner`] collects the histories into a [`SweepResult`].

pub mod activation;
pub mod compile;
pub mod config;
pub mod data;
pub mod error;
pub mod hyperparameters;
pub mod layers;
pub mod loss;
pub mod metrics;
pub mod model;
pub mod optimizer;
pub mod sweep;
pub mod trainer;

pub use activation::ActivationType;
pub use compile::CompiledModel;
pub use config::SweepConfig;
pub use data::{Dataset, INPUT_WIDTH, NUM_CLASSES};
pub use error::{Error, Result};
pub use hyperparameters::{HyperparameterConfig, SweepGrid};
pub use layers::{DenseLayer, Layer, LayerParams, WeightInitStrategy};
pub use loss::Loss;
pub use metrics::Metric;
pub use model::{LayerConfig, Model};
pub use optimizer::Optimizer;
pub use sweep::{SweepEntry, SweepResult, SweepRunner};
pub use trainer::{EpochRecord, LossHistory, Trainer, TrainingRun};
