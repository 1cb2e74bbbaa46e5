//! Exhaustive hyperparameter grid sweep.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::hyperparameters::{HyperparameterConfig, SweepGrid};
use crate::trainer::{LossHistory, Trainer};
use crate::{Dataset, Error, Model, Result};

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// One trained grid point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepEntry {
    pub config: HyperparameterConfig,
    pub history: LossHistory,
}

/// Loss curves keyed by configuration, in grid enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    entries: Vec<SweepEntry>,
}

impl SweepResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SweepEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &SweepEntry> {
        self.entries.iter()
    }

    pub fn get(&self, config: &HyperparameterConfig) -> Option<&LossHistory> {
        self.entries
            .iter()
            .find(|e| e.config == *config)
            .map(|e| &e.history)
    }

    pub fn with_batch_size(&self, batch_size: usize) -> impl Iterator<Item = &SweepEntry> {
        self.entries
            .iter()
            .filter(move |e| e.config.batch_size == batch_size)
    }

    pub fn with_hidden_units(&self, hidden_units: usize) -> impl Iterator<Item = &SweepEntry> {
        self.entries
            .iter()
            .filter(move |e| e.config.hidden_units == hidden_units)
    }

    pub fn with_learning_rate(&self, learning_rate: f32) -> impl Iterator<Item = &SweepEntry> {
        self.entries
            .iter()
            .filter(move |e| e.config.learning_rate == learning_rate)
    }

    /// Curves of one plot facet: fixed hidden width and learning rate, one
    /// entry per batch size, in sweep order.
    pub fn panel(&self, hidden_units: usize, learning_rate: f32) -> Vec<&SweepEntry> {
        self.with_hidden_units(hidden_units)
            .filter(|e| e.config.learning_rate == learning_rate)
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn push(&mut self, config: HyperparameterConfig, history: LossHistory) {
        self.entries.push(SweepEntry { config, history });
    }
}

/// Drives every grid point through build, compile and fit.
#[derive(Debug, Clone)]
pub struct SweepRunner {
    grid: SweepGrid,
    trainer: Trainer,
    seed: u64,
}

impl SweepRunner {
    pub fn new(grid: SweepGrid, trainer: Trainer, seed: u64) -> Self {
        Self {
            grid,
            trainer,
            seed,
        }
    }

    pub fn grid(&self) -> &SweepGrid {
        &self.grid
    }

    /// Trains one configuration from a fresh model seeded with the sweep seed.
    pub fn run_config(&self, config: &HyperparameterConfig, data: &Dataset) -> Result<LossHistory> {
        config.validate()?;
        let compiled = Model::classifier(config.hidden_units, self.seed)?
            .compile(config.learning_rate)?;
        let run = self.trainer.fit(compiled, data, config.batch_size)?;
        Ok(run.history)
    }

    /// Trains every grid point in order, one after another.
    ///
    /// The whole grid is validated before any training. The first failing
    /// configuration aborts the sweep with `Error::SweepAborted`.
    pub fn run(&self, data: &Dataset) -> Result<SweepResult> {
        let configs = self.prepare(data)?;
        let total = configs.len();
        let mut result = SweepResult::default();

        for (idx, config) in configs.into_iter().enumerate() {
            info!(run = idx + 1, total, %config, "training configuration");
            let history = self.run_config(&config, data).map_err(|e| abort(config, e))?;
            if let Some(last) = history.last() {
                info!(%config, loss = last.loss, accuracy = last.accuracy, "configuration finished");
            }
            result.push(config, history);
        }

        Ok(result)
    }

    /// Same as `run`, with configurations trained concurrently on the rayon
    /// pool. Entries keep grid order, and if several configurations fail the
    /// one earliest in grid order is reported.
    pub fn run_parallel(&self, data: &Dataset) -> Result<SweepResult> {
        let configs = self.prepare(data)?;
        info!(total = configs.len(), "training configurations in parallel");

        let outcomes: Vec<Result<LossHistory>> = configs
            .par_iter()
            .map(|config| self.run_config(config, data))
            .collect();

        let mut result = SweepResult::default();
        for (config, outcome) in configs.into_iter().zip(outcomes) {
            let history = outcome.map_err(|e| abort(config, e))?;
            result.push(config, history);
        }
        Ok(result)
    }

    fn prepare(&self, data: &Dataset) -> Result<Vec<HyperparameterConfig>> {
        self.grid.validate()?;
        if data.is_empty() {
            return Err(Error::shape("dataset must not be empty"));
        }
        let configs = self.grid.configs();
        info!(
            configurations = configs.len(),
            examples = data.len(),
            epochs = self.trainer.epochs(),
            seed = self.seed,
            "starting sweep"
        );
        Ok(configs)
    }
}

fn abort(config: HyperparameterConfig, source: Error) -> Error {
    error!(%config, error = %source, "aborting sweep");
    Error::SweepAborted {
        config,
        source: Box::new(source),
    }
}
