//! The train-once primitive the sweep repeats.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::compile::CompiledModel;
use crate::{Dataset, Error, Model, Result};

/// Loss and accuracy recorded at the end of one epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochRecord {
    /// 0-based epoch index.
    pub epoch: usize,
    /// Mean per-example training loss over the epoch.
    pub loss: f32,
    /// Training accuracy over the epoch, in `[0, 1]`.
    pub accuracy: f32,
}

/// Per-epoch training record, in epoch order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LossHistory {
    records: Vec<EpochRecord>,
}

impl LossHistory {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&EpochRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&EpochRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EpochRecord> {
        self.records.iter()
    }

    /// Just the loss values, one per epoch.
    pub fn losses(&self) -> Vec<f32> {
        self.records.iter().map(|r| r.loss).collect()
    }

    fn push(&mut self, record: EpochRecord) {
        self.records.push(record);
    }
}

/// Outcome of one `Trainer::fit` call.
#[derive(Debug, Clone)]
pub struct TrainingRun {
    pub model: Model,
    pub history: LossHistory,
    /// Optimizer updates applied in total.
    pub updates: usize,
    /// Optimizer updates applied per epoch, `ceil(examples / batch_size)`.
    pub updates_per_epoch: usize,
}

/// Runs mini-batch gradient descent for a fixed number of epochs.
#[derive(Debug, Clone, Copy)]
pub struct Trainer {
    epochs: usize,
}

impl Default for Trainer {
    fn default() -> Self {
        Trainer {
            epochs: Self::DEFAULT_EPOCHS,
        }
    }
}

impl Trainer {
    pub const DEFAULT_EPOCHS: usize = 100;

    pub fn new(epochs: usize) -> Result<Self> {
        if epochs == 0 {
            return Err(Error::config("epochs must be > 0"));
        }
        Ok(Self { epochs })
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    /// Trains `compiled` on `data` in contiguous, unshuffled batches.
    ///
    /// `batch_size == 1` is stochastic descent, `batch_size >= data.len()` is
    /// full-batch descent. Stops with `Error::Training` on the first batch
    /// whose loss is not finite.
    pub fn fit(
        &self,
        mut compiled: CompiledModel,
        data: &Dataset,
        batch_size: usize,
    ) -> Result<TrainingRun> {
        if batch_size == 0 {
            return Err(Error::config("batch size must be > 0"));
        }
        if compiled.model().input_width() != data.features().ncols() {
            return Err(Error::shape(format!(
                "model expects {} inputs but features have {} columns",
                compiled.model().input_width(),
                data.features().ncols()
            )));
        }
        if compiled.model().output_width() != data.labels().ncols() {
            return Err(Error::shape(format!(
                "model outputs {} classes but labels have {} columns",
                compiled.model().output_width(),
                data.labels().ncols()
            )));
        }

        let updates_per_epoch = data.batch_count(batch_size);
        let mut history = LossHistory::default();
        let mut updates = 0;
        let (model, optimizer, loss_fn, metrics) = compiled.parts_mut();

        for epoch in 0..self.epochs {
            let mut loss_sum = 0.0_f32;
            let mut correct = 0;

            for (batch, (inputs, targets)) in data.batches(batch_size).enumerate() {
                let outputs = model.forward(&inputs);
                let loss = loss_fn.calculate(&outputs, &targets);
                if !loss.is_finite() {
                    warn!(epoch, batch, loss, "non-finite loss, stopping");
                    return Err(Error::Training { epoch, batch, loss });
                }
                loss_sum += loss * inputs.nrows() as f32;
                if let Some(metric) = metrics.first() {
                    correct += metric.correct(&outputs.view(), &targets);
                }

                model.backward(loss_fn.gradient(&outputs, &targets));
                for layer in model.layers.iter_mut() {
                    optimizer.step(layer.params_mut());
                }
                updates += 1;
            }

            let record = EpochRecord {
                epoch,
                loss: loss_sum / data.len() as f32,
                accuracy: correct as f32 / data.len() as f32,
            };
            debug!(epoch, loss = record.loss, accuracy = record.accuracy, "epoch complete");
            history.push(record);
        }

        Ok(TrainingRun {
            model: compiled.into_model(),
            history,
            updates,
            updates_per_epoch,
        })
    }
}
