//! Binding an optimizer, loss and metrics to a constructed model.

use crate::activation::ActivationType;
use crate::{Error, Loss, Metric, Model, Optimizer, Result};

/// A model paired with the optimizer, loss and metrics it will be trained with.
#[derive(Debug, Clone)]
pub struct CompiledModel {
    model: Model,
    optimizer: Optimizer,
    loss: Loss,
    metrics: Vec<Metric>,
}

impl Model {
    /// Binds SGD at `learning_rate`, categorical cross-entropy and accuracy.
    ///
    /// Cross-entropy is only defined over probability outputs, so the model's
    /// output layer must use softmax.
    pub fn compile(self, learning_rate: f32) -> Result<CompiledModel> {
        let optimizer = Optimizer::new(learning_rate)?;
        if self.output_activation() != Some(ActivationType::Softmax) {
            return Err(Error::config(
                "categorical cross-entropy requires a softmax output layer",
            ));
        }
        Ok(CompiledModel {
            model: self,
            optimizer,
            loss: Loss::CategoricalCrossEntropy,
            metrics: vec![Metric::Accuracy],
        })
    }
}

impl CompiledModel {
    /// Replaces the optimizer binding; the previous learning rate is dropped.
    pub fn recompile(self, learning_rate: f32) -> Result<CompiledModel> {
        self.model.compile(learning_rate)
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn optimizer(&self) -> &Optimizer {
        &self.optimizer
    }

    pub fn loss(&self) -> Loss {
        self.loss
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn into_model(self) -> Model {
        self.model
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Model, &Optimizer, Loss, &[Metric]) {
        (&mut self.model, &self.optimizer, self.loss, &self.metrics)
    }
}
