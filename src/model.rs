use ndarray::{Array2, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::activation::ActivationType;
use crate::data::{INPUT_WIDTH, NUM_CLASSES};
use crate::layers::{DenseLayer, Layer, WeightInitStrategy};
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct Model {
    pub layers: Vec<Box<dyn Layer>>,
}

#[derive(Debug, Clone, Copy)]
pub struct LayerConfig {
    pub neurons: usize,
    pub inputs: usize,
    pub activation: ActivationType,
}

impl Model {
    /// Create a new neural network model with specified layer configurations
    ///
    /// Each layer's `inputs` must equal the previous layer's `neurons`.
    /// Weights are initialized with the default strategy for the layer's
    /// activation, drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(layer_configs: Vec<LayerConfig>, rng: &mut R) -> Result<Self> {
        if layer_configs.is_empty() {
            return Err(Error::config("model must have at least one layer"));
        }

        let mut layers: Vec<Box<dyn Layer>> = Vec::with_capacity(layer_configs.len());
        let mut previous: Option<usize> = None;
        for config in layer_configs {
            if let Some(neurons) = previous {
                if config.inputs != neurons {
                    return Err(Error::config(format!(
                        "layer expects {} inputs but previous layer has {} neurons",
                        config.inputs, neurons
                    )));
                }
            }
            let layer = DenseLayer::new(
                config.inputs,
                config.neurons,
                config.activation,
                WeightInitStrategy::for_activation(config.activation),
                &mut *rng,
            )?;
            layers.push(Box::new(layer));
            previous = Some(config.neurons);
        }

        Ok(Model { layers })
    }

    /// Untrained digit classifier: `784 -> hidden_units (sigmoid) -> 10 (softmax)`.
    ///
    /// The same `(hidden_units, seed)` pair always produces identical weights.
    pub fn classifier(hidden_units: usize, seed: u64) -> Result<Self> {
        if hidden_units == 0 {
            return Err(Error::config("hidden units must be > 0"));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        Model::new(
            vec![
                LayerConfig {
                    inputs: INPUT_WIDTH,
                    neurons: hidden_units,
                    activation: ActivationType::Sigmoid,
                },
                LayerConfig {
                    inputs: hidden_units,
                    neurons: NUM_CLASSES,
                    activation: ActivationType::Softmax,
                },
            ],
            &mut rng,
        )
    }

    pub fn input_width(&self) -> usize {
        self.layers.first().map_or(0, |l| l.params().inputs)
    }

    pub fn output_width(&self) -> usize {
        self.layers.last().map_or(0, |l| l.params().neurons)
    }

    pub fn output_activation(&self) -> Option<ActivationType> {
        self.layers.last().map(|l| l.params().activation)
    }

    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(|l| l.parameter_count()).sum()
    }

    /// Training forward pass; every layer caches its inputs for `backward`.
    pub fn forward(&mut self, input: &ArrayView2<f32>) -> Array2<f32> {
        let mut current = input.to_owned();
        for layer in &mut self.layers {
            current = layer.forward(&current.view());
        }
        current
    }

    /// Backpropagates `grad_output` (dL/dz of the output layer) through the stack.
    pub fn backward(&mut self, grad_output: Array2<f32>) {
        let mut grad = grad_output;
        for layer in self.layers.iter_mut().rev() {
            grad = layer.backward(&grad);
        }
    }

    /// Inference over a batch of rows. Panics if the row width is wrong.
    pub fn predict(&self, input: &ArrayView2<f32>) -> Array2<f32> {
        let mut current = input.to_owned();
        for layer in &self.layers {
            current = layer.infer(&current.view());
        }
        current
    }
}
