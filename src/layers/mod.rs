pub mod dense;

use std::fmt::Debug;

use ndarray::{Array1, Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::activation::ActivationType;

/// Learnable parameters of a layer together with the gradients and caches
/// produced by the most recent forward/backward pass.
///
/// `weights` has shape `(inputs, neurons)`; batches flow through as
/// `(rows, inputs) -> (rows, neurons)`.
#[derive(Debug, Clone)]
pub struct LayerParams {
    pub neurons: usize,
    pub inputs: usize,
    pub weights: Array2<f32>,
    pub bias: Array1<f32>,
    pub activation: ActivationType,
    pub weight_grads: Array2<f32>,
    pub bias_grads: Array1<f32>,
    pub input_cache: Array2<f32>,
    pub preactivation_cache: Array2<f32>,
}

/// Weight initialization strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightInitStrategy {
    /// Uniform random initialization between -1 and 1
    Random,

    /// Xavier/Glorot uniform initialization
    Xavier,

    /// He initialization (good for ReLU networks)
    HeNormal,
}

impl WeightInitStrategy {
    /// Default strategy for a layer followed by `activation`.
    pub fn for_activation(activation: ActivationType) -> Self {
        match activation {
            ActivationType::ReLU => WeightInitStrategy::HeNormal,
            ActivationType::Sigmoid
            | ActivationType::Tanh
            | ActivationType::Linear
            | ActivationType::Softmax => WeightInitStrategy::Xavier,
        }
    }
}

pub trait Layer: Debug + Send + Sync {
    /// Forward pass over a batch, caching what `backward` needs.
    fn forward(&mut self, input: &ArrayView2<f32>) -> Array2<f32>;

    /// Forward pass without touching the caches.
    fn infer(&self, input: &ArrayView2<f32>) -> Array2<f32>;

    /// Stores parameter gradients for `grad_output` and returns the gradient
    /// w.r.t. this layer's input.
    fn backward(&mut self, grad_output: &Array2<f32>) -> Array2<f32>;

    fn clone_box(&self) -> Box<dyn Layer>;

    fn params(&self) -> &LayerParams;
    fn params_mut(&mut self) -> &mut LayerParams;

    fn parameter_count(&self) -> usize {
        let params = self.params();
        params.inputs * params.neurons + params.neurons
    }
}

impl Clone for Box<dyn Layer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

pub use dense::DenseLayer;
