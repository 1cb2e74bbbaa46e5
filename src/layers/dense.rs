use ndarray::{Array1, Array2, ArrayView2, Axis};
use rand::distr::Uniform;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::{Layer, LayerParams, WeightInitStrategy};
use crate::activation::ActivationType;
use crate::{Error, Result};

/// Fully connected layer: `activation(input · weights + bias)`.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    pub params: LayerParams,
}

impl DenseLayer {
    /// Constructs a new layer with freshly sampled weights and zero biases.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Number of inputs to this layer
    /// * `neurons` - Number of neurons in this layer
    /// * `activation` - Activation function type for the layer
    /// * `weight_init` - Weight initialization strategy
    /// * `rng` - Source of randomness for the weights
    pub fn new<R: Rng + ?Sized>(
        inputs: usize,
        neurons: usize,
        activation: ActivationType,
        weight_init: WeightInitStrategy,
        rng: &mut R,
    ) -> Result<Self> {
        if inputs == 0 || neurons == 0 {
            return Err(Error::config(format!(
                "layer dimensions must be > 0, got {inputs} inputs and {neurons} neurons"
            )));
        }

        let shape = (inputs, neurons);
        let weights = match weight_init {
            WeightInitStrategy::Random => {
                let dist = Uniform::new(-1.0_f32, 1.0).map_err(|e| Error::config(e.to_string()))?;
                sample(shape, &dist, rng)
            }
            WeightInitStrategy::Xavier => {
                let limit = (6.0 / (inputs + neurons) as f32).sqrt();
                let dist = Uniform::new(-limit, limit).map_err(|e| Error::config(e.to_string()))?;
                sample(shape, &dist, rng)
            }
            WeightInitStrategy::HeNormal => {
                let std_dev = (2.0 / inputs as f32).sqrt();
                let dist = Normal::new(0.0, std_dev).map_err(|e| Error::config(e.to_string()))?;
                sample(shape, &dist, rng)
            }
        };

        let params = LayerParams {
            neurons,
            inputs,
            weights,
            bias: Array1::zeros(neurons),
            activation,
            weight_grads: Array2::zeros(shape),
            bias_grads: Array1::zeros(neurons),
            input_cache: Array2::zeros((0, inputs)),
            preactivation_cache: Array2::zeros((0, neurons)),
        };

        Ok(DenseLayer { params })
    }

    fn preactivation(&self, input: &ArrayView2<f32>) -> Array2<f32> {
        assert_eq!(
            input.ncols(),
            self.params.inputs,
            "Input size does not match layer's input size"
        );
        input.dot(&self.params.weights) + &self.params.bias
    }
}

fn sample<D, R>(shape: (usize, usize), dist: &D, rng: &mut R) -> Array2<f32>
where
    D: Distribution<f32>,
    R: Rng + ?Sized,
{
    Array2::from_shape_fn(shape, |_| dist.sample(&mut *rng))
}

impl Layer for DenseLayer {
    fn forward(&mut self, input: &ArrayView2<f32>) -> Array2<f32> {
        let z = self.preactivation(input);
        self.params.input_cache = input.to_owned();
        self.params.preactivation_cache = z.clone();
        self.params.activation.forward(z)
    }

    fn infer(&self, input: &ArrayView2<f32>) -> Array2<f32> {
        self.params.activation.forward(self.preactivation(input))
    }

    fn backward(&mut self, grad_output: &Array2<f32>) -> Array2<f32> {
        let params = &mut self.params;

        // Softmax output layers already receive dL/dz from the loss
        let delta = match params.activation {
            ActivationType::Softmax => grad_output.clone(),
            act => grad_output * &params.preactivation_cache.mapv(|z| act.derivative(z)),
        };

        params.weight_grads = params.input_cache.t().dot(&delta);
        params.bias_grads = delta.sum_axis(Axis(0));
        delta.dot(&params.weights.t())
    }

    fn clone_box(&self) -> Box<dyn Layer> {
        Box::new(self.clone())
    }

    fn params(&self) -> &LayerParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut LayerParams {
        &mut self.params
    }
}
