use serde::{Deserialize, Serialize};

use crate::layers::LayerParams;
use crate::{Error, Result};

/// Plain first-order gradient descent: `θ ← θ - lr * ∇θ`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Optimizer {
    learning_rate: f32,
}

impl Optimizer {
    pub fn new(learning_rate: f32) -> Result<Self> {
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(Error::config(format!(
                "learning rate must be finite and > 0, got {learning_rate}"
            )));
        }
        Ok(Self { learning_rate })
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    /// Applies one update using the gradients accumulated in `params`.
    pub fn step(&self, params: &mut LayerParams) {
        params.weights.scaled_add(-self.learning_rate, &params.weight_grads);
        params.bias.scaled_add(-self.learning_rate, &params.bias_grads);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ActivationType;
    use ndarray::{array, Array2};

    fn params() -> LayerParams {
        LayerParams {
            neurons: 2,
            inputs: 1,
            weights: array![[1.0, -1.0]],
            bias: array![0.5, 0.5],
            activation: ActivationType::Linear,
            weight_grads: array![[2.0, 4.0]],
            bias_grads: array![1.0, -1.0],
            input_cache: Array2::zeros((0, 1)),
            preactivation_cache: Array2::zeros((0, 2)),
        }
    }

    #[test]
    fn test_rejects_non_positive_learning_rate() {
        assert!(Optimizer::new(0.0).is_err());
        assert!(Optimizer::new(-0.5).is_err());
        assert!(Optimizer::new(f32::NAN).is_err());
        assert!(Optimizer::new(f32::INFINITY).is_err());
    }

    #[test]
    fn test_step_moves_against_gradient() {
        let mut p = params();
        Optimizer::new(0.5).unwrap().step(&mut p);
        assert_eq!(p.weights, array![[0.0_f32, -3.0]]);
        assert_eq!(p.bias, array![0.0_f32, 1.0]);
    }
}
