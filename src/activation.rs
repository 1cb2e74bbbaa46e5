use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

/// Enum representing different activation function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationType {
    Sigmoid,
    ReLU,
    Tanh,
    Linear,
    /// Row-wise normalization onto the probability simplex. Only meaningful
    /// as the output activation paired with categorical cross-entropy.
    Softmax,
}

impl ActivationType {
    /// Applies the activation function to a given input.
    ///
    /// Softmax is not elementwise; for a single value it degenerates to 1.0.
    pub fn apply(&self, x: f32) -> f32 {
        match self {
            ActivationType::Sigmoid => sigmoid(x),
            ActivationType::ReLU => x.max(0.0),
            ActivationType::Tanh => x.tanh(),
            ActivationType::Linear => x,
            ActivationType::Softmax => 1.0,
        }
    }

    /// Computes the derivative of the activation function at the preactivation `x`.
    ///
    /// Softmax returns 1.0: its Jacobian is folded into the cross-entropy
    /// gradient, so the output layer receives `dL/dz` directly.
    pub fn derivative(&self, x: f32) -> f32 {
        match self {
            ActivationType::Sigmoid => {
                let s = sigmoid(x);
                s * (1.0 - s)
            }
            ActivationType::ReLU => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            ActivationType::Tanh => 1.0 - x.tanh().powi(2),
            ActivationType::Linear | ActivationType::Softmax => 1.0,
        }
    }

    /// Applies the activation to a batch of preactivations, one row per example.
    pub fn forward(&self, z: Array2<f32>) -> Array2<f32> {
        match self {
            ActivationType::Softmax => softmax_rows(z),
            act => z.mapv_into(|x| act.apply(x)),
        }
    }
}

#[inline]
fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

fn softmax_rows(mut z: Array2<f32>) -> Array2<f32> {
    for mut row in z.axis_iter_mut(Axis(0)) {
        let max = row.fold(f32::NEG_INFINITY, |m, &x| m.max(x));
        row.mapv_inplace(|x| (x - max).exp());
        let sum = row.sum();
        row.mapv_inplace(|x| x / sum);
    }
    z
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::f32::EPSILON;

    #[test]
    fn test_activation_functions() {
        // Sigmoid tests
        assert!((ActivationType::Sigmoid.apply(0.0) - 0.5).abs() < EPSILON);

        // ReLU tests
        assert_eq!(ActivationType::ReLU.apply(-1.0), 0.0);
        assert_eq!(ActivationType::ReLU.apply(2.0), 2.0);

        // Tanh tests
        assert!((ActivationType::Tanh.apply(0.0)).abs() < EPSILON);

        // Linear tests
        assert_eq!(ActivationType::Linear.apply(5.0), 5.0);
    }

    #[test]
    fn test_activation_derivatives() {
        assert!((ActivationType::Sigmoid.derivative(0.0) - 0.25).abs() < EPSILON);

        assert_eq!(ActivationType::ReLU.derivative(-1.0), 0.0);
        assert_eq!(ActivationType::ReLU.derivative(2.0), 1.0);

        assert!((ActivationType::Tanh.derivative(0.0) - 1.0).abs() < EPSILON);

        assert_eq!(ActivationType::Linear.derivative(5.0), 1.0);
    }

    #[test]
    fn test_sigmoid_is_bounded() {
        let out = ActivationType::Sigmoid.forward(array![[-50.0, -1.0, 0.0, 1.0, 50.0]]);
        assert!(out.iter().all(|&x| (0.0..=1.0).contains(&x)));
        assert!(out[[0, 1]] < out[[0, 3]]);
    }

    #[test]
    fn test_softmax_rows_are_distributions() {
        let out = ActivationType::Softmax.forward(array![[1.0, 2.0, 3.0], [1000.0, 0.0, -1000.0]]);
        for row in out.rows() {
            assert!((row.sum() - 1.0).abs() < 1e-6);
            assert!(row.iter().all(|&p| (0.0..=1.0).contains(&p)));
        }
        // large logits must not overflow
        assert!((out[[1, 0]] - 1.0).abs() < 1e-6);
        assert!(out[[0, 2]] > out[[0, 1]] && out[[0, 1]] > out[[0, 0]]);
    }
}
