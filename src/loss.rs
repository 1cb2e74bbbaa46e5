use ndarray::{Array2, ArrayView2, Zip};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Loss {
    /// Categorical cross-entropy over softmax outputs and distribution targets.
    CategoricalCrossEntropy,
}

impl Loss {
    /// Mean loss over the rows of a batch.
    ///
    /// Cross entropy: -Σ(target * ln(prediction)). Entries with a zero target
    /// contribute nothing; a zero prediction on a positive target yields +inf.
    pub fn calculate(&self, prediction: &Array2<f32>, target: &ArrayView2<f32>) -> f32 {
        assert_eq!(
            prediction.dim(),
            target.dim(),
            "prediction shape does not match target shape"
        );
        match self {
            Loss::CategoricalCrossEntropy => {
                let rows = prediction.nrows();
                if rows == 0 {
                    return 0.0;
                }
                let total = Zip::from(prediction)
                    .and(target)
                    .fold(0.0_f32, |acc, &p, &t| {
                        if t > 0.0 {
                            acc - t * p.ln()
                        } else {
                            acc
                        }
                    });
                total / rows as f32
            }
        }
    }

    /// Gradient of the mean batch loss w.r.t. the output layer preactivations.
    ///
    /// Assumes a softmax output layer: `(prediction - target) / rows`.
    pub fn gradient(&self, prediction: &Array2<f32>, target: &ArrayView2<f32>) -> Array2<f32> {
        match self {
            Loss::CategoricalCrossEntropy => {
                let rows = prediction.nrows().max(1) as f32;
                (prediction - target) / rows
            }
        }
    }
}
