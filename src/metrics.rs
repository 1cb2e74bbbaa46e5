use ndarray::{ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    /// Fraction of rows whose predicted argmax matches the label argmax.
    Accuracy,
}

impl Metric {
    /// Number of rows counted as correct under this metric.
    pub fn correct(&self, prediction: &ArrayView2<f32>, target: &ArrayView2<f32>) -> usize {
        match self {
            Metric::Accuracy => prediction
                .axis_iter(Axis(0))
                .zip(target.axis_iter(Axis(0)))
                .filter(|(p, t)| argmax(p) == argmax(t))
                .count(),
        }
    }

    pub fn evaluate(&self, prediction: &ArrayView2<f32>, target: &ArrayView2<f32>) -> f32 {
        let rows = prediction.nrows();
        if rows == 0 {
            return 0.0;
        }
        self.correct(prediction, target) as f32 / rows as f32
    }
}

/// Index of the largest entry; the first one wins ties.
pub fn argmax(row: &ArrayView1<f32>) -> usize {
    let mut best = 0;
    for (i, &x) in row.iter().enumerate() {
        if x > row[best] {
            best = i;
        }
    }
    best
}
