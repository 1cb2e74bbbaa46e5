//! Validated training data.
//!
//! Features and labels arrive already normalized and one-hot encoded; this
//! module only checks their shape before any training work starts.

use ndarray::{Array2, ArrayView2, Axis};

use crate::{Error, Result};

/// Width of a flattened 28x28 digit image.
pub const INPUT_WIDTH: usize = 784;

/// Number of digit classes.
pub const NUM_CLASSES: usize = 10;

const ROW_SUM_TOLERANCE: f32 = 1e-4;

/// Feature matrix and one-hot label matrix, aligned row for row.
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Array2<f32>,
    labels: Array2<f32>,
}

impl Dataset {
    /// Validates and wraps the feature and label matrices.
    ///
    /// Features must have `INPUT_WIDTH` finite columns, labels `NUM_CLASSES`
    /// columns with every row a probability distribution.
    pub fn new(features: Array2<f32>, labels: Array2<f32>) -> Result<Self> {
        if features.ncols() != INPUT_WIDTH {
            return Err(Error::shape(format!(
                "features must have {INPUT_WIDTH} columns, got {}",
                features.ncols()
            )));
        }
        if labels.ncols() != NUM_CLASSES {
            return Err(Error::shape(format!(
                "labels must have {NUM_CLASSES} columns, got {}",
                labels.ncols()
            )));
        }
        if features.nrows() != labels.nrows() {
            return Err(Error::shape(format!(
                "features have {} rows but labels have {}",
                features.nrows(),
                labels.nrows()
            )));
        }
        if features.nrows() == 0 {
            return Err(Error::shape("dataset must not be empty"));
        }
        if let Some(idx) = features
            .axis_iter(Axis(0))
            .position(|row| row.iter().any(|x| !x.is_finite()))
        {
            return Err(Error::shape(format!("feature row {idx} has non-finite values")));
        }
        for (idx, row) in labels.axis_iter(Axis(0)).enumerate() {
            if row.iter().any(|&y| !(0.0..=1.0).contains(&y)) {
                return Err(Error::shape(format!(
                    "label row {idx} has entries outside [0, 1]"
                )));
            }
            let sum = row.sum();
            if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
                return Err(Error::shape(format!(
                    "label row {idx} sums to {sum}, expected 1"
                )));
            }
        }

        Ok(Self { features, labels })
    }

    /// Builds a dataset from per-example feature and label vectors.
    pub fn from_rows(features: &[Vec<f32>], labels: &[Vec<f32>]) -> Result<Self> {
        Self::new(stack_rows(features, INPUT_WIDTH)?, stack_rows(labels, NUM_CLASSES)?)
    }

    /// A trivially separable set of `len` examples.
    ///
    /// Example `i` belongs to class `i % 10` and lights up the contiguous
    /// block of `INPUT_WIDTH / NUM_CLASSES` pixels owned by that class.
    pub fn separable_toy(len: usize) -> Result<Self> {
        let block = INPUT_WIDTH / NUM_CLASSES;
        let features = Array2::from_shape_fn((len, INPUT_WIDTH), |(i, p)| {
            if p / block == i % NUM_CLASSES {
                1.0
            } else {
                0.0
            }
        });
        let labels = Array2::from_shape_fn((len, NUM_CLASSES), |(i, c)| {
            if c == i % NUM_CLASSES {
                1.0
            } else {
                0.0
            }
        });
        Self::new(features, labels)
    }

    pub fn len(&self) -> usize {
        self.features.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn features(&self) -> ArrayView2<'_, f32> {
        self.features.view()
    }

    pub fn labels(&self) -> ArrayView2<'_, f32> {
        self.labels.view()
    }

    /// Contiguous `(features, labels)` chunks of `batch_size` rows; the last
    /// chunk may be shorter.
    ///
    /// Panics if `batch_size` is zero.
    pub fn batches(
        &self,
        batch_size: usize,
    ) -> impl Iterator<Item = (ArrayView2<'_, f32>, ArrayView2<'_, f32>)> {
        self.features
            .axis_chunks_iter(Axis(0), batch_size)
            .zip(self.labels.axis_chunks_iter(Axis(0), batch_size))
    }

    /// Number of batches `batches(batch_size)` yields.
    pub fn batch_count(&self, batch_size: usize) -> usize {
        self.len().div_ceil(batch_size)
    }
}

fn stack_rows(rows: &[Vec<f32>], width: usize) -> Result<Array2<f32>> {
    if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(Error::shape(format!(
            "row {idx} has length {}, expected {width}",
            row.len()
        )));
    }
    let flat: Vec<f32> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((rows.len(), width), flat).map_err(|e| Error::shape(e.to_string()))
}
