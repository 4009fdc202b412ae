use serde::{Serialize, Deserialize};

use crate::math::matrix::Matrix;

/// One labelled point: two coordinates and a 0/1 class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub features: [f64; 2],
    pub label: f64,
}

/// Stacks samples into an `n × 2` input matrix and an `n × 1` label column.
pub fn samples_to_matrices(samples: &[Sample]) -> (Matrix, Matrix) {
    let inputs = Matrix {
        rows: samples.len(),
        cols: 2,
        data: samples.iter().map(|s| s.features.to_vec()).collect(),
    };
    let labels = Matrix::column(&samples.iter().map(|s| s.label).collect::<Vec<_>>());
    (inputs, labels)
}
