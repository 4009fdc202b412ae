use rand::Rng;
use serde::{Serialize, Deserialize};
use std::fmt;

use crate::layers::init::Init;
use crate::layers::layer::Parameter;
use crate::math::matrix::Matrix;

/// Fully-connected layer computing `y = xW + b` over a batch of rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dense {
    pub in_features: usize,
    pub out_features: usize,
    pub weights: Matrix,
    pub biases: Matrix,
    #[serde(skip)]
    weights_grad: Matrix,
    #[serde(skip)]
    biases_grad: Matrix,
    #[serde(skip)]
    input: Matrix, // last forward input, needed for the weight gradient
}

impl Dense {
    /// Weights and biases are drawn from `U(-1/sqrt(in), 1/sqrt(in))`.
    pub fn new<R: Rng + ?Sized>(in_features: usize, out_features: usize, rng: &mut R) -> Dense {
        Dense::with_init(in_features, out_features, Init::FanInUniform, rng)
    }

    /// Draws weights with `init`, then biases from the fan-in bound.
    pub fn with_init<R: Rng + ?Sized>(in_features: usize, out_features: usize, init: Init, rng: &mut R) -> Dense {
        let weights = init.weights(in_features, out_features, rng);
        let bias_bound = Init::FanInUniform.bound(in_features, out_features);
        let biases = Matrix::uniform(1, out_features, bias_bound, rng);
        Dense::from_parts(weights, biases)
    }

    /// Builds a layer around existing parameters, e.g. after deserialization.
    pub fn from_parts(weights: Matrix, biases: Matrix) -> Dense {
        assert_eq!(biases.rows, 1, "biases must be a single row");
        assert_eq!(weights.cols, biases.cols, "weights and biases disagree on out_features");
        Dense {
            in_features: weights.rows,
            out_features: weights.cols,
            weights_grad: Matrix::zeros(weights.rows, weights.cols),
            biases_grad: Matrix::zeros(1, biases.cols),
            weights,
            biases,
            input: Matrix::default(),
        }
    }

    pub fn forward(&mut self, input: &Matrix) -> Matrix {
        let out = (input * &self.weights).add_row(&self.biases);
        self.input = input.clone();
        out
    }

    /// Accumulates parameter gradients and returns ∂L/∂input.
    /// `grad_output` is ∂L/∂y for the batch seen by the last `forward`.
    pub fn backward(&mut self, grad_output: &Matrix) -> Matrix {
        self.ensure_grad_buffers();
        let w_grad = &self.input.transpose() * grad_output;
        self.weights_grad.add_assign(&w_grad);
        self.biases_grad.add_assign(&grad_output.sum_rows());
        grad_output * &self.weights.transpose()
    }

    pub fn parameters(&mut self) -> Vec<Parameter<'_>> {
        self.ensure_grad_buffers();
        vec![
            Parameter { name: "weight", value: &mut self.weights, grad: &mut self.weights_grad },
            Parameter { name: "bias", value: &mut self.biases, grad: &mut self.biases_grad },
        ]
    }

    pub fn weights_grad(&self) -> &Matrix {
        &self.weights_grad
    }

    pub fn biases_grad(&self) -> &Matrix {
        &self.biases_grad
    }

    // Grad buffers are skipped by serde; recreate them after a load.
    fn ensure_grad_buffers(&mut self) {
        if self.weights_grad.rows != self.weights.rows || self.weights_grad.cols != self.weights.cols {
            self.weights_grad = Matrix::zeros(self.weights.rows, self.weights.cols);
        }
        if self.biases_grad.cols != self.biases.cols || self.biases_grad.rows != 1 {
            self.biases_grad = Matrix::zeros(1, self.biases.cols);
        }
    }
}

impl fmt::Display for Dense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Linear(in_features={}, out_features={}, bias=True)",
            self.in_features, self.out_features
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn fixed_layer() -> Dense {
        Dense::from_parts(
            Matrix::from_data(vec![vec![1.0, -1.0], vec![2.0, 0.5]]),
            Matrix::from_data(vec![vec![0.5, 0.25]]),
        )
    }

    #[test]
    fn init_is_bounded_by_fan_in() {
        let mut rng = StdRng::seed_from_u64(1);
        let layer = Dense::new(4, 3, &mut rng);
        let bound = 0.5;
        assert!(layer.weights.data.iter().flatten().all(|w| w.abs() <= bound));
        assert!(layer.biases.data.iter().flatten().all(|b| b.abs() <= bound));
        assert_eq!((layer.weights.rows, layer.weights.cols), (4, 3));
    }

    #[test]
    fn default_init_matches_explicit_fan_in() {
        let a = Dense::new(2, 4, &mut StdRng::seed_from_u64(9));
        let b = Dense::with_init(2, 4, Init::FanInUniform, &mut StdRng::seed_from_u64(9));
        assert_eq!((a.weights, a.biases), (b.weights, b.biases));
    }

    #[test]
    fn xavier_init_keeps_fan_in_biases() {
        let layer = Dense::with_init(4, 16, Init::XavierUniform, &mut StdRng::seed_from_u64(2));
        assert!(layer.weights.data.iter().flatten().all(|w| w.abs() < (6.0f64 / 20.0).sqrt()));
        assert!(layer.biases.data.iter().flatten().all(|b| b.abs() <= 0.5));
    }

    #[test]
    fn forward_applies_weights_and_bias_per_row() {
        let mut layer = fixed_layer();
        let out = layer.forward(&Matrix::from_data(vec![vec![1.0, 1.0], vec![0.0, 2.0]]));
        assert_eq!(out.data, vec![vec![3.5, -0.25], vec![4.5, 1.25]]);
    }

    #[test]
    fn backward_accumulates_until_zeroed() {
        let mut layer = fixed_layer();
        let x = Matrix::from_data(vec![vec![1.0, 2.0]]);
        layer.forward(&x);
        let grad_in = layer.backward(&Matrix::from_data(vec![vec![1.0, 0.0]]));
        assert_eq!(grad_in.data, vec![vec![1.0, 2.0]]);
        assert_eq!(layer.weights_grad().data, vec![vec![1.0, 0.0], vec![2.0, 0.0]]);
        assert_eq!(layer.biases_grad().data, vec![vec![1.0, 0.0]]);

        layer.forward(&x);
        layer.backward(&Matrix::from_data(vec![vec![1.0, 0.0]]));
        assert_eq!(layer.biases_grad().data, vec![vec![2.0, 0.0]]);

        for mut p in layer.parameters() {
            p.grad.fill(0.0);
        }
        assert_eq!(layer.weights_grad().sum(), 0.0);
    }

    #[test]
    fn display_reads_like_a_linear_module() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            Dense::new(2, 4, &mut rng).to_string(),
            "Linear(in_features=2, out_features=4, bias=True)"
        );
    }
}
