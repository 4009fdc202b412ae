use serde::{Serialize, Deserialize};
use std::fmt;

use crate::activation::activation::ActivationFunction;
use crate::math::matrix::Matrix;

/// Parameter-free layer applying an activation element-wise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activation {
    pub activator: ActivationFunction,
    #[serde(skip)]
    pre_activation: Matrix,
}

impl Activation {
    pub fn new(activator: ActivationFunction) -> Activation {
        Activation { activator, pre_activation: Matrix::default() }
    }

    pub fn forward(&mut self, input: &Matrix) -> Matrix {
        let out = input.map(|x| self.activator.function(x));
        self.pre_activation = input.clone();
        out
    }

    /// δ = grad_output ⊙ σ'(z), using the cached pre-activation z.
    pub fn backward(&self, grad_output: &Matrix) -> Matrix {
        let act_derivative = self.pre_activation.map(|x| self.activator.derivative(x));
        grad_output.hadamard(&act_derivative)
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.activator)
    }
}
