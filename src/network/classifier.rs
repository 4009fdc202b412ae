use rand::Rng;
use serde::{Serialize, Deserialize};
use std::fmt;

use crate::activation::activation::ActivationFunction;
use crate::layers::activation_layer::Activation;
use crate::layers::dense::Dense;
use crate::layers::layer::{self, Layer, Parameter};
use crate::math::matrix::Matrix;
use crate::network::model::Model;

/// Probability at or above which a sample is assigned class 1.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Two-hidden-layer ReLU classifier held as an explicit module list:
/// Linear(2→4), ReLU, Linear(4→4), ReLU, Linear(4→1), Sigmoid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XorClassifier {
    pub module_list: Vec<Layer>,
}

impl XorClassifier {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> XorClassifier {
        let l1 = Layer::Linear(Dense::new(2, 4, rng));
        let a1 = Layer::Activation(Activation::new(ActivationFunction::ReLU));
        let l2 = Layer::Linear(Dense::new(4, 4, rng));
        let a2 = Layer::Activation(Activation::new(ActivationFunction::ReLU));
        let l3 = Layer::Linear(Dense::new(4, 1, rng));
        let a3 = Layer::Activation(Activation::new(ActivationFunction::Sigmoid));
        XorClassifier { module_list: vec![l1, a1, l2, a2, l3, a3] }
    }

    /// Hard 0/1 class per row of `input`.
    pub fn predict(&mut self, input: &Matrix) -> Vec<f64> {
        self.forward(input)
            .col(0)
            .into_iter()
            .map(|p| if p >= DECISION_THRESHOLD { 1.0 } else { 0.0 })
            .collect()
    }
}

impl Model for XorClassifier {
    fn forward(&mut self, input: &Matrix) -> Matrix {
        layer::forward_all(&mut self.module_list, input)
    }

    fn backward(&mut self, grad_output: &Matrix) {
        layer::backward_all(&mut self.module_list, grad_output);
    }

    fn parameters(&mut self) -> Vec<Parameter<'_>> {
        self.module_list.iter_mut().flat_map(|l| l.parameters()).collect()
    }
}

impl fmt::Display for XorClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "XorClassifier(")?;
        writeln!(f, "  (module_list): ModuleList(")?;
        layer::fmt_layer_list(f, &self.module_list, 4)?;
        writeln!(f, "  )")?;
        write!(f, ")")
    }
}
