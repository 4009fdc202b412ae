use serde::{Serialize, Deserialize};
use std::fmt;

use crate::layers::activation_layer::Activation;
use crate::layers::dense::Dense;
use crate::math::matrix::Matrix;

/// A trainable tensor paired with its accumulated gradient.
#[derive(Debug)]
pub struct Parameter<'a> {
    pub name: &'static str,
    pub value: &'a mut Matrix,
    pub grad: &'a mut Matrix,
}

/// One entry of a layer list: either a linear transform or an activation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Layer {
    Linear(Dense),
    Activation(Activation),
}

impl Layer {
    pub fn forward(&mut self, input: &Matrix) -> Matrix {
        match self {
            Layer::Linear(dense) => dense.forward(input),
            Layer::Activation(act) => act.forward(input),
        }
    }

    pub fn backward(&mut self, grad_output: &Matrix) -> Matrix {
        match self {
            Layer::Linear(dense) => dense.backward(grad_output),
            Layer::Activation(act) => act.backward(grad_output),
        }
    }

    pub fn parameters(&mut self) -> Vec<Parameter<'_>> {
        match self {
            Layer::Linear(dense) => dense.parameters(),
            Layer::Activation(_) => Vec::new(),
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Linear(dense) => write!(f, "{}", dense),
            Layer::Activation(act) => write!(f, "{}", act),
        }
    }
}

/// Runs `input` through `layers` in order.
pub fn forward_all(layers: &mut [Layer], input: &Matrix) -> Matrix {
    layers.iter_mut().fold(input.clone(), |x, layer| layer.forward(&x))
}

/// Back-propagates `grad_output` through `layers` in reverse order,
/// accumulating parameter gradients along the way.
pub fn backward_all(layers: &mut [Layer], grad_output: &Matrix) -> Matrix {
    layers.iter_mut().rev().fold(grad_output.clone(), |g, layer| layer.backward(&g))
}

/// Writes a numbered, indented listing of `layers`, one per line.
pub fn fmt_layer_list(f: &mut fmt::Formatter<'_>, layers: &[Layer], indent: usize) -> fmt::Result {
    let pad = " ".repeat(indent);
    for (i, layer) in layers.iter().enumerate() {
        writeln!(f, "{}({}): {}", pad, i, layer)?;
    }
    Ok(())
}
