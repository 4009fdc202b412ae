use serde::{Serialize, Deserialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Sigmoid,
    ReLU,
    Tanh,
    Identity,
}

impl ActivationFunction {
    /// Element-wise activation.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => sigmoid(x),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::Identity => x,
        }
    }

    /// Element-wise derivative, evaluated at the pre-activation `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => {
                let fx = sigmoid(x);
                fx * (1.0 - fx)
            },
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::Identity => 1.0,
        }
    }
}

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActivationFunction::Sigmoid => "Sigmoid",
            ActivationFunction::ReLU => "ReLU",
            ActivationFunction::Tanh => "Tanh",
            ActivationFunction::Identity => "Identity",
        };
        write!(f, "{}()", name)
    }
}

// Split on sign so exp() never overflows for large |x|.
fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_stable_at_extremes() {
        let s = ActivationFunction::Sigmoid;
        assert_eq!(s.function(0.0), 0.5);
        assert!(s.function(-1000.0).is_finite());
        assert!(s.function(1000.0) <= 1.0);
        assert!((s.derivative(0.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn relu_zeroes_negative_side() {
        let r = ActivationFunction::ReLU;
        assert_eq!(r.function(-3.0), 0.0);
        assert_eq!(r.function(2.5), 2.5);
        assert_eq!(r.derivative(-3.0), 0.0);
        assert_eq!(r.derivative(2.5), 1.0);
    }

    #[test]
    fn display_matches_module_style() {
        assert_eq!(ActivationFunction::ReLU.to_string(), "ReLU()");
        assert_eq!(ActivationFunction::Sigmoid.to_string(), "Sigmoid()");
    }
}
