use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::math::matrix::Matrix;

/// How a `Dense` layer draws its starting weights. Biases always use the
/// fan-in bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Init {
    /// `U(-1/sqrt(fan_in), 1/sqrt(fan_in))`.
    #[default]
    FanInUniform,
    /// Glorot uniform: `U(-a, a)` with `a = sqrt(6 / (fan_in + fan_out))`.
    /// Suits Sigmoid/Tanh layers.
    XavierUniform,
}

impl Init {
    pub fn bound(self, fan_in: usize, fan_out: usize) -> f64 {
        match self {
            Init::FanInUniform => 1.0 / (fan_in as f64).sqrt(),
            Init::XavierUniform => (6.0 / (fan_in + fan_out) as f64).sqrt(),
        }
    }

    /// An `in × out` weight matrix.
    pub fn weights<R: Rng + ?Sized>(self, fan_in: usize, fan_out: usize, rng: &mut R) -> Matrix {
        Matrix::uniform(fan_in, fan_out, self.bound(fan_in, fan_out), rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn xavier_bound_uses_both_fans() {
        assert!((Init::XavierUniform.bound(2, 4) - 1.0).abs() < 1e-12);
        assert!((Init::FanInUniform.bound(4, 100) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn xavier_weights_stay_inside_bound() {
        let mut rng = StdRng::seed_from_u64(3);
        let w = Init::XavierUniform.weights(4, 16, &mut rng);
        let bound = (6.0f64 / 20.0).sqrt();
        assert_eq!((w.rows, w.cols), (4, 16));
        assert!(w.data.iter().flatten().all(|x| x.abs() < bound));
    }

    #[test]
    fn serializes_as_snake_case() {
        assert_eq!(serde_json::to_string(&Init::XavierUniform).unwrap(), "\"xavier_uniform\"");
    }
}
