use rand::Rng;
use serde::{Serialize, Deserialize};
use std::fmt;

use crate::error::Result;
use crate::layers::activation_layer::Activation;
use crate::layers::dense::Dense;
use crate::layers::layer::{self, Layer, Parameter};
use crate::math::matrix::Matrix;
use crate::network::model::Model;
use crate::network::spec::NetworkSpec;

/// An ordered container of layers applied one after another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequential {
    pub layers: Vec<Layer>,
}

impl Sequential {
    pub fn new(layers: Vec<Layer>) -> Sequential {
        Sequential { layers }
    }

    /// Builds a network from a validated spec; each `LayerSpec` becomes a
    /// `Linear` followed by its activation.
    pub fn from_spec<R: Rng + ?Sized>(spec: &NetworkSpec, rng: &mut R) -> Result<Sequential> {
        spec.validate()?;
        let layers = spec.layers.iter()
            .flat_map(|l| {
                let dense = Dense::with_init(l.input_size, l.size, l.init, rng);
                [Layer::Linear(dense), Layer::Activation(Activation::new(l.activation))]
            })
            .collect();
        Ok(Sequential { layers })
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> Result<Sequential> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl Model for Sequential {
    fn forward(&mut self, input: &Matrix) -> Matrix {
        layer::forward_all(&mut self.layers, input)
    }

    fn backward(&mut self, grad_output: &Matrix) {
        layer::backward_all(&mut self.layers, grad_output);
    }

    fn parameters(&mut self) -> Vec<Parameter<'_>> {
        self.layers.iter_mut().flat_map(|l| l.parameters()).collect()
    }
}

impl fmt::Display for Sequential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sequential(")?;
        layer::fmt_layer_list(f, &self.layers, 2)?;
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::loss::bce::BceLoss;
    use crate::network::spec::LayerSpec;
    use rand::{rngs::StdRng, SeedableRng};

    fn mlp_spec() -> NetworkSpec {
        NetworkSpec {
            name: "mlp".into(),
            layers: vec![
                LayerSpec::new(3, 2, ActivationFunction::Tanh),
                LayerSpec::new(1, 3, ActivationFunction::Sigmoid),
            ],
            learning_rate: 0.1,
        }
    }

    fn batch() -> (Matrix, Matrix) {
        (
            Matrix::from_data(vec![vec![0.3, -0.7], vec![-0.2, 0.9], vec![0.8, 0.1]]),
            Matrix::column(&[1.0, 0.0, 1.0]),
        )
    }

    #[test]
    fn from_spec_interleaves_linear_and_activation() {
        let mut rng = StdRng::seed_from_u64(1);
        let net = Sequential::from_spec(&mlp_spec(), &mut rng).unwrap();
        assert_eq!(net.layers.len(), 4);
        assert_eq!(
            net.to_string(),
            "Sequential(\n  (0): Linear(in_features=2, out_features=3, bias=True)\n  (1): Tanh()\n  \
             (2): Linear(in_features=3, out_features=1, bias=True)\n  (3): Sigmoid()\n)"
        );
    }

    #[test]
    fn parameter_count_matches_shapes() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut net = Sequential::from_spec(&mlp_spec(), &mut rng).unwrap();
        assert_eq!(net.num_parameters(), 2 * 3 + 3 + 3 * 1 + 1);
    }

    #[test]
    fn backprop_matches_finite_differences() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut net = Sequential::from_spec(&mlp_spec(), &mut rng).unwrap();
        let (x, y) = batch();

        let out = net.forward(&x);
        net.backward(&BceLoss::derivative(&out, &y));
        let analytic: Vec<Vec<f64>> = net.parameters().iter()
            .map(|p| p.grad.data.iter().flatten().copied().collect())
            .collect();

        let h = 1e-6;
        for (pi, grads) in analytic.iter().enumerate() {
            for (k, &g) in grads.iter().enumerate() {
                let nudge = |net: &mut Sequential, delta: f64| {
                    let mut params = net.parameters();
                    let cols = params[pi].value.cols;
                    params[pi].value.data[k / cols][k % cols] += delta;
                };
                nudge(&mut net, h);
                let up = BceLoss::loss(&net.forward(&x), &y);
                nudge(&mut net, -2.0 * h);
                let down = BceLoss::loss(&net.forward(&x), &y);
                nudge(&mut net, h);
                let numeric = (up - down) / (2.0 * h);
                assert!(
                    (numeric - g).abs() < 1e-6,
                    "param {} elem {}: numeric {} vs analytic {}", pi, k, numeric, g
                );
            }
        }
    }

    #[test]
    fn json_round_trip_preserves_predictions() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut net = Sequential::from_spec(&mlp_spec(), &mut rng).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");
        let path = path.to_str().unwrap();

        net.save_json(path).unwrap();
        let mut loaded = Sequential::load_json(path).unwrap();

        let (x, _) = batch();
        let (a, b) = (net.forward(&x), loaded.forward(&x));
        for (p, q) in a.data.iter().flatten().zip(b.data.iter().flatten()) {
            assert!((p - q).abs() < 1e-12);
        }
        // Grad buffers are rebuilt lazily after a load.
        assert_eq!(loaded.num_parameters(), net.num_parameters());
    }
}
