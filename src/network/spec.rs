use serde::{Serialize, Deserialize};
use crate::activation::activation::ActivationFunction;
use crate::error::{NnError, Result};
use crate::layers::init::Init;

/// Describes one linear layer and the activation applied after it.
///
/// Fields:
/// - `size`       — number of neurons in this layer
/// - `input_size` — number of neurons feeding into this layer (i.e. the output
///                  size of the previous layer, or the raw input dimension for
///                  the first layer)
/// - `activation` — activation function applied after the linear transform
/// - `init`       — weight initialization; fan-in uniform when omitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub input_size: usize,
    pub activation: ActivationFunction,
    #[serde(default)]
    pub init: Init,
}

impl LayerSpec {
    pub fn new(size: usize, input_size: usize, activation: ActivationFunction) -> LayerSpec {
        LayerSpec { size, input_size, activation, init: Init::default() }
    }

    pub fn with_init(mut self, init: Init) -> LayerSpec {
        self.init = init;
        self
    }
}

fn default_learning_rate() -> f64 {
    0.015
}

/// A serializable description of a binary classifier's architecture plus the
/// SGD learning rate it is trained with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name used as the report and model file stem.
    pub name: String,
    /// Ordered list of layer descriptions (input → output).
    pub layers: Vec<LayerSpec>,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
}

impl NetworkSpec {
    /// Checks that every layer has non-zero widths, that the layers chain,
    /// and that the last one emits a single probability.
    pub fn validate(&self) -> Result<()> {
        let last = self.layers.last().ok_or_else(|| NnError::ShapeMismatch {
            context: format!("network '{}' layer count", self.name),
            expected: 1,
            found: 0,
        })?;

        for (i, l) in self.layers.iter().enumerate() {
            if l.input_size == 0 || l.size == 0 {
                return Err(NnError::ShapeMismatch {
                    context: format!("network '{}' layer {} has a zero width", self.name, i),
                    expected: 1,
                    found: 0,
                });
            }
        }

        for (i, pair) in self.layers.windows(2).enumerate() {
            if pair[1].input_size != pair[0].size {
                return Err(NnError::ShapeMismatch {
                    context: format!("network '{}' layer {} input_size", self.name, i + 1),
                    expected: pair[0].size,
                    found: pair[1].input_size,
                });
            }
        }

        if last.size != 1 {
            return Err(NnError::ShapeMismatch {
                context: format!("network '{}' output size", self.name),
                expected: 1,
                found: last.size,
            });
        }

        Ok(())
    }

    /// Number of input features the first layer expects.
    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, |l| l.input_size)
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let spec: NetworkSpec = serde_json::from_reader(reader)?;
        spec.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mlp() -> NetworkSpec {
        NetworkSpec {
            name: "mlp".into(),
            layers: vec![
                LayerSpec::new(4, 2, ActivationFunction::ReLU),
                LayerSpec::new(1, 4, ActivationFunction::Sigmoid),
            ],
            learning_rate: 0.015,
        }
    }

    #[test]
    fn chained_spec_validates() {
        assert!(mlp().validate().is_ok());
        assert_eq!(mlp().input_size(), 2);
    }

    #[test]
    fn broken_chain_is_reported() {
        let mut spec = mlp();
        spec.layers[1].input_size = 3;
        match spec.validate() {
            Err(NnError::ShapeMismatch { expected, found, .. }) => {
                assert_eq!((expected, found), (4, 3));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn zero_width_layers_are_rejected() {
        let spec = NetworkSpec {
            name: "degenerate".into(),
            layers: vec![
                LayerSpec::new(0, 2, ActivationFunction::ReLU),
                LayerSpec::new(1, 0, ActivationFunction::Sigmoid),
            ],
            learning_rate: 0.015,
        };
        assert!(matches!(spec.validate(), Err(NnError::ShapeMismatch { found: 0, .. })));

        let mut no_input = mlp();
        no_input.layers[0].input_size = 0;
        assert!(no_input.validate().is_err());
    }

    #[test]
    fn init_defaults_when_missing_and_round_trips() {
        let json = r#"{"name":"x","layers":[{"size":1,"input_size":2,"activation":"Sigmoid"}]}"#;
        let spec: NetworkSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.layers[0].init, Init::FanInUniform);

        let json = r#"{"name":"x","layers":[{"size":1,"input_size":2,"activation":"Sigmoid","init":"xavier_uniform"}]}"#;
        let spec: NetworkSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.layers[0], LayerSpec::new(1, 2, ActivationFunction::Sigmoid).with_init(Init::XavierUniform));
    }

    #[test]
    fn multi_output_is_rejected() {
        let mut spec = mlp();
        spec.layers[1].size = 2;
        assert!(spec.validate().is_err());
    }

    #[test]
    fn save_then_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mlp.json");
        let path = path.to_str().unwrap();
        mlp().save_json(path).unwrap();
        assert_eq!(NetworkSpec::load_json(path).unwrap(), mlp());
    }

    #[test]
    fn load_rejects_invalid_spec() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        let path = path.to_str().unwrap();
        let mut spec = mlp();
        spec.layers[0].size = 5;
        spec.save_json(path).unwrap();
        assert!(matches!(NetworkSpec::load_json(path), Err(NnError::ShapeMismatch { .. })));
    }

    #[test]
    fn learning_rate_defaults_when_missing() {
        let json = r#"{"name":"x","layers":[{"size":1,"input_size":2,"activation":"Sigmoid"}]}"#;
        let spec: NetworkSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.learning_rate, 0.015);
    }
}
