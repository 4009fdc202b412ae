use rand::{rngs::StdRng, SeedableRng};
use serde::{Serialize, Deserialize};
use std::fmt;

use crate::activation::activation::ActivationFunction;
use crate::error::Result;
use crate::layers::layer::Parameter;
use crate::math::matrix::Matrix;
use crate::network::classifier::XorClassifier;
use crate::network::model::Model;
use crate::network::sequential::Sequential;
use crate::network::spec::{LayerSpec, NetworkSpec};

/// The three network shapes trained on the XOR problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    /// Linear(2→1) + Sigmoid. Cannot separate XOR; serves as the baseline.
    Logistic,
    /// Linear(2→4) ReLU Linear(4→4) ReLU Linear(4→1) Sigmoid.
    Mlp,
    /// Same topology as `Mlp`, held as an explicit module list with `predict`.
    ModuleList,
}

impl ModelVariant {
    pub const ALL: [ModelVariant; 3] =
        [ModelVariant::Logistic, ModelVariant::Mlp, ModelVariant::ModuleList];

    pub fn label(&self) -> &'static str {
        match self {
            ModelVariant::Logistic => "logistic",
            ModelVariant::Mlp => "mlp",
            ModelVariant::ModuleList => "module_list",
        }
    }

    pub fn learning_rate(&self) -> f64 {
        match self {
            ModelVariant::Logistic => 0.001,
            ModelVariant::Mlp | ModelVariant::ModuleList => 0.015,
        }
    }

    pub fn spec(&self) -> NetworkSpec {
        let layers = match self {
            ModelVariant::Logistic => vec![LayerSpec::new(1, 2, ActivationFunction::Sigmoid)],
            ModelVariant::Mlp | ModelVariant::ModuleList => vec![
                LayerSpec::new(4, 2, ActivationFunction::ReLU),
                LayerSpec::new(4, 4, ActivationFunction::ReLU),
                LayerSpec::new(1, 4, ActivationFunction::Sigmoid),
            ],
        };
        NetworkSpec {
            name: self.label().to_owned(),
            layers,
            learning_rate: self.learning_rate(),
        }
    }

    /// Builds the variant with weights drawn from a `StdRng` seeded by `seed`.
    pub fn build(&self, seed: u64) -> Result<XorModel> {
        let mut rng = StdRng::seed_from_u64(seed);
        match self {
            ModelVariant::ModuleList => Ok(XorModel::Classifier(XorClassifier::new(&mut rng))),
            _ => Ok(XorModel::Sequential(Sequential::from_spec(&self.spec(), &mut rng)?)),
        }
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A built model of any variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "model", rename_all = "snake_case")]
pub enum XorModel {
    Sequential(Sequential),
    Classifier(XorClassifier),
}

impl XorModel {
    /// Builds a sequential network from a user-supplied spec.
    pub fn from_spec(spec: &NetworkSpec, seed: u64) -> Result<XorModel> {
        let mut rng = StdRng::seed_from_u64(seed);
        Ok(XorModel::Sequential(Sequential::from_spec(spec, &mut rng)?))
    }

    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn load_json(path: &str) -> Result<XorModel> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl Model for XorModel {
    fn forward(&mut self, input: &Matrix) -> Matrix {
        match self {
            XorModel::Sequential(m) => m.forward(input),
            XorModel::Classifier(m) => m.forward(input),
        }
    }

    fn backward(&mut self, grad_output: &Matrix) {
        match self {
            XorModel::Sequential(m) => m.backward(grad_output),
            XorModel::Classifier(m) => m.backward(grad_output),
        }
    }

    fn parameters(&mut self) -> Vec<Parameter<'_>> {
        match self {
            XorModel::Sequential(m) => m.parameters(),
            XorModel::Classifier(m) => m.parameters(),
        }
    }
}

impl fmt::Display for XorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XorModel::Sequential(m) => write!(f, "{}", m),
            XorModel::Classifier(m) => write!(f, "{}", m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_specs_validate() {
        for v in ModelVariant::ALL {
            assert!(v.spec().validate().is_ok(), "{} spec invalid", v);
        }
    }

    #[test]
    fn module_list_and_mlp_share_parameter_count() {
        let mut mlp = ModelVariant::Mlp.build(1).unwrap();
        let mut list = ModelVariant::ModuleList.build(1).unwrap();
        assert_eq!(mlp.num_parameters(), 2 * 4 + 4 + 4 * 4 + 4 + 4 + 1);
        assert_eq!(mlp.num_parameters(), list.num_parameters());
        assert_eq!(ModelVariant::Logistic.build(1).unwrap().num_parameters(), 3);
    }

    #[test]
    fn model_list_variant_prints_module_list() {
        let model = ModelVariant::ModuleList.build(1).unwrap();
        assert!(matches!(model, XorModel::Classifier(_)));
        assert!(model.to_string().starts_with("XorClassifier("));
    }

    #[test]
    fn zero_width_spec_is_an_error_not_a_panic() {
        let json = r#"{"name":"bad","layers":[
            {"size":0,"input_size":2,"activation":"ReLU"},
            {"size":1,"input_size":0,"activation":"Sigmoid"}]}"#;
        let spec: NetworkSpec = serde_json::from_str(json).unwrap();
        assert!(matches!(XorModel::from_spec(&spec, 1), Err(crate::error::NnError::ShapeMismatch { .. })));
    }
}
