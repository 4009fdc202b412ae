pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod data;
pub mod train;
pub mod report;

// Convenience re-exports
pub use error::{NnError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::{Dense, Init, Layer};
pub use network::{Model, ModelVariant, NetworkSpec, LayerSpec, Sequential, XorClassifier, XorModel};
pub use loss::bce::BceLoss;
pub use loss::l1::L1Penalty;
pub use optim::sgd::Sgd;
pub use data::{DataLoader, Sample, XorDataset};
pub use train::{train_loop, train_model, train_variant, History, TrainConfig, TrainedRun};
