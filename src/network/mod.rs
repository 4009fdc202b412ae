pub mod classifier;
pub mod model;
pub mod sequential;
pub mod spec;
pub mod variants;

pub use classifier::XorClassifier;
pub use model::Model;
pub use sequential::Sequential;
pub use spec::{NetworkSpec, LayerSpec};
pub use variants::{ModelVariant, XorModel};
