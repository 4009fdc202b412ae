pub mod activation_layer;
pub mod dense;
pub mod init;
pub mod layer;

pub use activation_layer::Activation;
pub use dense::Dense;
pub use init::Init;
pub use layer::{Layer, Parameter};
