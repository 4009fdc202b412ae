pub mod loader;
pub mod sample;
pub mod synth;

pub use loader::{Batch, DataLoader};
pub use sample::{samples_to_matrices, Sample};
pub use synth::{label_for, XorDataset};
