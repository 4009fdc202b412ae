pub mod bce;
pub mod l1;

pub use bce::BceLoss;
pub use l1::L1Penalty;
