use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::data::sample::Sample;
use crate::error::{NnError, Result};

/// Class 1 when both coordinates share a sign (product ≥ 0), else class 0.
pub fn label_for(x0: f64, x1: f64) -> f64 {
    if x0 * x1 >= 0.0 { 1.0 } else { 0.0 }
}

/// Points drawn uniformly from [-1, 1)² and labelled by `label_for`.
#[derive(Debug, Clone, PartialEq)]
pub struct XorDataset {
    pub samples: Vec<Sample>,
}

impl XorDataset {
    pub fn generate(n_samples: usize, seed: u64) -> XorDataset {
        let mut rng = StdRng::seed_from_u64(seed);
        let samples = (0..n_samples)
            .map(|_| {
                let x0 = rng.gen_range(-1.0..1.0);
                let x1 = rng.gen_range(-1.0..1.0);
                Sample { features: [x0, x1], label: label_for(x0, x1) }
            })
            .collect();
        XorDataset { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First `n_train` samples for training, the remainder for validation.
    pub fn split(&self, n_train: usize) -> Result<(&[Sample], &[Sample])> {
        if n_train > self.samples.len() {
            return Err(NnError::InvalidSplit { n_train, total: self.samples.len() });
        }
        Ok(self.samples.split_at(n_train))
    }

    /// Fraction of samples in class 1.
    pub fn positive_rate(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().filter(|s| s.label == 1.0).count() as f64 / self.samples.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn label_rule_on_quadrants() {
        assert_eq!(label_for(0.5, 0.5), 1.0);
        assert_eq!(label_for(-0.5, -0.5), 1.0);
        assert_eq!(label_for(-0.5, 0.5), 0.0);
        assert_eq!(label_for(0.5, -0.5), 0.0);
        assert_eq!(label_for(0.0, -0.5), 1.0);
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(XorDataset::generate(50, 1), XorDataset::generate(50, 1));
        assert_ne!(XorDataset::generate(50, 1), XorDataset::generate(50, 2));
    }

    #[test]
    fn oversized_split_is_rejected() {
        let ds = XorDataset::generate(10, 1);
        assert!(matches!(ds.split(11), Err(NnError::InvalidSplit { n_train: 11, total: 10 })));
        let (train, valid) = ds.split(10).unwrap();
        assert_eq!((train.len(), valid.len()), (10, 0));
    }

    proptest! {
        #[test]
        fn every_label_follows_sign_product(seed in any::<u64>(), n in 1usize..300) {
            let ds = XorDataset::generate(n, seed);
            for s in &ds.samples {
                let [x0, x1] = s.features;
                prop_assert!((-1.0..1.0).contains(&x0) && (-1.0..1.0).contains(&x1));
                prop_assert_eq!(s.label == 1.0, x0 * x1 >= 0.0);
            }
        }

        #[test]
        fn split_partitions_in_order(seed in any::<u64>(), n in 0usize..300, frac in 0.0f64..=1.0) {
            let ds = XorDataset::generate(n, seed);
            let n_train = (n as f64 * frac) as usize;
            let (train, valid) = ds.split(n_train).unwrap();
            prop_assert_eq!(train.len() + valid.len(), n);
            let rejoined: Vec<Sample> = train.iter().chain(valid.iter()).copied().collect();
            prop_assert_eq!(rejoined, ds.samples.clone());
        }
    }
}
