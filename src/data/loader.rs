use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::data::sample::{samples_to_matrices, Sample};
use crate::error::{NnError, Result};
use crate::math::matrix::Matrix;

/// One mini-batch: `b × 2` inputs and `b × 1` labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub inputs: Matrix,
    pub labels: Matrix,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.inputs.rows
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.rows == 0
    }
}

/// Splits a sample slice into mini-batches, drawing a fresh permutation
/// from its own seeded RNG on every pass when `shuffle` is set.
/// The last batch holds the remainder when `batch_size` does not divide the data.
pub struct DataLoader<'a> {
    samples: &'a [Sample],
    batch_size: usize,
    shuffle: bool,
    rng: StdRng,
}

impl<'a> DataLoader<'a> {
    pub fn new(samples: &'a [Sample], batch_size: usize, shuffle: bool, seed: u64) -> Result<DataLoader<'a>> {
        if batch_size == 0 {
            return Err(NnError::InvalidBatchSize);
        }
        if samples.is_empty() {
            return Err(NnError::EmptyDataset);
        }
        Ok(DataLoader { samples, batch_size, shuffle, rng: StdRng::seed_from_u64(seed) })
    }

    pub fn num_batches(&self) -> usize {
        self.samples.len().div_ceil(self.batch_size)
    }

    /// Starts a new pass over the data.
    pub fn batches(&mut self) -> Batches<'a> {
        let mut order: Vec<usize> = (0..self.samples.len()).collect();
        if self.shuffle {
            order.shuffle(&mut self.rng);
        }
        Batches { samples: self.samples, order, batch_size: self.batch_size, pos: 0 }
    }
}

/// Lazy iterator over the batches of one pass.
pub struct Batches<'a> {
    samples: &'a [Sample],
    order: Vec<usize>,
    batch_size: usize,
    pos: usize,
}

impl<'a> Iterator for Batches<'a> {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        if self.pos >= self.order.len() {
            return None;
        }
        let end = self.pos.saturating_add(self.batch_size).min(self.order.len());
        let picked: Vec<Sample> = self.order[self.pos..end].iter().map(|&i| self.samples[i]).collect();
        self.pos = end;
        let (inputs, labels) = samples_to_matrices(&picked);
        Some(Batch { inputs, labels })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.order.len() - self.pos).div_ceil(self.batch_size);
        (left, Some(left))
    }
}

impl<'a> ExactSizeIterator for Batches<'a> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synth::XorDataset;
    use proptest::prelude::*;

    #[test]
    fn zero_batch_size_is_rejected() {
        let ds = XorDataset::generate(4, 1);
        assert!(matches!(DataLoader::new(&ds.samples, 0, true, 1), Err(NnError::InvalidBatchSize)));
        assert!(matches!(DataLoader::new(&[], 2, true, 1), Err(NnError::EmptyDataset)));
    }

    #[test]
    fn remainder_lands_in_last_batch() {
        let ds = XorDataset::generate(7, 1);
        let mut loader = DataLoader::new(&ds.samples, 3, false, 1).unwrap();
        let sizes: Vec<usize> = loader.batches().map(|b| b.len()).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
        assert_eq!(loader.num_batches(), 3);
    }

    #[test]
    fn huge_batch_size_yields_one_batch() {
        let ds = XorDataset::generate(5, 1);
        let mut loader = DataLoader::new(&ds.samples, usize::MAX, true, 1).unwrap();
        assert_eq!(loader.num_batches(), 1);
        let batches = loader.batches();
        assert_eq!(batches.len(), 1);
        let sizes: Vec<usize> = batches.map(|b| b.len()).collect();
        assert_eq!(sizes, vec![5]);
    }

    #[test]
    fn unshuffled_pass_keeps_order() {
        let ds = XorDataset::generate(4, 1);
        let mut loader = DataLoader::new(&ds.samples, 2, false, 1).unwrap();
        let first = loader.batches().next().unwrap();
        assert_eq!(first.inputs.data[0], ds.samples[0].features.to_vec());
        assert_eq!(first.labels.data[1][0], ds.samples[1].label);
    }

    #[test]
    fn successive_passes_reshuffle() {
        let ds = XorDataset::generate(100, 1);
        let mut loader = DataLoader::new(&ds.samples, 2, true, 1).unwrap();
        let a: Vec<Batch> = loader.batches().collect();
        let b: Vec<Batch> = loader.batches().collect();
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn each_pass_covers_every_sample_once(n in 1usize..120, batch in 1usize..10, seed in any::<u64>()) {
            let ds = XorDataset::generate(n, seed);
            let mut loader = DataLoader::new(&ds.samples, batch, true, seed).unwrap();
            for _ in 0..2 {
                let batches: Vec<Batch> = loader.batches().collect();
                prop_assert_eq!(batches.len(), loader.num_batches());
                let mut seen: Vec<Vec<f64>> = batches.iter()
                    .flat_map(|b| b.inputs.data.clone())
                    .collect();
                let mut expected: Vec<Vec<f64>> = ds.samples.iter().map(|s| s.features.to_vec()).collect();
                seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
                expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
                prop_assert_eq!(seen, expected);
            }
        }
    }
}
