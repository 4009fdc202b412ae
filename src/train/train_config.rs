/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `name`         — label printed in progress lines
/// - `epochs`       — total number of full passes over the training data
/// - `batch_size`   — samples per mini-batch
/// - `shuffle`      — reshuffle the training split on every pass
/// - `shuffle_seed` — seed for the loader's permutation RNG
/// - `log_every`    — print a progress line every N epochs; `0` disables
/// - `l1_strength`  — L1 weight penalty added to the training loss; `0.0` disables
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub name: String,
    pub epochs: usize,
    pub batch_size: usize,
    pub shuffle: bool,
    pub shuffle_seed: u64,
    pub log_every: usize,
    pub l1_strength: f64,
}

impl TrainConfig {
    /// Creates a silent, shuffling `TrainConfig` seeded with 1.
    pub fn new(epochs: usize, batch_size: usize) -> Self {
        TrainConfig {
            name: "model".to_owned(),
            epochs,
            batch_size,
            shuffle: true,
            shuffle_seed: 1,
            log_every: 0,
            l1_strength: 0.0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }

    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = seed;
        self
    }

    pub fn with_l1(mut self, strength: f64) -> Self {
        self.l1_strength = strength;
        self
    }
}

impl Default for TrainConfig {
    /// 200 epochs of batch size 2.
    fn default() -> Self {
        TrainConfig::new(200, 2)
    }
}
