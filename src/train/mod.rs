pub mod epoch_stats;
pub mod history;
pub mod loop_fn;
pub mod metrics;
pub mod train_config;
pub mod trainer;

pub use epoch_stats::EpochStats;
pub use history::History;
pub use loop_fn::{evaluate, train_loop};
pub use metrics::binary_accuracy;
pub use train_config::TrainConfig;
pub use trainer::{train_model, train_variant, TrainedRun};
