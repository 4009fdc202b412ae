use serde::{Serialize, Deserialize};

/// Metrics recorded at the end of one training epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean of the per-batch training losses.
    pub train_loss: f64,
    /// Loss of one forward pass over the whole validation split.
    pub val_loss: f64,
    /// Mean of the per-batch training accuracies, in [0, 1].
    pub train_accuracy: f64,
    /// Accuracy over the whole validation split, in [0, 1].
    pub val_accuracy: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    #[serde(default)]
    pub elapsed_ms: u64,
}
