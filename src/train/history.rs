use serde::{Serialize, Deserialize};

use crate::train::epoch_stats::EpochStats;

/// Per-epoch metric curves, one entry per completed epoch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub loss_train: Vec<f64>,
    pub loss_valid: Vec<f64>,
    pub accuracy_train: Vec<f64>,
    pub accuracy_valid: Vec<f64>,
}

impl History {
    pub fn with_capacity(epochs: usize) -> History {
        History {
            loss_train: Vec::with_capacity(epochs),
            loss_valid: Vec::with_capacity(epochs),
            accuracy_train: Vec::with_capacity(epochs),
            accuracy_valid: Vec::with_capacity(epochs),
        }
    }

    pub fn record(&mut self, stats: &EpochStats) {
        self.loss_train.push(stats.train_loss);
        self.loss_valid.push(stats.val_loss);
        self.accuracy_train.push(stats.train_accuracy);
        self.accuracy_valid.push(stats.val_accuracy);
    }

    pub fn len(&self) -> usize {
        self.loss_train.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loss_train.is_empty()
    }

    /// `(train_loss, val_loss, train_acc, val_acc)` of the final epoch.
    pub fn last(&self) -> Option<(f64, f64, f64, f64)> {
        let i = self.len().checked_sub(1)?;
        Some((self.loss_train[i], self.loss_valid[i], self.accuracy_train[i], self.accuracy_valid[i]))
    }

    /// Serializes the four curves to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> crate::error::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
