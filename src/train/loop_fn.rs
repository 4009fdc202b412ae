use std::time::Instant;

use crate::data::loader::DataLoader;
use crate::data::sample::{samples_to_matrices, Sample};
use crate::error::{NnError, Result};
use crate::loss::bce::BceLoss;
use crate::loss::l1::L1Penalty;
use crate::math::matrix::Matrix;
use crate::network::model::Model;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::history::History;
use crate::train::metrics::binary_accuracy;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `model` for `config.epochs` epochs and returns the per-epoch history.
///
/// # Arguments
/// - `model`     — any `Model`; its parameters are updated in place
/// - `optimizer` — SGD optimizer (carries learning rate)
/// - `loader`    — mini-batch source over the training split; reshuffles per pass
/// - `valid`     — held-out samples, evaluated once per epoch, never trained on
/// - `config`    — epoch count, optional L1 penalty and progress logging
///
/// Non-finite losses are not guarded against; they flow into the history.
///
/// # Errors
/// Returns `NnError::EmptyDataset` when `valid` is empty.
pub fn train_loop<M: Model + ?Sized>(
    model: &mut M,
    optimizer: &Sgd,
    loader: &mut DataLoader<'_>,
    valid: &[Sample],
    config: &TrainConfig,
) -> Result<History> {
    if valid.is_empty() {
        return Err(NnError::EmptyDataset);
    }
    let (valid_inputs, valid_labels) = samples_to_matrices(valid);
    let mut history = History::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        // ── One full pass over the training data ───────────────────────────
        let (train_loss, train_accuracy) = run_one_epoch(model, optimizer, loader, config.l1_strength);

        // ── Validation ────────────────────────────────────────────────────
        let (val_loss, val_accuracy) = evaluate(model, &valid_inputs, &valid_labels);

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            val_loss,
            train_accuracy,
            val_accuracy,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };

        if config.log_every > 0 && (epoch % config.log_every == 0 || epoch == config.epochs) {
            log_epoch(&config.name, &stats);
        }

        history.record(&stats);
    }

    Ok(history)
}

/// Loss and accuracy of a single forward pass over `inputs`.
pub fn evaluate<M: Model + ?Sized>(model: &mut M, inputs: &Matrix, labels: &Matrix) -> (f64, f64) {
    let predicted = model.forward(inputs);
    (BceLoss::loss(&predicted, labels), binary_accuracy(&predicted, labels))
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Runs one epoch of mini-batch SGD. Returns the mean per-batch loss
/// (including any L1 penalty) and accuracy.
fn run_one_epoch<M: Model + ?Sized>(
    model: &mut M,
    optimizer: &Sgd,
    loader: &mut DataLoader<'_>,
    l1_strength: f64,
) -> (f64, f64) {
    let l1 = (l1_strength > 0.0).then(|| L1Penalty::new(l1_strength));
    let mut total_loss = 0.0;
    let mut total_accuracy = 0.0;
    let mut n_batches = 0usize;

    for batch in loader.batches() {
        let predicted = model.forward(&batch.inputs);

        total_loss += BceLoss::loss(&predicted, &batch.labels);
        total_accuracy += binary_accuracy(&predicted, &batch.labels);

        model.backward(&BceLoss::derivative(&predicted, &batch.labels));
        if let Some(l1) = &l1 {
            let mut params = model.parameters();
            total_loss += l1.penalty(&params);
            l1.accumulate_grad(&mut params);
        }
        optimizer.step(model);
        optimizer.zero_grad(model);

        n_batches += 1;
    }

    let n = n_batches.max(1) as f64;
    (total_loss / n, total_accuracy / n)
}

fn log_epoch(name: &str, stats: &EpochStats) {
    println!(
        "[{}] epoch {:>4}/{}  train loss {:.4}  acc {:.3}  |  val loss {:.4}  acc {:.3}  ({} ms)",
        name,
        stats.epoch,
        stats.total_epochs,
        stats.train_loss,
        stats.train_accuracy,
        stats.val_loss,
        stats.val_accuracy,
        stats.elapsed_ms,
    );
}
