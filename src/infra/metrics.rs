// ============================================================
// Layer 6 — Metrics Logger & Training History
// ============================================================
// Records training metrics to a CSV file after each epoch and
// accumulates the in-memory history the training entry point
// returns to its caller.
//
// Metrics recorded per epoch:
//   - epoch:      the epoch number (1, 2, 3, ...)
//   - train_loss: average categorical cross-entropy, train set
//   - val_loss:   same on the validation set
//   - train_acc:  per-character argmax accuracy, train set
//   - val_acc:    same on the validation set
//
// Output file: {checkpoint_dir}/metrics.csv
//
// How to read the metrics:
//   - Loss should decrease each epoch (model is learning)
//   - val_loss rising while train_loss falls → overfitting
//   - Accuracy starts high-ish even on a bad model because
//     trailing padding positions are easy to get right

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

/// One row of metrics data for a single training epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub epoch:      usize,
    pub train_loss: f64,
    pub val_loss:   f64,
    pub train_acc:  f64,
    pub val_acc:    f64,
}

impl EpochMetrics {
    pub fn new(
        epoch:      usize,
        train_loss: f64,
        val_loss:   f64,
        train_acc:  f64,
        val_acc:    f64,
    ) -> Self {
        Self { epoch, train_loss, val_loss, train_acc, val_acc }
    }

    /// True if this epoch improved over the previous best val_loss.
    pub fn is_improvement(&self, best_val_loss: f64) -> bool {
        self.val_loss < best_val_loss
    }
}

/// The loss/accuracy trajectory of one training run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingHistory {
    pub epochs: Vec<EpochMetrics>,
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, metrics: EpochMetrics) {
        self.epochs.push(metrics);
    }

    pub fn final_val_loss(&self) -> Option<f64> {
        self.epochs.last().map(|m| m.val_loss)
    }
}

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet, so
    /// repeated runs append rather than overwrite.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,train_loss,val_loss,train_acc,val_acc")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row in the CSV.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(
            f,
            "{},{:.6},{:.6},{:.6},{:.6}",
            m.epoch,
            m.train_loss,
            m.val_loss,
            m.train_acc,
            m.val_acc,
        )?;

        tracing::debug!(
            "Logged epoch {} metrics: train_loss={:.4}, val_loss={:.4}",
            m.epoch,
            m.train_loss,
            m.val_loss,
        );

        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_improvement() {
        let m = EpochMetrics::new(2, 2.5, 2.3, 0.2, 0.2);
        assert!(m.is_improvement(3.0));
        assert!(!m.is_improvement(2.0));
    }

    #[test]
    fn test_history_tracks_final_loss() {
        let mut h = TrainingHistory::new();
        assert!(h.final_val_loss().is_none());
        h.push(EpochMetrics::new(1, 3.0, 2.9, 0.1, 0.1));
        h.push(EpochMetrics::new(2, 2.5, 2.4, 0.3, 0.3));
        assert_eq!(h.final_val_loss(), Some(2.4));
    }
}
