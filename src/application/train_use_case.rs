// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the dictionary corpus     (Layer 3 - domain)
//   Step 2: Validate/filter the corpus     (Layer 3 - domain)
//   Step 3: Generate train/val/test data   (Layer 4 - data)
//   Step 4: Build Burn datasets            (Layer 4 - data)
//   Step 5: Save config for inference      (Layer 6 - infra)
//   Step 6: Run training loop              (Layer 5 - ml)
//   Step 7: Score held-out test words      (Layer 5 - ml)

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::Seq2SeqDataset,
    generator::{generate_data_for_training, INPUT_FORMATS},
};
use crate::domain::corpus::{DictFileLoader, WordSource};
use crate::domain::vocab::{Vocabularies, INPUT_LENGTH, OUTPUT_LENGTH};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::TrainingHistory;
use crate::ml::inferencer::Inferencer;
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run. Serialisable so it
// can be saved to disk and reloaded for inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub dict_path:      String,
    pub checkpoint_dir: String,
    pub epochs:         usize,
    pub batch_size:     usize,
    pub lr:             f64,
    pub embedding_dims: usize,
    pub lstm_units:     usize,
    pub train_split:    f64,
    pub val_split:      f64,
    pub num_tests:      usize,
    pub seed:           Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dict_path:      "data/bg.txt".to_string(),
            checkpoint_dir: "checkpoints".to_string(),
            epochs:         360,
            batch_size:     20,
            lr:             1e-3,
            embedding_dims: 64,
            lstm_units:     128,
            train_split:    0.85,
            val_split:      0.10,
            num_tests:      20,
            seed:           None,
        }
    }
}

// ─── TestRecord ───────────────────────────────────────────────────────────────
/// One held-out conversion scored after training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRecord {
    pub input:          String,
    pub correct_answer: String,
    pub model_output:   String,
}

impl TestRecord {
    pub fn is_correct(&self) -> bool {
        self.model_output == self.correct_answer
    }
}

/// Everything a caller learns from one training run.
#[derive(Debug)]
pub struct TrainReport {
    pub history: TrainingHistory,
    pub tests:   Vec<TestRecord>,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end.
    pub fn execute(&self) -> Result<TrainReport> {
        let cfg    = &self.config;
        let vocabs = Vocabularies::new();

        // ── Step 1: Load the dictionary corpus ────────────────────────────────
        tracing::info!("Loading dictionary from '{}'", cfg.dict_path);
        let loader     = DictFileLoader::new(&cfg.dict_path);
        let mut corpus = loader.load_all()?;

        // ── Step 2: Drop words that cannot be encoded ─────────────────────────
        // Encoding is strict about vocabulary membership, so the
        // pre-validation the encoders expect happens here.
        corpus.retain_encodable(&vocabs.output, OUTPUT_LENGTH);
        tracing::info!("Corpus size after validation: {}", corpus.len());

        // ── Step 3: Generate train/val/test tensors ───────────────────────────
        let data = generate_data_for_training(
            corpus.into_words(),
            cfg.train_split,
            cfg.val_split,
            cfg.seed,
            &vocabs,
        )?;

        // ── Step 4: Build Burn datasets ───────────────────────────────────────
        let train_dataset = Seq2SeqDataset::new(data.train);
        let val_dataset   = Seq2SeqDataset::new(data.val);
        tracing::info!(
            "Datasets ready: {} train samples, {} validation samples",
            train_dataset.sample_count(),
            val_dataset.sample_count()
        );

        // ── Step 5: Save config for inference ─────────────────────────────────
        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt_manager.save_config(cfg)?;

        // ── Step 6: Run training loop (Layer 5) ───────────────────────────────
        let history = run_training(cfg, train_dataset, val_dataset, ckpt_manager)?;

        // ── Step 7: Score held-out test words ─────────────────────────────────
        let tests = run_test_conversions(cfg, &data.test_words)?;

        Ok(TrainReport { history, tests })
    }
}

/// Convert the first `num_tests` held-out words through the
/// trained model, once per configured input format, and record
/// the results.
fn run_test_conversions(cfg: &TrainConfig, test_words: &[String]) -> Result<Vec<TestRecord>> {
    let ckpt       = CheckpointManager::new(&cfg.checkpoint_dir);
    let inferencer = Inferencer::from_checkpoint(&ckpt)?;

    let mut records = Vec::new();
    for word in test_words.iter().take(cfg.num_tests) {
        for format in INPUT_FORMATS {
            let input: String = format(word).chars().take(INPUT_LENGTH).collect();
            let result = inferencer.convert(&input, false)?;
            records.push(TestRecord {
                input,
                correct_answer: word.clone(),
                model_output:   result.trimmed_output().to_string(),
            });
        }
    }

    Ok(records)
}
