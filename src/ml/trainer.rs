// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train + validation loop using Burn's DataLoader and Adam.
//
// Backend split:
//   - Training uses Autodiff<Wgpu> for gradients
//   - model.valid() returns the model on plain Wgpu
//   - The validation batcher must also use the inner backend
//
// The loss is categorical cross-entropy against the one-hot
// decoder target (matching the layer graph this model is a port
// of); accuracy is per-character argmax agreement, with padding
// counted as a class like any other.

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::activation,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::Seq2SeqBatcher, dataset::Seq2SeqDataset};
use crate::domain::vocab::Vocabularies;
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger, TrainingHistory};
use crate::ml::model::{Seq2SeqConfig, Seq2SeqModel};

type MyBackend      = burn::backend::Autodiff<burn::backend::Wgpu>;
type MyInnerBackend = burn::backend::Wgpu;

pub fn run_training(
    cfg:           &TrainConfig,
    train_dataset: Seq2SeqDataset,
    val_dataset:   Seq2SeqDataset,
    ckpt_manager:  CheckpointManager,
) -> Result<TrainingHistory> {
    let device = burn::backend::wgpu::WgpuDevice::default();
    tracing::info!("Using WGPU device: {:?}", device);
    train_loop(cfg, train_dataset, val_dataset, ckpt_manager, device)
}

fn train_loop(
    cfg:           &TrainConfig,
    train_dataset: Seq2SeqDataset,
    val_dataset:   Seq2SeqDataset,
    ckpt_manager:  CheckpointManager,
    device:        burn::backend::wgpu::WgpuDevice,
) -> Result<TrainingHistory> {
    let vocabs = Vocabularies::new();

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = Seq2SeqConfig::new(vocabs.input.len(), vocabs.output.len())
        .with_embedding_dims(cfg.embedding_dims)
        .with_lstm_units(cfg.lstm_units);
    let mut model: Seq2SeqModel<MyBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: embedding_dims={}, lstm_units={}",
        cfg.embedding_dims,
        cfg.lstm_units
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_batcher =
        Seq2SeqBatcher::<MyBackend>::new(device.clone(), vocabs.output.len());
    let train_loader = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed.unwrap_or(42))
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (InnerBackend — no autodiff overhead) ──────────
    let val_batcher =
        Seq2SeqBatcher::<MyInnerBackend>::new(device.clone(), vocabs.output.len());
    let val_loader = DataLoaderBuilder::new(val_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_dataset);

    let metrics_logger = MetricsLogger::new(&cfg.checkpoint_dir)?;
    let mut history    = TrainingHistory::new();

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;
        let mut train_correct  = 0usize;
        let mut train_chars    = 0usize;

        for batch in train_loader.iter() {
            let (loss, output) = model.forward_loss(
                batch.encoder_input,
                batch.decoder_input,
                batch.decoder_output,
            );

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_loss_sum += loss_val;
            train_batches  += 1;

            let [n, t, _] = output.logits.dims();
            let preds = output.logits.argmax(2).reshape([n, t]);
            let correct: i64 = preds
                .equal(batch.targets)
                .int()
                .sum()
                .into_scalar()
                .elem::<i64>();
            train_correct += correct as usize;
            train_chars   += n * t;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let avg_train_loss = if train_batches > 0 {
            train_loss_sum / train_batches as f64
        } else { f64::NAN };
        let train_acc = if train_chars > 0 {
            train_correct as f64 / train_chars as f64
        } else { 0.0 };

        // ── Validation phase ──────────────────────────────────────────────────
        // model.valid() → Seq2SeqModel<MyInnerBackend>
        let model_valid = model.valid();

        let mut val_loss_sum = 0.0f64;
        let mut val_batches  = 0usize;
        let mut val_correct  = 0usize;
        let mut val_chars    = 0usize;

        for batch in val_loader.iter() {
            let output = model_valid.forward(batch.encoder_input, batch.decoder_input);

            let log_probs  = activation::log_softmax(output.logits.clone(), 2);
            let batch_loss: f64 = (batch.decoder_output * log_probs)
                .sum_dim(2)
                .mean()
                .neg()
                .into_scalar()
                .elem::<f64>();
            val_loss_sum += batch_loss;
            val_batches  += 1;

            let [n, t, _] = output.logits.dims();
            let preds = output.logits.argmax(2).reshape([n, t]);
            let correct: i64 = preds
                .equal(batch.targets)
                .int()
                .sum()
                .into_scalar()
                .elem::<i64>();
            val_correct += correct as usize;
            val_chars   += n * t;
        }

        let avg_val_loss = if val_batches > 0 { val_loss_sum / val_batches as f64 } else { f64::NAN };
        let val_acc      = if val_chars   > 0 { val_correct as f64 / val_chars as f64 } else { 0.0 };

        println!(
            "Epoch {:>3}/{} | train_loss={:.4} | val_loss={:.4} | train_acc={:.1}% | val_acc={:.1}%",
            epoch, cfg.epochs, avg_train_loss, avg_val_loss,
            train_acc * 100.0, val_acc * 100.0,
        );

        let metrics = EpochMetrics::new(epoch, avg_train_loss, avg_val_loss, train_acc, val_acc);
        metrics_logger.log(&metrics)?;
        history.push(metrics);

        ckpt_manager.save_model(&model, epoch)?;
        tracing::debug!("Checkpoint saved for epoch {}", epoch);
    }

    tracing::info!("Training complete!");
    Ok(history)
}
