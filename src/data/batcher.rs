// ============================================================
// Layer 4 — Seq2Seq Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec of
// CharSeqSamples into GPU-ready tensors.
//
// Output shapes per batch of N samples:
//   encoder_input  [N, INPUT_LENGTH]                  Int
//   decoder_input  [N, OUTPUT_LENGTH]                 Int
//   decoder_output [N, OUTPUT_LENGTH, output_vocab]   Float, one-hot
//   targets        [N, OUTPUT_LENGTH]                 Int
//
// decoder_output is the training target in its one-hot form
// (the loss is categorical cross-entropy against it); targets
// carries the same information as plain indices and exists only
// so validation can compare argmax predictions without an
// argmax over the one-hot tensor.
//
// Batching is simple here because every sample is already
// padded to the fixed sequence widths — we flatten all rows
// into one long Vec and reshape.

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::CharSeqSample;

// ─── Seq2SeqBatch ─────────────────────────────────────────────────────────────
/// A batch of samples ready for the model forward pass.
/// All tensors have batch size as their first dimension.
#[derive(Debug, Clone)]
pub struct Seq2SeqBatch<B: Backend> {
    pub encoder_input:  Tensor<B, 2, Int>,
    pub decoder_input:  Tensor<B, 2, Int>,
    pub decoder_output: Tensor<B, 3>,
    pub targets:        Tensor<B, 2, Int>,
}

// ─── Seq2SeqBatcher ───────────────────────────────────────────────────────────
/// Holds the target device plus the output vocabulary size the
/// one-hot expansion needs.
#[derive(Clone, Debug)]
pub struct Seq2SeqBatcher<B: Backend> {
    pub device:            B::Device,
    pub output_vocab_size: usize,
}

impl<B: Backend> Seq2SeqBatcher<B> {
    pub fn new(device: B::Device, output_vocab_size: usize) -> Self {
        Self { device, output_vocab_size }
    }
}

impl<B: Backend> Batcher<CharSeqSample, Seq2SeqBatch<B>> for Seq2SeqBatcher<B> {
    fn batch(&self, items: Vec<CharSeqSample>) -> Seq2SeqBatch<B> {
        let batch_size = items.len();
        // All rows are pre-padded to the fixed widths
        let input_len  = items[0].encoder_input.len();
        let output_len = items[0].decoder_input.len();
        let vocab_size = self.output_vocab_size;

        let encoder_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.encoder_input.iter().map(|&x| x as i32))
            .collect();

        let decoder_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.decoder_input.iter().map(|&x| x as i32))
            .collect();

        let target_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.target.iter().map(|&x| x as i32))
            .collect();

        // One-hot expansion of the targets, flattened row-major
        let mut one_hot_flat = vec![0.0f32; batch_size * output_len * vocab_size];
        for (i, s) in items.iter().enumerate() {
            for (t, &idx) in s.target.iter().enumerate() {
                one_hot_flat[(i * output_len + t) * vocab_size + idx as usize] = 1.0;
            }
        }

        let encoder_input = Tensor::<B, 1, Int>::from_ints(
            encoder_flat.as_slice(), &self.device
        ).reshape([batch_size, input_len]);

        let decoder_input = Tensor::<B, 1, Int>::from_ints(
            decoder_flat.as_slice(), &self.device
        ).reshape([batch_size, output_len]);

        let targets = Tensor::<B, 1, Int>::from_ints(
            target_flat.as_slice(), &self.device
        ).reshape([batch_size, output_len]);

        let decoder_output = Tensor::<B, 1>::from_floats(
            one_hot_flat.as_slice(), &self.device
        ).reshape([batch_size, output_len, vocab_size]);

        Seq2SeqBatch {
            encoder_input,
            decoder_input,
            decoder_output,
            targets,
        }
    }
}
