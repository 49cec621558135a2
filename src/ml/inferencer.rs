// ============================================================
// Layer 5 — Step-by-step Inference Engine
// ============================================================
// Greedy autoregressive decoding, one output position at a
// time. The decoder input buffer starts as
//
//   [START_CODE, 0, 0, ..., 0]
//
// and after predicting position t, the predicted index is
// written into buffer slot t+1 — the model's own output feeds
// the next step, which is why decoding cannot be one batched
// call. After OUTPUT_LENGTH steps the accumulated characters
// form the output string.
//
// The loop itself is written against the small StepDecoder
// trait, keeping the state machine (position, buffer, output,
// attention accumulator) testable without any tensor backend.
// ModelStepDecoder is the production implementation: it runs
// the encoder ONCE, caches the encoder hidden states, and
// re-runs only the decoder per step. Per-step tensors are
// dropped at the end of each iteration, so memory stays bounded
// by one step regardless of how many conversions are run.

use anyhow::Result;
use burn::{prelude::*, tensor::activation};

use crate::application::train_use_case::TrainConfig;
use crate::data::encoder::encode_input_strings;
use crate::domain::vocab::{Vocabularies, INPUT_LENGTH, OUTPUT_LENGTH, START_CODE};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{Seq2SeqConfig, Seq2SeqModel};

type InferBackend = burn::backend::Wgpu;

// ─── StepDecoder ──────────────────────────────────────────────────────────────
/// One decode step: given the current decoder input buffer and
/// the position being predicted, return the probability
/// distribution over the output vocabulary at that position and
/// the attention weights over input positions.
pub trait StepDecoder {
    fn step(&self, decoder_input: &[u32], position: usize) -> Result<StepOutput>;
}

pub struct StepOutput {
    /// [output_vocab_size] — softmaxed
    pub distribution: Vec<f32>,
    /// [INPUT_LENGTH]
    pub attention: Vec<f32>,
}

// ─── InferenceResult ──────────────────────────────────────────────────────────
pub struct InferenceResult {
    /// The decoded output string, exactly OUTPUT_LENGTH
    /// characters (trailing padding included — callers strip it
    /// for display).
    pub output: String,

    /// OUTPUT_LENGTH rows of INPUT_LENGTH attention weights,
    /// present only when requested.
    pub attention: Option<Vec<Vec<f32>>>,
}

impl InferenceResult {
    /// The output with trailing padding characters removed.
    pub fn trimmed_output(&self) -> &str {
        self.output.trim_end_matches('\n')
    }
}

/// The decode state machine, isolated from any backend.
pub fn run_greedy_decode(
    decoder:        &impl StepDecoder,
    vocabs:         &Vocabularies,
    need_attention: bool,
) -> Result<InferenceResult> {
    let mut buffer = vec![0u32; OUTPUT_LENGTH];
    buffer[0] = START_CODE;

    let mut output    = String::with_capacity(OUTPUT_LENGTH);
    let mut attention = need_attention.then(|| Vec::with_capacity(OUTPUT_LENGTH));

    for t in 0..OUTPUT_LENGTH {
        let step = decoder.step(&buffer, t)?;

        let predicted = step
            .distribution
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i as u32)
            .unwrap_or(0);

        output.push(vocabs.output.char_at(predicted as usize));

        // Autoregressive feedback: the prediction becomes the
        // decoder input for the next position.
        if t + 1 < OUTPUT_LENGTH {
            buffer[t + 1] = predicted;
        }

        if let Some(acc) = attention.as_mut() {
            acc.push(step.attention);
        }
    }

    Ok(InferenceResult { output, attention })
}

// ─── ModelStepDecoder ─────────────────────────────────────────────────────────
/// StepDecoder backed by the trained burn model. The encoder
/// hidden states are computed once at construction and shared
/// by every step.
struct ModelStepDecoder<'a, B: Backend> {
    model:       &'a Seq2SeqModel<B>,
    encoder_seq: Tensor<B, 3>,
    device:      B::Device,
}

impl<B: Backend> StepDecoder for ModelStepDecoder<'_, B> {
    fn step(&self, decoder_input: &[u32], position: usize) -> Result<StepOutput> {
        let n     = decoder_input.len();
        let flat: Vec<i32> = decoder_input.iter().map(|&x| x as i32).collect();
        let input = Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([1, n]);

        let out        = self.model.decode(self.encoder_seq.clone(), input);
        let vocab_size = out.logits.dims()[2];
        let input_len  = out.attention.dims()[2];

        let distribution = activation::softmax(out.logits, 2)
            .slice([0..1, position..position + 1, 0..vocab_size])
            .squeeze::<2>(0)
            .squeeze::<1>(0)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("Read step distribution: {e:?}"))?;

        let attention = out
            .attention
            .slice([0..1, position..position + 1, 0..input_len])
            .squeeze::<2>(0)
            .squeeze::<1>(0)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("Read attention row: {e:?}"))?;

        Ok(StepOutput { distribution, attention })
    }
}

// ─── Inferencer ───────────────────────────────────────────────────────────────
pub struct Inferencer {
    model:   Seq2SeqModel<InferBackend>,
    vocabs:  Vocabularies,
    device:  burn::backend::wgpu::WgpuDevice,
}

impl Inferencer {
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager) -> Result<Self> {
        let device  = burn::backend::wgpu::WgpuDevice::default();
        let vocabs  = Vocabularies::new();
        let cfg: TrainConfig = ckpt_manager.load_config()?;
        let model_cfg = Seq2SeqConfig::new(vocabs.input.len(), vocabs.output.len())
            .with_embedding_dims(cfg.embedding_dims)
            .with_lstm_units(cfg.lstm_units);
        let model: Seq2SeqModel<InferBackend> = model_cfg.init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint");
        Ok(Self { model, vocabs, device })
    }

    /// Convert one raw Latin string to its Cyrillic form.
    /// Input is lowercased and truncated to INPUT_LENGTH here —
    /// the boundary owns the truncation policy, the encoder
    /// stays strict.
    pub fn convert(&self, input: &str, need_attention: bool) -> Result<InferenceResult> {
        let normalized: String = input
            .trim()
            .to_lowercase()
            .chars()
            .take(INPUT_LENGTH)
            .collect();

        let grid = encode_input_strings(&[normalized.as_str()], &self.vocabs.input)?;
        let flat: Vec<i32> = grid[0].iter().map(|&x| x as i32).collect();
        let encoder_input = Tensor::<InferBackend, 1, Int>::from_ints(
            flat.as_slice(), &self.device,
        ).reshape([1, INPUT_LENGTH]);

        // Encoder runs exactly once per conversion
        let encoder_seq = self.model.encode(encoder_input);

        let decoder = ModelStepDecoder {
            model:       &self.model,
            encoder_seq,
            device:      self.device.clone(),
        };

        run_greedy_decode(&decoder, &self.vocabs, need_attention)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vocab::PAD_CHAR;
    use std::cell::RefCell;

    /// Always predicts a fixed index with certainty, and records
    /// the decoder buffer it was shown at every step.
    struct FixedDecoder {
        predict:    usize,
        vocab_size: usize,
        seen:       RefCell<Vec<Vec<u32>>>,
    }

    impl StepDecoder for FixedDecoder {
        fn step(&self, decoder_input: &[u32], _position: usize) -> Result<StepOutput> {
            self.seen.borrow_mut().push(decoder_input.to_vec());
            let mut distribution = vec![0.0; self.vocab_size];
            distribution[self.predict] = 1.0;
            Ok(StepOutput {
                distribution,
                attention: vec![1.0 / INPUT_LENGTH as f32; INPUT_LENGTH],
            })
        }
    }

    #[test]
    fn test_all_padding_prediction_gives_padded_output() {
        let vocabs  = Vocabularies::new();
        let decoder = FixedDecoder {
            predict:    0,
            vocab_size: vocabs.output.len(),
            seen:       RefCell::new(Vec::new()),
        };

        let result = run_greedy_decode(&decoder, &vocabs, true).unwrap();
        assert_eq!(result.output, PAD_CHAR.to_string().repeat(OUTPUT_LENGTH));
        assert_eq!(result.trimmed_output(), "");

        // Shape sanity: OUTPUT_LENGTH rows of INPUT_LENGTH weights
        let attention = result.attention.unwrap();
        assert_eq!(attention.len(), OUTPUT_LENGTH);
        assert!(attention.iter().all(|row| row.len() == INPUT_LENGTH));
    }

    #[test]
    fn test_buffer_feedback_threads_predictions() {
        let vocabs  = Vocabularies::new();
        let decoder = FixedDecoder {
            predict:    2,
            vocab_size: vocabs.output.len(),
            seen:       RefCell::new(Vec::new()),
        };

        run_greedy_decode(&decoder, &vocabs, false).unwrap();

        let seen = decoder.seen.borrow();
        assert_eq!(seen.len(), OUTPUT_LENGTH);
        for (t, buffer) in seen.iter().enumerate() {
            // Position 0 is always the start-of-sequence code
            assert_eq!(buffer[0], START_CODE);
            // Every position predicted so far has been fed back
            for i in 1..=t.min(OUTPUT_LENGTH - 1) {
                assert_eq!(buffer[i], 2);
            }
            // Positions beyond the feedback frontier stay padded
            for i in (t + 1)..OUTPUT_LENGTH {
                assert_eq!(buffer[i], 0);
            }
        }
    }

    #[test]
    fn test_attention_skipped_when_not_requested() {
        let vocabs  = Vocabularies::new();
        let decoder = FixedDecoder {
            predict:    0,
            vocab_size: vocabs.output.len(),
            seen:       RefCell::new(Vec::new()),
        };
        let result = run_greedy_decode(&decoder, &vocabs, false).unwrap();
        assert!(result.attention.is_none());
    }

    #[test]
    fn test_output_characters_come_from_output_vocab() {
        let vocabs = Vocabularies::new();
        // Index 2 is the first Cyrillic letter, 'а'
        let decoder = FixedDecoder {
            predict:    2,
            vocab_size: vocabs.output.len(),
            seen:       RefCell::new(Vec::new()),
        };
        let result = run_greedy_decode(&decoder, &vocabs, false).unwrap();
        assert_eq!(result.output, "а".repeat(OUTPUT_LENGTH));
    }
}
