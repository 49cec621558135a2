// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw word corpus and GPU-ready tensor
// batches.
//
// The pipeline flows in this order:
//
//   word corpus (domain)
//       │
//       ▼
//   generator      → shuffles, splits train/val/test, applies
//       │            the input formats, builds the shifted
//       │            decoder rows (teacher forcing)
//       ▼
//   encoder        → strings → fixed-width index grids
//       │
//       ▼
//   Seq2SeqDataset → implements Burn's Dataset trait
//       │
//       ▼
//   Seq2SeqBatcher → stacks samples into tensors, expands the
//       │            one-hot decoder targets
//       ▼
//   DataLoader     → feeds batches to the training loop
//
// encoder and generator are pure and burn-free; only dataset
// and batcher touch the framework.

/// Strings ↔ fixed-width index grids, padding, one-hot
pub mod encoder;

/// Shuffle/split the corpus and build aligned sample rows
pub mod generator;

/// Implements Burn's Dataset trait for encoded samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
