// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly, except the thin
// Dataset/Batcher adapters in the data layer.
//
// What's in this layer:
//
//   model.rs      — The attention seq2seq architecture:
//                   • character embeddings for both alphabets
//                   • encoder LSTM over the Latin input
//                   • decoder LSTM over the shifted target
//                   • dot-product attention over input positions
//                   • tanh combine + output projection
//
//   trainer.rs    — The training loop: forward pass, categorical
//                   cross-entropy against the one-hot targets,
//                   Adam updates, per-epoch validation, metrics
//                   and checkpoint saving
//
//   inferencer.rs — Step-by-step greedy decoding with
//                   autoregressive feedback and attention
//                   capture; loads a trained checkpoint
//
// Reference: Luong et al. (2015) Effective Approaches to
//            Attention-based Neural Machine Translation

/// Attention seq2seq model architecture
pub mod model;

/// Full training loop with validation and checkpointing
pub mod trainer;

/// Step-wise greedy inference engine
pub mod inferencer;
