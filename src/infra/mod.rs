// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns used by several layers:
//
//   checkpoint.rs      — Model weight saving/loading via Burn's
//                        CompactRecorder, plus the training
//                        config JSON inference rebuilds the
//                        architecture from.
//
//   ambiguity_store.rs — The two offline ambiguity artifacts
//                        (amb.txt listing, ambiguous.json
//                        correction map) and the runtime lookup
//                        built from them.
//
//   metrics.rs         — Per-epoch training metrics: CSV log on
//                        disk plus the in-memory history the
//                        training entry point returns.

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Disambiguation-table artifacts and runtime lookup
pub mod ambiguity_store;

/// Training metrics CSV logger and history
pub mod metrics;
