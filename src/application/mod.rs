// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (training, converting, or building the
// ambiguity table).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No UI or printing here (that's Layer 1)
//   - No direct tensor work (that's Layer 4 and 5)
//   - Only workflow coordination

// The training workflow
pub mod train_use_case;

// The single-string conversion workflow
pub mod convert_use_case;

// The offline ambiguity-analysis workflow
pub mod ambiguity_use_case;
