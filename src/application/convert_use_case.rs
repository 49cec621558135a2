// ============================================================
// Layer 2 — Convert Use Case
// ============================================================
// The inference entry point: one raw Latin string in, the
// decoded Cyrillic word (and optionally the attention matrix)
// out. Model failures propagate to the caller — the CLI prints
// the error message rather than swallowing it.

use anyhow::Result;
use std::collections::BTreeMap;

use crate::infra::ambiguity_store::AmbiguityStore;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::inferencer::{Inferencer, InferenceResult};

pub struct ConvertUseCase {
    inferencer: Inferencer,
    /// Correction lookup from the offline ambiguity analysis,
    /// when its artifacts are present.
    lookup: Option<BTreeMap<String, String>>,
}

impl ConvertUseCase {
    pub fn new(checkpoint_dir: String, table_dir: String) -> Result<Self> {
        let ckpt       = CheckpointManager::new(&checkpoint_dir);
        let inferencer = Inferencer::from_checkpoint(&ckpt)?;

        let store  = AmbiguityStore::new(&table_dir);
        let lookup = if store.lookup_exists() {
            Some(store.load_lookup()?)
        } else {
            tracing::debug!("No ambiguity artifacts in '{}'", table_dir);
            None
        };

        Ok(Self { inferencer, lookup })
    }

    /// Run one conversion. When the input is a known ambiguous
    /// spelling, the analysis table's answer is logged alongside
    /// the model's so disagreements are visible.
    pub fn convert(&self, input: &str, need_attention: bool) -> Result<InferenceResult> {
        let result = self.inferencer.convert(input, need_attention)?;

        if let Some(lookup) = &self.lookup {
            let spelling = input.trim().to_lowercase();
            if let Some(expected) = lookup.get(&spelling) {
                tracing::info!(
                    "'{}' is a known ambiguous spelling (table says '{}', model says '{}')",
                    spelling,
                    expected,
                    result.trimmed_output()
                );
            }
        }

        Ok(result)
    }
}
