// ============================================================
// Layer 2 — Ambiguity Use Case
// ============================================================
// The one-time offline analysis: enumerate every plausible
// Latin spelling of every dictionary word, keep the spellings
// naive reverse decoding gets wrong, and persist the resulting
// disambiguation table. Exponential per word, bounded by the
// dictionary — this is a batch job, never a serving-path call.

use anyhow::Result;

use crate::domain::corpus::{DictFileLoader, WordSource};
use crate::domain::translit::DisambiguationTable;
use crate::infra::ambiguity_store::AmbiguityStore;

pub struct AmbiguitySummary {
    /// Distinct ambiguous spellings in the table
    pub spellings: usize,
    /// (spelling, word) ambiguity pairs before grouping
    pub pairs: usize,
    /// Spellings claimed by more than one word
    pub multi_candidate: usize,
}

pub struct AmbiguityUseCase {
    dict_path: String,
    out_dir:   String,
}

impl AmbiguityUseCase {
    pub fn new(dict_path: String, out_dir: String) -> Self {
        Self { dict_path, out_dir }
    }

    pub fn execute(&self) -> Result<AmbiguitySummary> {
        let loader = DictFileLoader::new(&self.dict_path);
        let corpus = loader.load_all()?;

        tracing::info!("Analysing {} words for ambiguous spellings", corpus.len());
        let table = DisambiguationTable::build(corpus.words());

        let multi_candidate = table.multi_candidate().count();
        tracing::info!(
            "Found {} ambiguity pairs, {} distinct spellings, {} multi-candidate",
            table.pair_count,
            table.len(),
            multi_candidate
        );

        let store = AmbiguityStore::new(&self.out_dir);
        store.save(&table)?;

        Ok(AmbiguitySummary {
            spellings: table.len(),
            pairs: table.pair_count,
            multi_candidate,
        })
    }
}
