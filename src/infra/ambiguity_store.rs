// ============================================================
// Layer 6 — Ambiguity Store
// ============================================================
// Persists the offline ambiguity analysis as two artifacts and
// serves the runtime correction lookup built from them.
//
//   amb.txt        — human-readable listing, one line per
//                    ambiguous spelling:
//                      spelling word [word ...]
//                    Candidates keep corpus order, so reviewers
//                    can scan for multi-candidate collisions.
//
//   ambiguous.json — machine-readable correction map from an
//                    ambiguous spelling to the Cyrillic word it
//                    should decode to. Where several words claim
//                    the same spelling, the corpus-last word
//                    wins, matching the analysis this replaces.
//
// The JSON is what a reverse-transliterator consults at runtime
// to fix the spellings naive decoding gets wrong.

use anyhow::{Context, Result};
use std::{collections::BTreeMap, fs, path::PathBuf};

use crate::domain::translit::DisambiguationTable;

pub struct AmbiguityStore {
    dir: PathBuf,
}

impl AmbiguityStore {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: PathBuf::from(dir.into()) }
    }

    /// Write both artifacts for a freshly built table.
    pub fn save(&self, table: &DisambiguationTable) -> Result<()> {
        fs::create_dir_all(&self.dir).ok();

        let listing_path = self.dir.join("amb.txt");
        fs::write(&listing_path, render_listing(table))
            .with_context(|| format!("Cannot write '{}'", listing_path.display()))?;

        let json_path = self.dir.join("ambiguous.json");
        let json = serde_json::to_string_pretty(&correction_map(table))?;
        fs::write(&json_path, json)
            .with_context(|| format!("Cannot write '{}'", json_path.display()))?;

        tracing::info!(
            "Wrote {} ambiguous spellings to '{}' and '{}'",
            table.len(),
            listing_path.display(),
            json_path.display()
        );
        Ok(())
    }

    /// Load the runtime correction lookup, if the analysis has
    /// been run in this directory.
    pub fn load_lookup(&self) -> Result<BTreeMap<String, String>> {
        let path = self.dir.join("ambiguous.json");
        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read '{}'. Run the 'ambiguity' command first.",
                    path.display()
                )
            })?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn lookup_exists(&self) -> bool {
        self.dir.join("ambiguous.json").exists()
    }
}

/// One `spelling word [word ...]` line per table entry, in
/// first-occurrence order.
fn render_listing(table: &DisambiguationTable) -> String {
    table
        .entries()
        .iter()
        .map(|e| format!("{} {}", e.spelling, e.candidates.join(" ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// spelling → word correction map; for multi-candidate
/// spellings the last candidate wins.
fn correction_map(table: &DisambiguationTable) -> BTreeMap<String, String> {
    table
        .entries()
        .iter()
        .filter_map(|e| {
            e.candidates
                .last()
                .map(|word| (e.spelling.clone(), word.clone()))
        })
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DisambiguationTable {
        // "мъка" and "мюка" collide on the spelling "muka"
        DisambiguationTable::build(&["мъка".to_string(), "мюка".to_string()])
    }

    #[test]
    fn test_listing_lists_all_candidates() {
        let listing = render_listing(&table());
        let muka_line = listing
            .lines()
            .find(|l| l.starts_with("muka "))
            .unwrap();
        assert_eq!(muka_line, "muka мъка мюка");
    }

    #[test]
    fn test_correction_map_last_candidate_wins() {
        let map = correction_map(&table());
        assert_eq!(map.get("muka").unwrap(), "мюка");
        // Single-candidate spelling maps to its only word
        assert_eq!(map.get("maka").unwrap(), "мъка");
    }
}
