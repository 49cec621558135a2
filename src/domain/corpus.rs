// ============================================================
// Layer 3 — Word Corpus
// ============================================================
// The dictionary-derived list of Cyrillic words everything
// else is built from: the training partitions, the validation
// and test sets, and the offline ambiguity analysis.
//
// Dictionary file format (one entry per line):
//
//   дума/NS
//   документация/F
//
// Only the substring before the first '/' is used. Entries are
// lowercased and deduplicated, keeping the first occurrence so
// the corpus order is stable for a given file. After loading
// the corpus is never mutated — later stages only read it.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::domain::vocab::Vocab;

// ─── WordSource ───────────────────────────────────────────────────────────────
/// Any component that can produce the word corpus.
///
/// Implementations:
///   - DictFileLoader → loads from a hunspell-style dictionary file
pub trait WordSource {
    fn load_all(&self) -> Result<WordCorpus>;
}

// ─── WordCorpus ───────────────────────────────────────────────────────────────
/// A deduplicated ordered sequence of lowercase Cyrillic words.
#[derive(Debug, Clone)]
pub struct WordCorpus {
    words: Vec<String>,
}

impl WordCorpus {
    /// Build a corpus from raw dictionary lines: strip metadata,
    /// lowercase, drop empties, dedup preserving first occurrence.
    pub fn from_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Self {
        let mut words = Vec::new();
        let mut seen  = std::collections::HashSet::new();

        for line in lines {
            // Everything after the first '/' is morphology metadata
            let word = line.split('/').next().unwrap_or("").trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            if seen.insert(word.clone()) {
                words.push(word);
            }
        }

        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Drop words that cannot be encoded for training: characters
    /// outside the output alphabet (digits, hyphens, foreign
    /// letters) or more characters than one output sequence holds.
    /// Encoding itself treats such characters as fatal, so the
    /// corpus is validated here, at the caller's boundary.
    pub fn retain_encodable(&mut self, output_vocab: &Vocab, max_len: usize) {
        let before = self.words.len();
        self.words
            .retain(|w| w.chars().count() <= max_len && output_vocab.contains_all(w));
        let dropped = before - self.words.len();
        if dropped > 0 {
            tracing::warn!(
                "Dropped {} of {} dictionary words that cannot be encoded",
                dropped,
                before
            );
        }
    }

    /// Consume the corpus, returning the owned word list.
    /// Used by data generation, which shuffles its own copy.
    pub fn into_words(self) -> Vec<String> {
        self.words
    }
}

// ─── DictFileLoader ───────────────────────────────────────────────────────────
/// Loads the corpus from a newline-delimited `word/metadata`
/// dictionary file. Unlike a demo-mode document directory, a
/// missing dictionary is an error — nothing downstream can run
/// without the corpus.
pub struct DictFileLoader {
    path: String,
}

impl DictFileLoader {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl WordSource for DictFileLoader {
    fn load_all(&self) -> Result<WordCorpus> {
        let path = Path::new(&self.path);
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read dictionary file '{}'", self.path))?;

        let corpus = WordCorpus::from_lines(text.lines());
        tracing::info!(
            "Loaded {} unique words from '{}'",
            corpus.len(),
            self.path
        );
        Ok(corpus)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_metadata_after_slash() {
        let corpus = WordCorpus::from_lines(["дума/NS", "час/M"].into_iter());
        assert_eq!(corpus.words(), ["дума", "час"]);
    }

    #[test]
    fn test_lowercases_entries() {
        let corpus = WordCorpus::from_lines(["София/X"].into_iter());
        assert_eq!(corpus.words(), ["софия"]);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let corpus = WordCorpus::from_lines(["час/A", "дума/B", "час/C"].into_iter());
        assert_eq!(corpus.words(), ["час", "дума"]);
    }

    #[test]
    fn test_skips_empty_lines() {
        let corpus = WordCorpus::from_lines(["", "дума", "/X", "  "].into_iter());
        assert_eq!(corpus.words(), ["дума"]);
    }

    #[test]
    fn test_retain_encodable_drops_bad_words() {
        let mut corpus = WordCorpus::from_lines(
            ["дума", "е-мейл", "свръхдългасловоформаот20", "час"].into_iter(),
        );
        corpus.retain_encodable(&Vocab::output(), 18);
        assert_eq!(corpus.words(), ["дума", "час"]);
    }
}
