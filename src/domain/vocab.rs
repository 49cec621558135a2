// ============================================================
// Layer 3 — Vocabularies and Sequence Constants
// ============================================================
// The two fixed character alphabets of the system and the
// fixed tensor widths every encoded sequence is bounded by.
//
// Why two separate vocabularies?
//   The encoder reads Latin transliterations, the decoder
//   writes Cyrillic. The alphabets barely overlap, so each
//   side gets its own ordered alphabet with its own indices.
//
// Index conventions (these are invariants, not choices):
//   - Index 0 in BOTH vocabularies is the padding character.
//     Padding must sit at index 0 so that zero-filled tensor
//     positions mean "no character here".
//   - Index 1 in the OUTPUT vocabulary is the start-of-sequence
//     marker ('\t'), fed to the decoder at position 0 before
//     any real prediction exists. START_CODE names that index.
//
// Encoding a character that is absent from the active
// vocabulary is a fatal error — never a silent drop. Training
// data corrupted by silently skipped characters is much harder
// to debug than a loud failure at the boundary.

use thiserror::Error;

/// Maximum encoded length of any Latin input string.
pub const INPUT_LENGTH: usize = 21;

/// Fixed length of every decoded Cyrillic output sequence.
pub const OUTPUT_LENGTH: usize = 18;

/// Index of the start-of-sequence marker in the output vocabulary.
pub const START_CODE: u32 = 1;

/// Padding character, index 0 in both vocabularies.
pub const PAD_CHAR: char = '\n';

/// Start-of-sequence character, index 1 in the output vocabulary.
pub const SOS_CHAR: char = '\t';

// Padding first, then the lowercase Latin alphabet.
const INPUT_CHARS: &str = "\nabcdefghijklmnopqrstuvwxyz";

// Padding, SOS, then the Bulgarian Cyrillic letters that occur
// in dictionary words.
const OUTPUT_CHARS: &str = "\n\tабвгдежзийклмнопрстуфхцчшщъьюя";

// ─── UnknownCharacterError ────────────────────────────────────────────────────
/// Raised when encoding meets a character outside the active
/// vocabulary. Not recovered here — the caller is responsible
/// for pre-validating or truncating its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown character {character:?} for {vocab} vocabulary")]
pub struct UnknownCharacterError {
    pub character: char,
    pub vocab:     &'static str,
}

// ─── Vocab ────────────────────────────────────────────────────────────────────
/// An ordered alphabet of unique characters. A character's
/// position in the alphabet IS its encoding index.
#[derive(Debug, Clone)]
pub struct Vocab {
    name:  &'static str,
    chars: Vec<char>,
}

impl Vocab {
    fn new(name: &'static str, chars: &str) -> Self {
        Self { name, chars: chars.chars().collect() }
    }

    /// The Latin input alphabet (padding + a..z).
    pub fn input() -> Self {
        Self::new("input", INPUT_CHARS)
    }

    /// The Cyrillic output alphabet (padding + SOS + letters).
    pub fn output() -> Self {
        Self::new("output", OUTPUT_CHARS)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Encoding index of `c`, or a fatal error if `c` is not
    /// part of this alphabet.
    pub fn index_of(&self, c: char) -> Result<u32, UnknownCharacterError> {
        self.chars
            .iter()
            .position(|&v| v == c)
            .map(|i| i as u32)
            .ok_or(UnknownCharacterError { character: c, vocab: self.name })
    }

    /// Character at encoding index `index`.
    /// Indices always come from this vocabulary's own encodings
    /// or from argmax over logits of width `len()`, so an
    /// out-of-range index is a programming error.
    pub fn char_at(&self, index: usize) -> char {
        self.chars[index]
    }

    /// True if every character of `s` can be encoded.
    pub fn contains_all(&self, s: &str) -> bool {
        s.chars().all(|c| self.chars.contains(&c))
    }
}

// ─── Vocabularies ─────────────────────────────────────────────────────────────
/// The immutable encoding configuration of the whole system:
/// both alphabets plus the fixed lengths. Constructed once per
/// process and passed by reference into every component — no
/// ambient global lookup.
#[derive(Debug, Clone)]
pub struct Vocabularies {
    pub input:  Vocab,
    pub output: Vocab,
}

impl Vocabularies {
    pub fn new() -> Self {
        Self { input: Vocab::input(), output: Vocab::output() }
    }
}

impl Default for Vocabularies {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_is_index_zero_in_both() {
        let v = Vocabularies::new();
        assert_eq!(v.input.index_of(PAD_CHAR).unwrap(), 0);
        assert_eq!(v.output.index_of(PAD_CHAR).unwrap(), 0);
    }

    #[test]
    fn test_sos_is_start_code() {
        let v = Vocab::output();
        assert_eq!(v.index_of(SOS_CHAR).unwrap(), START_CODE);
    }

    #[test]
    fn test_vocab_sizes() {
        // 1 padding + 26 Latin letters
        assert_eq!(Vocab::input().len(), 27);
        // 1 padding + 1 SOS + 30 Cyrillic letters
        assert_eq!(Vocab::output().len(), 32);
    }

    #[test]
    fn test_index_round_trip() {
        let v = Vocab::output();
        for c in "абвгдежзийклмнопрстуфхцчшщъьюя".chars() {
            let idx = v.index_of(c).unwrap();
            assert_eq!(v.char_at(idx as usize), c);
        }
    }

    #[test]
    fn test_unknown_character_is_fatal() {
        let v = Vocab::input();
        let err = v.index_of('я').unwrap_err();
        assert_eq!(err.character, 'я');
        assert_eq!(err.vocab, "input");
    }

    #[test]
    fn test_contains_all() {
        let v = Vocab::input();
        assert!(v.contains_all("dokumentaciya"));
        assert!(!v.contains_all("та6"));
    }
}
