// ============================================================
// Layer 4 — Training Data Generator
// ============================================================
// Turns the word corpus into the three aligned tensors the
// seq2seq model trains on:
//
//   encoder input  [N, INPUT_LENGTH]   transliterated word
//   decoder input  [N, OUTPUT_LENGTH]  target shifted right,
//                                      START_CODE at column 0
//   decoder target [N, OUTPUT_LENGTH]  the true Cyrillic word
//                                      (one-hot expanded later
//                                      by the batcher)
//
// The decoder input shift implements teacher forcing: during
// training the decoder sees the TRUE previous character at
// every step, which matches the step-by-step feedback loop the
// inference engine runs with predicted characters.
//
// Input formats: every configured formatting function produces
// one encoder row per word, and the decoder rows are tiled
// (replicated) across the format count. Row i of the encoder
// grid and row i of the decoder grids must always refer to the
// same underlying target word — the tiling order below
// preserves that alignment exactly.
//
// Shuffling uses Fisher-Yates via rand::seq::SliceRandom, the
// standard unbiased shuffle. The seed is an explicit parameter:
// None reproduces the original non-deterministic behaviour,
// Some(seed) gives reproducible splits.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use thiserror::Error;

use crate::data::dataset::CharSeqSample;
use crate::data::encoder::{encode_input_strings, encode_output_strings};
use crate::domain::translit;
use crate::domain::vocab::{
    UnknownCharacterError, Vocabularies, INPUT_LENGTH, START_CODE,
};

/// A function that renders a Cyrillic word as one Latin input
/// string. Currently only the canonical transliteration, but
/// the whole pipeline is written against the list.
pub type InputFormatFn = fn(&str) -> String;

/// All configured input formats.
pub const INPUT_FORMATS: &[InputFormatFn] = &[translit::transliterate];

// ─── InvalidSplitError ────────────────────────────────────────────────────────
/// Raised when the train/validation fractions are out of range.
/// Checked before any encoding work happens.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid train split ({train_split}) and validation split ({val_split})")]
pub struct InvalidSplitError {
    pub train_split: f64,
    pub val_split:   f64,
}

// ─── GeneratedData ────────────────────────────────────────────────────────────
/// The three corpus partitions, ready for training. Train and
/// validation are fully encoded samples; the test partition
/// stays as raw words because it is consumed by step-by-step
/// inference, not by the fit loop.
#[derive(Debug)]
pub struct GeneratedData {
    pub train:      Vec<CharSeqSample>,
    pub val:        Vec<CharSeqSample>,
    pub test_words: Vec<String>,
}

/// Shuffle the corpus, partition it into train/validation/test,
/// and encode the train and validation partitions.
///
/// Partition sizes are `floor(N * train_split)` and
/// `floor(N * val_split)`; every remaining word goes to test.
/// No word is dropped and no word lands in two partitions.
pub fn generate_data_for_training(
    mut words:   Vec<String>,
    train_split: f64,
    val_split:   f64,
    seed:        Option<u64>,
    vocabs:      &Vocabularies,
) -> Result<GeneratedData, GenerateError> {
    if !(train_split > 0.0 && val_split > 0.0 && train_split + val_split <= 1.0) {
        return Err(InvalidSplitError { train_split, val_split }.into());
    }

    match seed {
        Some(s) => words.shuffle(&mut StdRng::seed_from_u64(s)),
        None    => words.shuffle(&mut rand::thread_rng()),
    }

    let num_train = (words.len() as f64 * train_split).floor() as usize;
    let num_val   = (words.len() as f64 * val_split).floor() as usize;

    tracing::info!("Number of words used for training: {}", num_train);
    tracing::info!("Number of words used for validation: {}", num_val);
    tracing::info!(
        "Number of words used for testing: {}",
        words.len() - num_train - num_val
    );

    let train = encode_partition(&words[..num_train], vocabs)?;
    let val   = encode_partition(&words[num_train..num_train + num_val], vocabs)?;
    let test_words = words[num_train + num_val..].to_vec();

    Ok(GeneratedData { train, val, test_words })
}

/// Why generation can fail: bad split fractions, or a word that
/// slipped past corpus validation and cannot be encoded.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    InvalidSplit(#[from] InvalidSplitError),

    #[error(transparent)]
    UnknownCharacter(#[from] UnknownCharacterError),
}

/// Encode one partition: encoder rows for every (format, word)
/// pair, decoder rows computed once from the true targets and
/// tiled across formats.
fn encode_partition(
    words:  &[String],
    vocabs: &Vocabularies,
) -> Result<Vec<CharSeqSample>, GenerateError> {
    // ── Encoder rows, format-major ────────────────────────────────────────────
    // Truncation to INPUT_LENGTH happens here, at the boundary,
    // before the strict encoder sees the string.
    let mut input_strings = Vec::with_capacity(words.len() * INPUT_FORMATS.len());
    for format in INPUT_FORMATS {
        for word in words {
            let latin: String = format(word).chars().take(INPUT_LENGTH).collect();
            input_strings.push(latin);
        }
    }
    let encoder_rows = encode_input_strings(&input_strings, &vocabs.input)?;

    // ── Decoder rows, computed once ───────────────────────────────────────────
    let target_rows = encode_output_strings(words, &vocabs.output)?;

    // One-step right shift: START_CODE, then the target with its
    // last column dropped. decoder_input[t] == target[t-1] for t > 0.
    let decoder_rows: Vec<Vec<u32>> = target_rows
        .iter()
        .map(|target| {
            let mut row = Vec::with_capacity(target.len());
            row.push(START_CODE);
            row.extend_from_slice(&target[..target.len() - 1]);
            row
        })
        .collect();

    // ── Tile decoder rows across formats ──────────────────────────────────────
    // encoder_rows is [format0 words..., format1 words...], so
    // sample k*N + i must pair format k's rendering of word i
    // with word i's decoder rows.
    let n = words.len();
    let samples = encoder_rows
        .into_iter()
        .enumerate()
        .map(|(row, encoder_input)| CharSeqSample {
            encoder_input,
            decoder_input: decoder_rows[row % n].clone(),
            target:        target_rows[row % n].clone(),
        })
        .collect();

    Ok(samples)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::encoder::decode_row;
    use crate::domain::vocab::OUTPUT_LENGTH;
    use std::collections::HashSet;

    // 1000 distinct encodable Cyrillic words
    fn corpus(n: usize) -> Vec<String> {
        let letters: Vec<char> = "абвгдежзик".chars().collect();
        (0..n)
            .map(|i| {
                let mut w = String::from("слово");
                w.push(letters[i / 100]);
                w.push(letters[(i / 10) % 10]);
                w.push(letters[i % 10]);
                w
            })
            .collect()
    }

    #[test]
    fn test_partition_sizes() {
        let v    = Vocabularies::new();
        let data = generate_data_for_training(corpus(1000), 0.85, 0.10, Some(7), &v)
            .unwrap();
        assert_eq!(data.train.len(), 850 * INPUT_FORMATS.len());
        assert_eq!(data.val.len(), 100 * INPUT_FORMATS.len());
        assert_eq!(data.test_words.len(), 50);
    }

    #[test]
    fn test_partitions_do_not_overlap() {
        let v    = Vocabularies::new();
        let data = generate_data_for_training(corpus(200), 0.7, 0.2, Some(3), &v)
            .unwrap();

        let train: HashSet<String> = data
            .train
            .iter()
            .map(|s| decode_row(&s.target, &v.output))
            .collect();
        let val: HashSet<String> = data
            .val
            .iter()
            .map(|s| decode_row(&s.target, &v.output))
            .collect();
        let test: HashSet<String> = data.test_words.iter().cloned().collect();

        assert!(train.is_disjoint(&val));
        assert!(train.is_disjoint(&test));
        assert!(val.is_disjoint(&test));
        assert_eq!(train.len() + val.len() + test.len(), 200);
    }

    #[test]
    fn test_invalid_split_fails_fast() {
        let v   = Vocabularies::new();
        let err = generate_data_for_training(corpus(10), 0.5, 0.6, None, &v)
            .unwrap_err();
        assert!(matches!(err, GenerateError::InvalidSplit(_)));
    }

    #[test]
    fn test_zero_split_fails() {
        let v = Vocabularies::new();
        assert!(generate_data_for_training(corpus(10), 0.0, 0.5, None, &v).is_err());
        assert!(generate_data_for_training(corpus(10), 0.5, 0.0, None, &v).is_err());
    }

    #[test]
    fn test_decoder_input_starts_with_start_code() {
        let v    = Vocabularies::new();
        let data = generate_data_for_training(corpus(50), 0.8, 0.1, Some(1), &v)
            .unwrap();
        for sample in data.train.iter().chain(data.val.iter()) {
            assert_eq!(sample.decoder_input[0], START_CODE);
        }
    }

    #[test]
    fn test_decoder_input_is_shifted_target() {
        let v    = Vocabularies::new();
        let data = generate_data_for_training(corpus(50), 0.8, 0.1, Some(1), &v)
            .unwrap();
        for sample in &data.train {
            for t in 1..OUTPUT_LENGTH {
                assert_eq!(sample.decoder_input[t], sample.target[t - 1]);
            }
        }
    }

    #[test]
    fn test_encoder_row_matches_transliterated_target() {
        let v    = Vocabularies::new();
        let data = generate_data_for_training(corpus(50), 0.8, 0.1, Some(9), &v)
            .unwrap();
        for sample in &data.train {
            let target = decode_row(&sample.target, &v.output);
            let latin  = decode_row(&sample.encoder_input, &v.input);
            assert_eq!(latin, translit::transliterate(&target));
        }
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let v = Vocabularies::new();
        let a = generate_data_for_training(corpus(100), 0.8, 0.1, Some(42), &v)
            .unwrap();
        let b = generate_data_for_training(corpus(100), 0.8, 0.1, Some(42), &v)
            .unwrap();
        assert_eq!(a.test_words, b.test_words);
    }
}
