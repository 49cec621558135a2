// ============================================================
// Layer 4 — Sequence Encoder
// ============================================================
// Converts between strings and fixed-width integer index grids.
//
// Encoding rules (identical for both directions):
//   - Each character is replaced by its index in the active
//     vocabulary (input alphabet for encoder rows, output
//     alphabet for decoder rows).
//   - Every row is exactly INPUT_LENGTH / OUTPUT_LENGTH wide.
//     Positions past the end of the string stay at the padding
//     index 0 — padding is always on the right.
//   - A character missing from the vocabulary is a fatal
//     UnknownCharacterError. Callers own the truncation policy
//     and hand over strings that already fit the fixed width;
//     anything longer is clipped at the row boundary.
//
// All functions here are pure — no shared state, no tensors.
// Burn tensor construction happens in batcher.rs so everything
// in this file is testable without a GPU.

use crate::domain::vocab::{
    UnknownCharacterError, Vocab, INPUT_LENGTH, OUTPUT_LENGTH,
};

/// A dense `[N, width]` grid of vocabulary indices.
pub type IndexGrid = Vec<Vec<u32>>;

fn encode_rows(
    strings: &[impl AsRef<str>],
    vocab:   &Vocab,
    width:   usize,
) -> Result<IndexGrid, UnknownCharacterError> {
    let mut grid = Vec::with_capacity(strings.len());

    for s in strings {
        let mut row = vec![0u32; width];
        for (j, c) in s.as_ref().chars().take(width).enumerate() {
            row[j] = vocab.index_of(c)?;
        }
        grid.push(row);
    }

    Ok(grid)
}

/// Encode Latin input strings as a `[N, INPUT_LENGTH]` grid.
pub fn encode_input_strings(
    strings: &[impl AsRef<str>],
    vocab:   &Vocab,
) -> Result<IndexGrid, UnknownCharacterError> {
    encode_rows(strings, vocab, INPUT_LENGTH)
}

/// Encode Cyrillic target strings as a `[N, OUTPUT_LENGTH]` grid.
pub fn encode_output_strings(
    strings: &[impl AsRef<str>],
    vocab:   &Vocab,
) -> Result<IndexGrid, UnknownCharacterError> {
    encode_rows(strings, vocab, OUTPUT_LENGTH)
}

/// Expand an index grid to its one-hot form
/// `[N, width, vocab_size]`. Used for the decoder target
/// tensor, where the loss is categorical cross-entropy.
pub fn one_hot(grid: &IndexGrid, vocab_size: usize) -> Vec<Vec<Vec<f32>>> {
    grid.iter()
        .map(|row| {
            row.iter()
                .map(|&idx| {
                    let mut v = vec![0.0; vocab_size];
                    v[idx as usize] = 1.0;
                    v
                })
                .collect()
        })
        .collect()
}

/// Decode one index row back to a string, stripping the
/// trailing padding. Inverse of the encode functions for any
/// string that fits the fixed width.
pub fn decode_row(row: &[u32], vocab: &Vocab) -> String {
    let end = row
        .iter()
        .rposition(|&idx| idx != 0)
        .map_or(0, |i| i + 1);
    row[..end].iter().map(|&idx| vocab.char_at(idx as usize)).collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vocab::Vocabularies;

    #[test]
    fn test_input_row_shape_and_padding() {
        let v    = Vocabularies::new();
        let grid = encode_input_strings(&["duma"], &v.input).unwrap();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].len(), INPUT_LENGTH);
        // 'd' is the 4th letter → index 4 (padding occupies 0)
        assert_eq!(grid[0][0], 4);
        // Everything past the string stays at the padding index
        assert!(grid[0][4..].iter().all(|&i| i == 0));
    }

    #[test]
    fn test_input_round_trip() {
        let v = Vocabularies::new();
        for s in ["duma", "dokumentaciya", "a", ""] {
            let grid = encode_input_strings(&[s], &v.input).unwrap();
            assert_eq!(decode_row(&grid[0], &v.input), s);
        }
    }

    #[test]
    fn test_output_round_trip() {
        let v    = Vocabularies::new();
        let grid = encode_output_strings(&["дума"], &v.output).unwrap();
        assert_eq!(grid[0].len(), OUTPUT_LENGTH);
        assert_eq!(decode_row(&grid[0], &v.output), "дума");
    }

    #[test]
    fn test_unknown_character_is_fatal() {
        let v   = Vocabularies::new();
        let err = encode_input_strings(&["ta6"], &v.input).unwrap_err();
        assert_eq!(err.character, '6');
    }

    #[test]
    fn test_one_hot_argmax_round_trip() {
        let v    = Vocabularies::new();
        let grid = encode_output_strings(&["дума"], &v.output).unwrap();
        let oh   = one_hot(&grid, v.output.len());
        assert_eq!(oh[0].len(), OUTPUT_LENGTH);
        assert_eq!(oh[0][0].len(), v.output.len());

        for (t, step) in oh[0].iter().enumerate() {
            let argmax = step
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i as u32)
                .unwrap();
            assert_eq!(argmax, grid[0][t]);
        }
    }

    #[test]
    fn test_multiple_rows_keep_order() {
        let v    = Vocabularies::new();
        let grid = encode_input_strings(&["as", "duma"], &v.input).unwrap();
        assert_eq!(decode_row(&grid[0], &v.input), "as");
        assert_eq!(decode_row(&grid[1], &v.input), "duma");
    }
}
