use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One encoded training sample: aligned encoder input, shifted
/// decoder input, and the true target indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharSeqSample {
    pub encoder_input: Vec<u32>,
    pub decoder_input: Vec<u32>,
    pub target:        Vec<u32>,
}

pub struct Seq2SeqDataset {
    samples: Vec<CharSeqSample>,
}

impl Seq2SeqDataset {
    pub fn new(samples: Vec<CharSeqSample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<CharSeqSample> for Seq2SeqDataset {
    fn get(&self, index: usize) -> Option<CharSeqSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
