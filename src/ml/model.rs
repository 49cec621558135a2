use burn::{
    nn::{
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
        Lstm, LstmConfig,
    },
    prelude::*,
    tensor::activation,
    tensor::backend::AutodiffBackend,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct Seq2SeqConfig {
    pub input_vocab_size:  usize,
    pub output_vocab_size: usize,
    #[config(default = 64)]
    pub embedding_dims:    usize,
    #[config(default = 128)]
    pub lstm_units:        usize,
}

impl Seq2SeqConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Seq2SeqModel<B> {
        let encoder_embedding =
            EmbeddingConfig::new(self.input_vocab_size, self.embedding_dims).init(device);
        let encoder_lstm =
            LstmConfig::new(self.embedding_dims, self.lstm_units, true).init(device);
        let decoder_embedding =
            EmbeddingConfig::new(self.output_vocab_size, self.embedding_dims).init(device);
        let decoder_lstm =
            LstmConfig::new(self.embedding_dims, self.lstm_units, true).init(device);
        let attention_combine =
            LinearConfig::new(self.lstm_units * 2, self.lstm_units).init(device);
        let output_projection =
            LinearConfig::new(self.lstm_units, self.output_vocab_size).init(device);
        Seq2SeqModel {
            encoder_embedding, encoder_lstm,
            decoder_embedding, decoder_lstm,
            attention_combine, output_projection,
        }
    }
}

/// Character-level attention seq2seq model:
///
///   encoder: embedding → LSTM over the Latin input, keeping
///            the full hidden-state sequence
///   decoder: embedding → LSTM over the (shifted) output
///   attention: dot product of every decoder step against every
///            encoder step, softmaxed over input positions
///   head:    concat(context, decoder state) → dense tanh →
///            dense to output-vocabulary logits
///
/// The attention weights are part of the forward output, not a
/// separate graph — inference re-threads them into its per-step
/// heatmap rows for free.
#[derive(Module, Debug)]
pub struct Seq2SeqModel<B: Backend> {
    pub encoder_embedding: Embedding<B>,
    pub encoder_lstm:      Lstm<B>,
    pub decoder_embedding: Embedding<B>,
    pub decoder_lstm:      Lstm<B>,
    pub attention_combine: Linear<B>,
    pub output_projection: Linear<B>,
}

pub struct Seq2SeqOutput<B: Backend> {
    /// [batch, output_len, output_vocab_size]
    pub logits:    Tensor<B, 3>,
    /// [batch, output_len, input_len] — rows sum to 1
    pub attention: Tensor<B, 3>,
}

impl<B: Backend> Seq2SeqModel<B> {
    /// Run the encoder once over an input batch.
    /// encoder_input: [batch, input_len] → [batch, input_len, lstm_units]
    ///
    /// Split out from `forward` so step-by-step inference can
    /// reuse the encoder states across all decode steps.
    pub fn encode(&self, encoder_input: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let x = self.encoder_embedding.forward(encoder_input);
        let (hidden_seq, _state) = self.encoder_lstm.forward(x, None);
        hidden_seq
    }

    /// Run the decoder and attention head against precomputed
    /// encoder states.
    pub fn decode(
        &self,
        encoder_seq:   Tensor<B, 3>,
        decoder_input: Tensor<B, 2, Int>,
    ) -> Seq2SeqOutput<B> {
        let y = self.decoder_embedding.forward(decoder_input);
        let (decoder_seq, _state) = self.decoder_lstm.forward(y, None);

        // Luong dot attention: score every (output step, input step)
        // pair, normalise over input positions.
        let scores = decoder_seq
            .clone()
            .matmul(encoder_seq.clone().swap_dims(1, 2));
        let attention = activation::softmax(scores, 2);

        // Context: attention-weighted sum of encoder states
        let context = attention.clone().matmul(encoder_seq);

        let combined = Tensor::cat(vec![context, decoder_seq], 2);
        let hidden   = activation::tanh(self.attention_combine.forward(combined));
        let logits   = self.output_projection.forward(hidden);

        Seq2SeqOutput { logits, attention }
    }

    /// Full forward pass for training.
    pub fn forward(
        &self,
        encoder_input: Tensor<B, 2, Int>,
        decoder_input: Tensor<B, 2, Int>,
    ) -> Seq2SeqOutput<B> {
        self.decode(self.encode(encoder_input), decoder_input)
    }

    /// Categorical cross-entropy of the logits against the
    /// one-hot targets, averaged over batch and time. Padding is
    /// a real output class, so no masking is applied.
    pub fn forward_loss(
        &self,
        encoder_input:  Tensor<B, 2, Int>,
        decoder_input:  Tensor<B, 2, Int>,
        decoder_output: Tensor<B, 3>,
    ) -> (Tensor<B, 1>, Seq2SeqOutput<B>)
    where
        B: AutodiffBackend,
    {
        let output = self.forward(encoder_input, decoder_input);
        let log_probs = activation::log_softmax(output.logits.clone(), 2);
        let loss = (decoder_output * log_probs).sum_dim(2).mean().neg();
        (loss, output)
    }
}
