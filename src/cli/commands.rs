// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `train`, `convert`, and
// `ambiguity`, and all their configurable flags.
//
// clap's derive macros generate the help text, the error
// messages for missing args, and the string → number
// conversions.

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the transliteration model on a dictionary file
    Train(TrainArgs),

    /// Convert one Latin spelling using a trained checkpoint
    Convert(ConvertArgs),

    /// Build the offline transliteration-ambiguity table
    Ambiguity(AmbiguityArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Dictionary file with one `word/metadata` entry per line
    #[arg(long, default_value = "data/bg.txt")]
    pub dict_path: String,

    /// Directory to save model checkpoints and metrics
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 360)]
    pub epochs: usize,

    /// Number of samples processed together in one forward pass
    #[arg(long, default_value_t = 20)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Width of the character embedding vectors
    #[arg(long, default_value_t = 64)]
    pub embedding_dims: usize,

    /// Hidden size of the encoder and decoder LSTMs
    #[arg(long, default_value_t = 128)]
    pub lstm_units: usize,

    /// Fraction of the corpus used for training (0, 1)
    #[arg(long, default_value_t = 0.85)]
    pub train_split: f64,

    /// Fraction of the corpus used for validation (0, 1);
    /// whatever remains after train + validation becomes the
    /// held-out test set
    #[arg(long, default_value_t = 0.10)]
    pub val_split: f64,

    /// Number of held-out test words to convert and print after
    /// training finishes
    #[arg(long, default_value_t = 20)]
    pub num_tests: usize,

    /// Shuffle seed for reproducible corpus splits; omit for a
    /// different split every run
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            dict_path:      a.dict_path,
            checkpoint_dir: a.checkpoint_dir,
            epochs:         a.epochs,
            batch_size:     a.batch_size,
            lr:             a.lr,
            embedding_dims: a.embedding_dims,
            lstm_units:     a.lstm_units,
            train_split:    a.train_split,
            val_split:      a.val_split,
            num_tests:      a.num_tests,
            seed:           a.seed,
        }
    }
}

/// All arguments for the `convert` command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// The Latin spelling to convert (longer inputs are
    /// truncated to the model's fixed input width)
    #[arg(long)]
    pub input: String,

    /// Directory where checkpoints were saved during training
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Directory holding the ambiguity artifacts, if built
    #[arg(long, default_value = "analysis")]
    pub table_dir: String,

    /// Also print the per-step attention weights over input
    /// positions
    #[arg(long, default_value_t = false)]
    pub attention: bool,
}

/// All arguments for the `ambiguity` command
#[derive(Args, Debug)]
pub struct AmbiguityArgs {
    /// Dictionary file with one `word/metadata` entry per line
    #[arg(long, default_value = "data/bg.txt")]
    pub dict_path: String,

    /// Directory to write amb.txt and ambiguous.json into
    #[arg(long, default_value = "analysis")]
    pub out_dir: String,
}
