// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `train`     — trains the seq2seq model on a dictionary
//   2. `convert`   — converts one spelling with a checkpoint
//   3. `ambiguity` — builds the offline disambiguation table

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{AmbiguityArgs, Commands, ConvertArgs, TrainArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "translit-attention",
    version = "0.1.0",
    about = "Train an attention seq2seq model that decodes Latin transliterations back to Cyrillic."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)     => Self::run_train(args),
            Commands::Convert(args)   => Self::run_convert(args),
            Commands::Ambiguity(args) => Self::run_ambiguity(args),
        }
    }

    /// Handles the `train` subcommand.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on dictionary: {}", args.dict_path);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = TrainUseCase::new(args.into());
        let report   = use_case.execute()?;

        println!("\nTraining complete. Checkpoint saved.");
        if let Some(val_loss) = report.history.final_val_loss() {
            println!("Final validation loss: {val_loss:.4}");
        }

        let mut correct = 0usize;
        for test in &report.tests {
            let ok = test.is_correct();
            if ok {
                correct += 1;
            }
            println!(
                "{} -> {} ({})",
                test.input,
                test.model_output,
                if ok { "OK" } else { "WRONG" }
            );
        }
        if !report.tests.is_empty() {
            println!("Test conversions correct: {}/{}", correct, report.tests.len());
        }
        Ok(())
    }

    /// Handles the `convert` subcommand.
    fn run_convert(args: ConvertArgs) -> Result<()> {
        use crate::application::convert_use_case::ConvertUseCase;

        let use_case = ConvertUseCase::new(
            args.checkpoint_dir.clone(),
            args.table_dir.clone(),
        )?;

        let result = use_case.convert(&args.input, args.attention)?;
        println!("\nOutput: {}", result.trimmed_output());

        if let Some(attention) = &result.attention {
            println!("\nAttention (output step × input position):");
            for (t, row) in attention.iter().enumerate() {
                let weights = row
                    .iter()
                    .map(|w| format!("{w:.2}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("  step {t:>2}: {weights}");
            }
        }
        Ok(())
    }

    /// Handles the `ambiguity` subcommand.
    fn run_ambiguity(args: AmbiguityArgs) -> Result<()> {
        use crate::application::ambiguity_use_case::AmbiguityUseCase;

        let use_case = AmbiguityUseCase::new(args.dict_path, args.out_dir.clone());
        let summary  = use_case.execute()?;

        println!(
            "Wrote {} ambiguous spellings ({} pairs, {} multi-candidate) to '{}'",
            summary.spellings,
            summary.pairs,
            summary.multi_candidate,
            args.out_dir
        );
        Ok(())
    }
}
