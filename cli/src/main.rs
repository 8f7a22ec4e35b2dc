//! Bytemerge CLI - Command-line interface for the BPE tokenizer.
//!
//! This is the main entry point for the `bytemerge` command-line tool.

mod commands;

use bytemerge::DEFAULT_VOCAB_SIZE;
use clap::{ArgAction, Parser, ValueEnum};
use commands::{DetokenizeCommand, TokenizeCommand, TrainCommand};
use env_logger::Env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bytemerge")]
#[command(about = "Byte-pair encoding tokenizer", long_about = None)]
#[command(version)]
struct Cli {
    /// Action to perform
    #[arg(short, long, value_enum)]
    action: Action,

    /// Training dataset file path
    #[arg(short = 'd', long = "training_dataset")]
    training_dataset: Option<PathBuf>,

    /// Where to write the trained vocabulary (`.json` selects JSON)
    #[arg(short = 'o', long = "training_output", default_value = "vocabulary.bpe")]
    training_output: PathBuf,

    /// Target vocabulary size, including the 256 byte tokens
    #[arg(short = 'v', long = "vocabulary_size", default_value_t = DEFAULT_VOCAB_SIZE)]
    vocabulary_size: usize,

    /// Vocabulary file used by tokenize/detokenize
    #[arg(short = 't', long = "tokenizer_data", default_value = "vocabulary.bpe")]
    tokenizer_data: PathBuf,

    /// Input for tokenize/detokenize: a file path or inline text (stdin if omitted)
    #[arg(short = 'r', long = "run_data")]
    run_data: Option<String>,

    /// Train directly on the dataset file instead of a working copy
    #[arg(short = 'i', long = "in_place", default_value_t = false)]
    in_place: bool,

    /// Working copy path used when not training in place
    #[arg(long = "working_copy", default_value = "working_copy.txt")]
    working_copy: PathBuf,

    /// Increase log verbosity (once for debug, twice for trace)
    #[arg(long, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease log verbosity (-q warn, -qq error)
    #[arg(short, long, action = ArgAction::Count)]
    quiet: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Action {
    /// Learn a vocabulary from the training dataset
    Train,
    /// Encode run data to token IDs
    Tokenize,
    /// Decode token IDs in run data back to bytes
    Detokenize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.action {
        Action::Train => commands::train::run(TrainCommand {
            dataset: cli.training_dataset,
            output: cli.training_output,
            vocab_size: cli.vocabulary_size,
            in_place: cli.in_place,
            working_copy: cli.working_copy,
        })?,
        Action::Tokenize => commands::tokenize::run(TokenizeCommand {
            tokenizer: cli.tokenizer_data,
            input: cli.run_data,
        })?,
        Action::Detokenize => commands::detokenize::run(DetokenizeCommand {
            tokenizer: cli.tokenizer_data,
            input: cli.run_data,
        })?,
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: u8) {
    use log::LevelFilter;

    let level = match (quiet, verbose) {
        (0, 0) => LevelFilter::Info,
        (0, 1) => LevelFilter::Debug,
        (0, _) => LevelFilter::Trace,
        (1, _) => LevelFilter::Warn,
        _ => LevelFilter::Error,
    };

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();
    if verbose > 0 || quiet > 0 {
        builder.filter_level(level);
    }
    builder.init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_train_flags() {
        let cli = Cli::try_parse_from([
            "bytemerge",
            "--action",
            "train",
            "--training_dataset",
            "data.txt",
            "--vocabulary_size",
            "512",
            "--in_place",
        ])
        .unwrap();

        assert_eq!(cli.action, Action::Train);
        assert_eq!(cli.training_dataset, Some(PathBuf::from("data.txt")));
        assert_eq!(cli.vocabulary_size, 512);
        assert!(cli.in_place);
        assert_eq!(cli.training_output, PathBuf::from("vocabulary.bpe"));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["bytemerge", "-a", "tokenize", "-r", "hi"]).unwrap();
        assert_eq!(cli.action, Action::Tokenize);
        assert_eq!(cli.vocabulary_size, 50_257);
        assert_eq!(cli.tokenizer_data, PathBuf::from("vocabulary.bpe"));
        assert_eq!(cli.run_data.as_deref(), Some("hi"));
        assert!(!cli.in_place);
    }

    #[test]
    fn test_action_required() {
        assert!(Cli::try_parse_from(["bytemerge"]).is_err());
        assert!(Cli::try_parse_from(["bytemerge", "--action", "compress"]).is_err());
    }
}
