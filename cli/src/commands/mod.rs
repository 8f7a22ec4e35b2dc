//! CLI commands for the bytemerge tokenizer.

pub mod detokenize;
pub mod tokenize;
pub mod train;

pub use detokenize::DetokenizeCommand;
pub use tokenize::TokenizeCommand;
pub use train::TrainCommand;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Resolve `--run_data`: an existing file is read, anything else is taken as
/// inline text. Without the flag, stdin is read to the end.
pub fn read_run_data(input: Option<&str>) -> Result<Vec<u8>> {
    match input {
        Some(value) if Path::new(value).is_file() => {
            std::fs::read(value).with_context(|| format!("failed to read run data {}", value))
        }
        Some(value) => Ok(value.as_bytes().to_vec()),
        None => {
            let mut buffer = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buffer)
                .context("failed to read run data from stdin")?;
            Ok(buffer)
        }
    }
}
