//! Detokenize command implementation.

use super::read_run_data;
use anyhow::{Context, Result};
use bytemerge::{TokenId, Tokenizer};
use std::io::Write;
use std::path::PathBuf;

/// Detokenize command arguments.
pub struct DetokenizeCommand {
    /// Path to the trained vocabulary
    pub tokenizer: PathBuf,
    /// File path or inline list of token IDs (stdin if `None`)
    pub input: Option<String>,
}

pub fn run(cmd: DetokenizeCommand) -> Result<()> {
    let tokenizer = Tokenizer::load(&cmd.tokenizer)
        .with_context(|| format!("failed to load vocabulary {}", cmd.tokenizer.display()))?;
    let data = read_run_data(cmd.input.as_deref())?;

    let ids = parse_ids(&String::from_utf8_lossy(&data))?;
    let bytes = tokenizer.decode(&ids)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&bytes)?;
    stdout.flush()?;
    Ok(())
}

/// Parse token IDs separated by whitespace and/or commas.
pub fn parse_ids(text: &str) -> Result<Vec<TokenId>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<TokenId>()
                .with_context(|| format!("invalid token id '{}'", s))
        })
        .collect()
}
