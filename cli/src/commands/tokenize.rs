//! Tokenize command implementation.

use super::read_run_data;
use anyhow::{Context, Result};
use bytemerge::Tokenizer;
use log::debug;
use std::path::PathBuf;

/// Tokenize command arguments.
pub struct TokenizeCommand {
    /// Path to the trained vocabulary
    pub tokenizer: PathBuf,
    /// File path or inline text to encode (stdin if `None`)
    pub input: Option<String>,
}

pub fn run(cmd: TokenizeCommand) -> Result<()> {
    println!("{}", tokenize(&cmd)?);
    Ok(())
}

/// Load the vocabulary, encode the run data and render the IDs.
pub fn tokenize(cmd: &TokenizeCommand) -> Result<String> {
    let tokenizer = Tokenizer::load(&cmd.tokenizer)
        .with_context(|| format!("failed to load vocabulary {}", cmd.tokenizer.display()))?;
    let data = read_run_data(cmd.input.as_deref())?;

    let encoding = tokenizer.encode(&data);
    debug!("encoded {} bytes to {} tokens", data.len(), encoding.len());

    Ok(format_ids(&encoding.ids))
}

/// Render token IDs space-separated.
pub fn format_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_format_ids() {
        assert_eq!(format_ids(&[257, 257]), "257 257");
        assert_eq!(format_ids(&[]), "");
    }

    #[test]
    fn test_tokenize_with_trained_vocabulary() {
        let dir = tempdir().unwrap();
        let vocab_path = dir.path().join("vocab.bpe");
        let mut tokenizer = Tokenizer::builder().vocab_size(258).build().unwrap();
        tokenizer.train(b"aabaab").unwrap();
        tokenizer.save(&vocab_path).unwrap();

        let inline = TokenizeCommand {
            tokenizer: vocab_path.clone(),
            input: Some("aabaab".to_string()),
        };
        assert_eq!(tokenize(&inline).unwrap(), "257 257");

        let input_path = dir.path().join("input.txt");
        std::fs::write(&input_path, b"aabaabc").unwrap();
        let from_file = TokenizeCommand {
            tokenizer: vocab_path,
            input: Some(input_path.to_string_lossy().into_owned()),
        };
        assert_eq!(tokenize(&from_file).unwrap(), "257 257 99");

        assert!(run(inline).is_ok());
    }

    #[test]
    fn test_missing_vocabulary() {
        let dir = tempdir().unwrap();
        let cmd = TokenizeCommand {
            tokenizer: dir.path().join("absent.bpe"),
            input: Some("abc".to_string()),
        };
        assert!(run(cmd).is_err());
    }
}
