//! Train command implementation.

use anyhow::{Context, Result};
use bytemerge::{Tokenizer, TokenizerError};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Train command arguments.
pub struct TrainCommand {
    /// Path to the training data file
    pub dataset: Option<PathBuf>,
    /// Output path for the trained vocabulary
    pub output: PathBuf,
    /// Target vocabulary size
    pub vocab_size: usize,
    /// Read the dataset directly instead of a working copy
    pub in_place: bool,
    /// Working copy path
    pub working_copy: PathBuf,
}

pub fn run(cmd: TrainCommand) -> Result<()> {
    let dataset = cmd.dataset.as_deref().ok_or_else(|| {
        TokenizerError::InvalidConfig(
            "please specify a path to a local file containing the dataset".to_string(),
        )
    })?;

    let mut tokenizer = Tokenizer::builder().vocab_size(cmd.vocab_size).build()?;

    info!("Training tokenizer...");
    info!("  Input: {}", dataset.display());
    info!("  Output: {}", cmd.output.display());
    info!("  Vocab size: {}", cmd.vocab_size);
    info!("  In place: {}", cmd.in_place);

    let staged = StagedDataset::new(dataset, cmd.in_place, &cmd.working_copy)?;

    let start = Instant::now();
    let data = fs::read(staged.path())
        .with_context(|| format!("failed to read training data {}", staged.path().display()))?;
    info!(
        "Read {} bytes in {:.2}s",
        data.len(),
        start.elapsed().as_secs_f64()
    );

    let start = Instant::now();
    let output = tokenizer.train(&data)?;
    drop(data);
    info!(
        "Training completed in {:.2}s ({:?}); final vocab size {}",
        start.elapsed().as_secs_f64(),
        output.stop_reason,
        tokenizer.vocab_size()
    );

    tokenizer
        .save(&cmd.output)
        .with_context(|| format!("failed to save vocabulary to {}", cmd.output.display()))?;

    Ok(())
}

/// The file training reads from.
///
/// In place, that is the dataset itself. Otherwise the dataset is copied to
/// the working copy first, and the copy is removed when this value drops,
/// whether training succeeded or not.
#[derive(Debug)]
pub struct StagedDataset {
    path: PathBuf,
    remove_on_drop: bool,
}

impl StagedDataset {
    pub fn new(dataset: &Path, in_place: bool, working_copy: &Path) -> Result<Self> {
        if in_place {
            return Ok(Self {
                path: dataset.to_path_buf(),
                remove_on_drop: false,
            });
        }

        if is_same_file(dataset, working_copy) {
            return Err(TokenizerError::InvalidConfig(format!(
                "working copy {} is the dataset itself; use --in_place or another --working_copy",
                working_copy.display()
            ))
            .into());
        }

        // Guard first so a partial copy is cleaned up too.
        let staged = Self {
            path: working_copy.to_path_buf(),
            remove_on_drop: true,
        };
        fs::copy(dataset, working_copy).with_context(|| {
            format!(
                "failed to copy {} to working copy {}",
                dataset.display(),
                working_copy.display()
            )
        })?;
        Ok(staged)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedDataset {
    fn drop(&mut self) {
        if !self.remove_on_drop {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!(
                "could not remove working copy {}: {}",
                self.path.display(),
                err
            ),
        }
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
