//! Apply one filter to every image under a directory.
//!
//! This is the non-interactive counterpart of the editor: walk an input
//! tree, run the same decode → filter → PNG-export pipeline over each
//! supported file, and mirror the directory structure into the output
//! directory. Files are processed in parallel with rayon; a file that fails
//! to decode is recorded in the report instead of aborting the run, so one
//! corrupt image does not sink a large batch.
//!
//! Output files always get a `.png` extension (export is lossless PNG
//! regardless of input format), keeping the source-relative path otherwise.

use crate::codec::{self, CodecError};
use crate::filters::{self, FilterKind};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("input directory not found: {0}")]
    InputNotFound(PathBuf),
    #[error("failed to walk input directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// One successfully processed file.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedEntry {
    pub source: PathBuf,
    pub output: PathBuf,
}

/// One file that could not be processed, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct FailedEntry {
    pub source: PathBuf,
    pub reason: String,
}

/// Outcome of a batch run.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub filter: FilterKind,
    pub processed: Vec<ProcessedEntry>,
    pub failed: Vec<FailedEntry>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len()
    }
}

/// Discover supported images under `input_dir`, sorted for stable output.
fn discover(input_dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let mut sources = Vec::new();
    for entry in WalkDir::new(input_dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && codec::has_supported_extension(entry.path()) {
            sources.push(entry.into_path());
        }
    }
    Ok(sources)
}

/// The output path for `source`: same input-relative location, `.png`
/// extension.
fn output_path(source: &Path, input_dir: &Path, output_dir: &Path) -> PathBuf {
    let relative = source.strip_prefix(input_dir).unwrap_or(source);
    output_dir.join(relative).with_extension("png")
}

fn process_one(source: &Path, output: &Path, kind: FilterKind) -> Result<(), CodecError> {
    let buffer = codec::decode_file(source)?;
    let filtered = filters::apply(kind, &buffer);
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    codec::encode_png_file(&filtered, output)
}

/// Run `kind` over every supported image under `input_dir`, writing PNGs
/// under `output_dir`.
pub fn run(
    input_dir: &Path,
    output_dir: &Path,
    kind: FilterKind,
) -> Result<BatchReport, BatchError> {
    if !input_dir.is_dir() {
        return Err(BatchError::InputNotFound(input_dir.to_path_buf()));
    }
    let sources = discover(input_dir)?;
    std::fs::create_dir_all(output_dir)?;

    let outcomes: Vec<Result<ProcessedEntry, FailedEntry>> = sources
        .par_iter()
        .map(|source| {
            let output = output_path(source, input_dir, output_dir);
            match process_one(source, &output, kind) {
                Ok(()) => Ok(ProcessedEntry {
                    source: source.clone(),
                    output,
                }),
                Err(e) => Err(FailedEntry {
                    source: source.clone(),
                    reason: e.to_string(),
                }),
            }
        })
        .collect();

    let mut report = BatchReport {
        filter: kind,
        processed: Vec::new(),
        failed: Vec::new(),
    };
    for outcome in outcomes {
        match outcome {
            Ok(entry) => report.processed.push(entry),
            Err(entry) => report.failed.push(entry),
        }
    }
    Ok(report)
}
