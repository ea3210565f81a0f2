//! Single-file and directory batch extraction.
//!
//! Every file is extracted in isolation: a failure produces an error message
//! for that file (handed to an error handler) and never stops its siblings.
//! A directory batch writes each failure to a `.error` artifact next to where
//! the output would have gone.

use crate::codec;
use crate::detect::is_workbook_path;
use crate::error::Result;
use crate::options::ExtractOptions;
use rayon::prelude::*;
use std::collections::hash_map::{Entry, HashMap};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use walkdir::WalkDir;

/// Extension of per-file error artifacts.
pub const ERROR_EXTENSION: &str = "error";

/// Result of processing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The record was written to this path.
    Written(PathBuf),
    /// Extraction or writing failed with this message.
    Failed(String),
}

impl FileOutcome {
    /// Whether the file failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, FileOutcome::Failed(_))
    }
}

/// Summary of a directory batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Number of workbooks found
    pub total: usize,
    /// Whether any of them failed
    pub failed: bool,
}

fn file_name_of(input: &Path) -> &Path {
    input.file_name().map(Path::new).unwrap_or(input)
}

/// Where the record of `input` goes.
///
/// An existing directory receives `<stem>.input.json.gz` (or `.input.json`);
/// any other path is used as the output file itself.
pub fn output_path_for(input: &Path, output: &Path, options: &ExtractOptions) -> PathBuf {
    if output.is_dir() {
        output.join(file_name_of(input).with_extension(options.output_extension()))
    } else {
        output.to_path_buf()
    }
}

/// Path of the error artifact for `input` inside `output_dir`.
pub fn error_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(file_name_of(input).with_extension(ERROR_EXTENSION))
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Extract one file and write its record.
///
/// On failure the message is passed to `on_error`. If the handler itself
/// fails, that failure is logged and folded into the returned message.
pub fn process_file<F>(
    input: &Path,
    output: &Path,
    options: &ExtractOptions,
    on_error: F,
) -> FileOutcome
where
    F: FnOnce(&str) -> Result<()>,
{
    let start = Instant::now();
    let target = output_path_for(input, output, options);
    let mut suffix = String::new();

    let failure = match crate::extract_file(input) {
        Err(e) => {
            suffix.push_str(&format!(", convert error: {}", e));
            Some(format!("Message: {}", e))
        }
        Ok(book) => match create_parent(&target)
            .and_then(|_| codec::write_file(&book, &target, options.gzip))
        {
            Ok(()) => None,
            Err(e) => {
                suffix.push_str(&format!(", write error: {}", e));
                Some(format!("Write error\nMessage: {}", e))
            }
        },
    };

    let failure = failure.map(|message| match on_error(&message) {
        Ok(()) => message,
        Err(e) => {
            let message = format!(
                "Error handling error!\n{}\n\nOriginal error: {}",
                e, message
            );
            log::error!("{}", message);
            suffix.push_str(&format!(", error handling error: {}", e));
            message
        }
    });

    if !suffix.is_empty() {
        log::warn!(
            "Done: {}, took {:?}{}",
            input.display(),
            start.elapsed(),
            suffix
        );
    } else if options.verbose {
        log::info!("Done: {}, took {:?}", input.display(), start.elapsed());
    }

    match failure {
        Some(message) => FileOutcome::Failed(message),
        None => FileOutcome::Written(target),
    }
}

/// Workbooks under `dir`, recursively, in a stable order.
pub fn find_workbooks(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_workbook_path(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

/// Worker count for directory batches: one less than the available
/// parallelism, at least one.
pub fn worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get().saturating_sub(1))
        .unwrap_or(1)
        .max(1)
}

/// Extract every workbook under `input_dir` into `output_dir`.
///
/// The output tree mirrors the input's relative paths. A failed file leaves
/// a `.error` artifact holding its message; the batch keeps going either
/// way. `on_file` is called after each file, from the worker that ran it.
pub fn process_directory<P>(
    input_dir: &Path,
    output_dir: &Path,
    options: &ExtractOptions,
    on_file: P,
) -> Result<BatchReport>
where
    P: Fn(&Path, &FileOutcome) + Sync,
{
    let files = find_workbooks(input_dir);
    process_workbooks(&files, input_dir, output_dir, options, on_file)
}

/// Split `files` into those that can run and those whose output names
/// collide with an earlier file (`a.xlsx` next to `a.XLSX`). The first file
/// in list order keeps the name.
fn partition_clashes<'a>(
    files: &'a [PathBuf],
) -> (Vec<&'a PathBuf>, Vec<(&'a PathBuf, &'a PathBuf)>) {
    let mut owners: HashMap<(Option<&Path>, Option<&OsStr>), &PathBuf> = HashMap::new();
    let mut runnable = Vec::with_capacity(files.len());
    let mut clashes = Vec::new();
    for file in files {
        match owners.entry((file.parent(), file.file_stem())) {
            Entry::Occupied(owner) => clashes.push((file, *owner.get())),
            Entry::Vacant(slot) => {
                slot.insert(file);
                runnable.push(file);
            }
        }
    }
    (runnable, clashes)
}

/// Extract `files`, all found under `input_dir`, into `output_dir`.
///
/// Same as [`process_directory`] for a file list the caller already has.
/// A file whose output name clashes with an earlier one fails without
/// writing anything, so the two never race on the same output.
pub fn process_workbooks<P>(
    files: &[PathBuf],
    input_dir: &Path,
    output_dir: &Path,
    options: &ExtractOptions,
    on_file: P,
) -> Result<BatchReport>
where
    P: Fn(&Path, &FileOutcome) + Sync,
{
    fs::create_dir_all(output_dir)?;
    let failed = AtomicBool::new(false);
    let (runnable, clashes) = partition_clashes(files);

    for (file, owner) in clashes {
        let message = format!(
            "Output name clashes with {}, skipped {}",
            owner.display(),
            file.display()
        );
        log::warn!("{}", message);
        failed.store(true, Ordering::SeqCst);
        on_file(file, &FileOutcome::Failed(message));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(worker_count())
        .build()
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    pool.install(|| {
        runnable.par_iter().for_each(|file| {
            let relative_dir = file
                .parent()
                .and_then(|p| p.strip_prefix(input_dir).ok())
                .unwrap_or_else(|| Path::new(""));
            let target_dir = output_dir.join(relative_dir);

            let outcome = match fs::create_dir_all(&target_dir) {
                Ok(()) => process_file(file, &target_dir, options, |message| {
                    let error_file = error_path_for(file, &target_dir);
                    create_parent(&error_file)?;
                    fs::write(&error_file, message)?;
                    Ok(())
                }),
                Err(e) => {
                    log::error!("Cannot create {}: {}", target_dir.display(), e);
                    FileOutcome::Failed(e.to_string())
                }
            };

            if outcome.is_failure() {
                failed.fetch_or(true, Ordering::SeqCst);
            }
            on_file(file, &outcome);
        });
    });

    Ok(BatchReport {
        total: files.len(),
        failed: failed.load(Ordering::SeqCst),
    })
}
