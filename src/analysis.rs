use crate::error::RepotreeError;
use crate::options::{BinaryDetection, RepotreeOptions};
use crate::types::{EntryKind, FileContent, RepoEntry};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Picks the blobs whose basename is one of `options.key_files` and whose
/// size, when known, is below `options.key_file_size_limit`.
pub fn select_key_files<'a>(entries: &'a [RepoEntry], options: &RepotreeOptions) -> Vec<&'a RepoEntry> {
    entries
        .iter()
        .filter(|e| e.kind == EntryKind::Blob)
        .filter(|e| options.key_files.iter().any(|k| k == e.file_name()))
        .filter(|e| e.size.is_none_or(|size| size < options.key_file_size_limit))
        .collect()
}

/// Finds the root `README.md`, matching the whole path case-insensitively.
pub fn find_readme(entries: &[RepoEntry]) -> Option<&RepoEntry> {
    entries
        .iter()
        .find(|e| e.kind == EntryKind::Blob && e.path.eq_ignore_ascii_case("readme.md"))
}

/// Reads a text file under `root`, returning `None` if it looks binary.
pub fn read_text_file(
    root: &Path,
    relative: &str,
    binary_detection: BinaryDetection,
) -> Result<Option<String>, RepotreeError> {
    let path = root.join(relative);
    let file = File::open(&path).map_err(|e| RepotreeError::io(&path, e))?;
    let mut reader = BufReader::new(file);
    let mut first_chunk = Vec::with_capacity(4096);
    let _ = reader
        .by_ref()
        .take(4096)
        .read_to_end(&mut first_chunk)
        .map_err(|e| RepotreeError::io(&path, e))?;
    let is_binary = match binary_detection {
        BinaryDetection::Simple => first_chunk.contains(&0),
        BinaryDetection::Accurate => content_inspector::inspect(&first_chunk).is_binary(),
        BinaryDetection::None => false,
    };
    if is_binary {
        #[cfg(feature = "logging")]
        tracing::debug!("Binary file detected, skipping: {}", path.display());
        return Ok(None);
    }
    let mut rest = Vec::new();
    reader
        .read_to_end(&mut rest)
        .map_err(|e| RepotreeError::io(&path, e))?;
    first_chunk.extend_from_slice(&rest);
    Ok(Some(String::from_utf8_lossy(&first_chunk).into_owned()))
}

/// Reads the selected key files from a checkout, dropping binary ones.
///
/// Output order follows `selected`.
pub fn read_key_files(
    root: &Path,
    selected: &[&RepoEntry],
    options: &RepotreeOptions,
) -> Result<Vec<FileContent>, RepotreeError> {
    #[cfg(feature = "parallel")]
    let iter = selected.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = selected.iter();

    let read: Vec<Option<FileContent>> = iter
        .map(|entry| {
            let content = read_text_file(root, &entry.path, options.binary_detection)?;
            Ok::<_, RepotreeError>(content.map(|content| FileContent {
                path: entry.path.clone(),
                content,
            }))
        })
        .collect::<Result<Vec<_>, RepotreeError>>()?;
    Ok(read.into_iter().flatten().collect())
}
