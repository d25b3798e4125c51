use crate::analysis::{find_readme, read_key_files, read_text_file, select_key_files};
use crate::error::RepotreeError;
use crate::options::RepotreeOptions;
use crate::repo_url::RepoUrl;
use crate::source::{PathFilter, walk_local};
use crate::tree::{TreeNode, build, build_strict, render};
use crate::types::{FileContent, RepoEntry, Snapshot};
use std::path::Path;

fn build_tree(entries: &[RepoEntry], options: &RepotreeOptions) -> Result<TreeNode, RepotreeError> {
    let paths = entries.iter().map(|e| e.path.as_str());
    if options.strict {
        build_strict(paths)
    } else {
        Ok(build(paths))
    }
}

/// Builds a snapshot from entries obtained elsewhere, such as a remote
/// listing. Only key file paths are reported; use [`attach_contents`] to fill
/// in the README and key file contents once they have been fetched.
pub fn snapshot_from_entries(
    entries: Vec<RepoEntry>,
    options: &RepotreeOptions,
) -> Result<Snapshot, RepotreeError> {
    let entries = PathFilter::new(&options.ignore_patterns)?.apply(entries);
    let tree = build_tree(&entries, options)?;
    let rendered = render(&tree);
    let key_file_paths = select_key_files(&entries, options)
        .into_iter()
        .map(|e| e.path.clone())
        .collect();
    Ok(Snapshot {
        entries,
        tree,
        rendered,
        readme: None,
        key_file_paths,
        key_files: Vec::new(),
    })
}

/// Scans a local checkout: walks it, builds and renders the tree, and reads
/// the root README and key files.
pub fn scan_local(options: &RepotreeOptions) -> Result<Snapshot, RepotreeError> {
    let entries = walk_local(options)?;
    let mut snapshot = snapshot_from_entries(entries, options)?;

    let base = if options.root.is_file() {
        options.root.parent().unwrap_or(Path::new("."))
    } else {
        options.root.as_path()
    };
    snapshot.readme = match find_readme(&snapshot.entries) {
        Some(entry) => read_text_file(base, &entry.path, options.binary_detection)?,
        None => None,
    };
    let selected = select_key_files(&snapshot.entries, options);
    snapshot.key_files = read_key_files(base, &selected, options)?;

    #[cfg(feature = "logging")]
    tracing::debug!(
        "Scanned {} entries, {} key files, readme: {}",
        snapshot.entries.len(),
        snapshot.key_files.len(),
        snapshot.readme.is_some()
    );
    Ok(snapshot)
}

/// A repository file to download and the URL it is served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    pub path: String,
    pub url: String,
}

/// The raw-content URLs for the snapshot's README and key files on `branch`,
/// README first.
pub fn fetch_plan(snapshot: &Snapshot, repo: &RepoUrl, branch: &str) -> Vec<FetchTarget> {
    find_readme(&snapshot.entries)
        .map(|e| e.path.as_str())
        .into_iter()
        .chain(snapshot.key_file_paths.iter().map(String::as_str))
        .map(|path| FetchTarget {
            path: path.to_string(),
            url: repo.raw_url(branch, path),
        })
        .collect()
}

/// Fills in the README and key file contents of a snapshot built from a
/// listing.
///
/// `fetch` is called with each repository path and returns its text, or
/// `None` when it is unavailable. Unavailable key files are left out and an
/// unavailable README leaves `readme` unset.
pub fn attach_contents<F>(snapshot: &mut Snapshot, mut fetch: F) -> Result<(), RepotreeError>
where
    F: FnMut(&str) -> Result<Option<String>, RepotreeError>,
{
    if let Some(entry) = find_readme(&snapshot.entries) {
        snapshot.readme = fetch(&entry.path)?;
    }
    let mut key_files = Vec::with_capacity(snapshot.key_file_paths.len());
    for path in &snapshot.key_file_paths {
        match fetch(path)? {
            Some(content) => key_files.push(FileContent {
                path: path.clone(),
                content,
            }),
            None => {
                #[cfg(feature = "logging")]
                tracing::debug!("No content for key file {}", path);
            }
        }
    }
    snapshot.key_files = key_files;
    Ok(())
}
