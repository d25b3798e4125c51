//! Sources of repository paths: GitHub tree listings, plain path lists and
//! local checkouts.

use crate::error::RepotreeError;
use crate::options::RepotreeOptions;
use crate::types::{EntryKind, RepoEntry};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The body of GitHub's recursive git-tree response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeListing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    pub tree: Vec<RepoEntry>,
    /// Set by the API when the listing was cut short.
    #[serde(default)]
    pub truncated: bool,
}

impl TreeListing {
    /// Paths of every non-directory entry, in listing order.
    ///
    /// Directory entries are skipped: the tree builder synthesizes directories
    /// from the paths beneath them.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.tree
            .iter()
            .filter(|e| e.kind != EntryKind::Tree)
            .map(|e| e.path.as_str())
    }

    /// Consumes the listing, keeping only non-directory entries.
    pub fn into_entries(self) -> Vec<RepoEntry> {
        self.tree
            .into_iter()
            .filter(|e| e.kind != EntryKind::Tree)
            .collect()
    }
}

/// The fields of `GET /repos/{owner}/{repo}` that a load needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoInfo {
    pub default_branch: String,
}

/// The body GitHub returns for a missing repository or an exhausted rate
/// limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

fn parse_api_body<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, RepotreeError> {
    serde_json::from_str(json).map_err(|e| match serde_json::from_str::<ApiError>(json) {
        Ok(api) => RepotreeError::Api(api.message),
        Err(_) => RepotreeError::Parse(e),
    })
}

/// Parses repository metadata, which names the branch to list.
///
/// # Errors
///
/// Returns [`RepotreeError::Api`] carrying the API's `message` for an error
/// body, or [`RepotreeError::Parse`] for anything else unexpected.
pub fn parse_repo_info(json: &str) -> Result<RepoInfo, RepotreeError> {
    parse_api_body(json)
}

/// Parses a recursive tree listing as returned by
/// `GET /repos/{owner}/{repo}/git/trees/{branch}?recursive=1`.
///
/// # Errors
///
/// Returns [`RepotreeError::Api`] for an API error body and
/// [`RepotreeError::Parse`] if the JSON has no `tree` array.
pub fn parse_listing(json: &str) -> Result<TreeListing, RepotreeError> {
    let listing: TreeListing = parse_api_body(json)?;
    #[cfg(feature = "logging")]
    if listing.truncated {
        tracing::debug!("Tree listing is truncated, {} entries", listing.tree.len());
    }
    Ok(listing)
}

/// Parses a newline-delimited list of paths into blob entries of unknown
/// size. Blank lines are skipped.
pub fn parse_path_list(text: &str) -> Vec<RepoEntry> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(|line| RepoEntry::blob(line, None))
        .collect()
}

/// Walks a local checkout and lists its files relative to `options.root`.
///
/// Siblings are visited in file-name order so the listing is reproducible.
/// `.gitignore` files apply whether or not the root is inside a git
/// repository. Directories matching `options.ignore_patterns` are pruned
/// without being descended into.
pub fn walk_local(options: &RepotreeOptions) -> Result<Vec<RepoEntry>, RepotreeError> {
    #[cfg(feature = "logging")]
    tracing::debug!("Walking local checkout at {}", options.root.display());
    let root = options.root.as_path();
    let filter = PathFilter::new(&options.ignore_patterns)?;
    let mut builder = WalkBuilder::new(root);
    builder
        .git_ignore(options.respect_gitignore)
        .require_git(false)
        .hidden(!options.include_hidden)
        .max_depth(options.max_depth)
        .follow_links(options.follow_links)
        .ignore(false)
        .sort_by_file_name(|a, b| a.cmp(b));
    if filter.set.is_some() {
        let prune_root = root.to_path_buf();
        builder.filter_entry(move |entry| {
            entry.depth() == 0 || !filter.is_ignored(&relative_path(&prune_root, entry.path()))
        });
    }

    let mut entries = Vec::new();
    for result in builder.build() {
        let entry = result.map_err(|e| RepotreeError::Walk(e.to_string()))?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let size = entry
            .metadata()
            .map_err(|e| RepotreeError::Walk(e.to_string()))?
            .len();
        entries.push(RepoEntry::blob(relative_path(root, entry.path()), Some(size)));
    }
    Ok(entries)
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    // A file given as the root is listed under its own name.
    if relative.as_os_str().is_empty() {
        return path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Glob filter applied to entries from any source.
///
/// A path is ignored when it or any of its ancestor directories matches one
/// of the patterns, so `node_modules` drops everything beneath it.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    set: Option<GlobSet>,
}

impl PathFilter {
    pub fn new(patterns: &[String]) -> Result<Self, RepotreeError> {
        if patterns.is_empty() {
            return Ok(Self::default());
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                RepotreeError::InvalidPattern(format!("'{}': {}", pattern, e))
            })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|e| RepotreeError::InvalidPattern(format!("failed to build glob set: {}", e)))?;
        Ok(Self { set: Some(set) })
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        let Some(set) = &self.set else {
            return false;
        };
        if set.is_match(path) {
            return true;
        }
        path.match_indices('/')
            .any(|(i, _)| set.is_match(&path[..i]))
    }

    pub fn apply(&self, entries: Vec<RepoEntry>) -> Vec<RepoEntry> {
        if self.set.is_none() {
            return entries;
        }
        entries
            .into_iter()
            .filter(|e| !self.is_ignored(&e.path))
            .collect()
    }
}
