use crate::tree::TreeNode;
use serde::{Deserialize, Serialize};

/// The kind of an entry in a repository listing, as GitHub names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Blob,
    Tree,
    /// A submodule pointer.
    Commit,
    #[serde(other)]
    Other,
}

/// One path in a repository snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoEntry {
    /// The `/`-delimited path relative to the repository root.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl RepoEntry {
    pub fn blob(path: impl Into<String>, size: Option<u64>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Blob,
            size,
        }
    }

    /// The last `/`-delimited segment of the path.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// A file path with its text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    pub path: String,
    pub content: String,
}

/// Everything gathered about one repository load.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    /// The entries the tree was built from, after filtering.
    #[serde(skip)]
    pub entries: Vec<RepoEntry>,
    /// The nested tree. Serializes as nested objects with `null` for files.
    pub tree: TreeNode,
    /// The tree rendered with box-drawing connectors.
    pub rendered: String,
    /// The root README, when one was found and could be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
    /// Paths of the key files selected for analysis.
    pub key_file_paths: Vec<String>,
    /// Contents of the key files that were read.
    pub key_files: Vec<FileContent>,
}
