//! Building a nested tree from slash-delimited repository paths and rendering
//! it with box-drawing connectors.
//!
//! Sibling order is the order in which names were first seen, never sorted, so
//! the same input sequence always renders to the same bytes.

use crate::error::RepotreeError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// An ordered mapping from path segment to child node.
///
/// Entries keep their first-insertion order. A side index gives constant-time
/// lookup by name so wide directories stay cheap to fill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    entries: Vec<(String, TreeNode)>,
    index: HashMap<String, usize>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&TreeNode> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// Iterates over `(name, node)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TreeNode)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Inserts `node` under `name` unless the name is already taken.
    ///
    /// Returns `false` and leaves the existing value untouched when `name`
    /// was present.
    pub fn insert(&mut self, name: impl Into<String>, node: TreeNode) -> bool {
        let name = name.into();
        if self.index.contains_key(&name) {
            return false;
        }
        self.push(name, node);
        true
    }

    fn get_or_insert_with(&mut self, name: &str, make: impl FnOnce() -> TreeNode) -> &mut TreeNode {
        let idx = match self.index.get(name) {
            Some(&i) => i,
            None => self.push(name.to_owned(), make()),
        };
        &mut self.entries[idx].1
    }

    fn push(&mut self, name: String, node: TreeNode) -> usize {
        let idx = self.entries.len();
        self.index.insert(name.clone(), idx);
        self.entries.push((name, node));
        idx
    }
}

/// A node in a repository tree: either a directory with ordered children or a
/// file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Directory(Directory),
    File,
}

impl Default for TreeNode {
    fn default() -> Self {
        TreeNode::Directory(Directory::new())
    }
}

impl TreeNode {
    pub fn is_file(&self) -> bool {
        matches!(self, TreeNode::File)
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, TreeNode::Directory(_))
    }

    pub fn as_directory(&self) -> Option<&Directory> {
        match self {
            TreeNode::Directory(dir) => Some(dir),
            TreeNode::File => None,
        }
    }

    /// Looks up a descendant by its `/`-delimited path relative to this node.
    pub fn lookup(&self, path: &str) -> Option<&TreeNode> {
        path.split('/')
            .try_fold(self, |node, segment| node.as_directory()?.get(segment))
    }

    /// Number of file leaves beneath this node.
    pub fn file_count(&self) -> usize {
        match self {
            TreeNode::File => 1,
            TreeNode::Directory(dir) => dir.iter().map(|(_, child)| child.file_count()).sum(),
        }
    }

    /// The `/`-joined path of every file leaf, in render order.
    pub fn file_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let TreeNode::Directory(dir) = self {
            collect_file_paths(dir, "", &mut out);
        }
        out
    }
}

fn collect_file_paths(dir: &Directory, base: &str, out: &mut Vec<String>) {
    for (name, child) in dir.iter() {
        let path = if base.is_empty() {
            name.to_owned()
        } else {
            format!("{base}/{name}")
        };
        match child {
            TreeNode::File => out.push(path),
            TreeNode::Directory(sub) => collect_file_paths(sub, &path, out),
        }
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

/// Directories serialize as JSON objects in insertion order, files as `null`.
impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TreeNode::File => serializer.serialize_unit(),
            TreeNode::Directory(dir) => {
                let mut map = serializer.serialize_map(Some(dir.len()))?;
                for (name, child) in dir.iter() {
                    map.serialize_entry(name, child)?;
                }
                map.end()
            }
        }
    }
}

/// Builds a tree from an ordered sequence of `/`-delimited paths.
///
/// Segments are taken literally, so leading, trailing or doubled slashes
/// produce entries with empty names. The first path to claim a name decides
/// whether it is a file or a directory. A later path that would descend
/// through an existing file is dropped from that point, and a later path
/// naming an existing directory leaves it as is.
///
/// Never fails. See [`build_strict`] for a variant that rejects conflicts.
pub fn build<I, S>(paths: I) -> TreeNode
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut root = Directory::new();
    for path in paths {
        let path = path.as_ref();
        if let Err(_conflict) = insert_path(&mut root, path) {
            #[cfg(feature = "logging")]
            tracing::debug!("Keeping earlier entry over conflicting path: {}", _conflict);
        }
    }
    TreeNode::Directory(root)
}

/// Like [`build`], but fails on the first path whose file/directory claim
/// contradicts an earlier path.
///
/// Repeating an identical path is not a conflict.
///
/// # Errors
///
/// Returns [`RepotreeError::PathConflict`] naming the offending path.
pub fn build_strict<I, S>(paths: I) -> Result<TreeNode, RepotreeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut root = Directory::new();
    for path in paths {
        insert_path(&mut root, path.as_ref())?;
    }
    Ok(TreeNode::Directory(root))
}

fn insert_path(root: &mut Directory, path: &str) -> Result<(), RepotreeError> {
    let conflict = |existing: &'static str| RepotreeError::PathConflict {
        path: path.to_owned(),
        existing,
    };
    let mut current = root;
    let mut segments = path.split('/').peekable();
    while let Some(segment) = segments.next() {
        let is_last = segments.peek().is_none();
        let node = current.get_or_insert_with(segment, || {
            if is_last {
                TreeNode::File
            } else {
                TreeNode::Directory(Directory::new())
            }
        });
        current = match node {
            TreeNode::Directory(dir) if !is_last => dir,
            TreeNode::Directory(_) => return Err(conflict("directory")),
            TreeNode::File if is_last => return Ok(()),
            TreeNode::File => return Err(conflict("file")),
        };
    }
    Ok(())
}

/// Renders a tree in the style of the `tree` command, without a root line.
///
/// An empty directory or a bare file renders as the empty string. Lines are
/// joined with `\n` and there is no trailing newline.
pub fn render(node: &TreeNode) -> String {
    render_with_prefix(node, "")
}

/// Renders a tree with every line starting with `prefix`.
pub fn render_with_prefix(node: &TreeNode, prefix: &str) -> String {
    let mut lines = Vec::new();
    if let TreeNode::Directory(dir) = node {
        collect_lines(dir, prefix, &mut lines);
    }
    lines.join("\n")
}

fn collect_lines(dir: &Directory, prefix: &str, lines: &mut Vec<String>) {
    let last = dir.len().saturating_sub(1);
    for (i, (name, child)) in dir.iter().enumerate() {
        let is_last = i == last;
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        lines.push(format!("{prefix}{connector}{name}"));
        if let TreeNode::Directory(sub) = child {
            let continuation = if is_last { SPACE } else { PIPE };
            collect_lines(sub, &format!("{prefix}{continuation}"), lines);
        }
    }
}
