use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Manifest and entry-point basenames that describe what a repository is.
pub const DEFAULT_KEY_FILES: &[&str] = &[
    "package.json",
    "requirements.txt",
    "pom.xml",
    "go.mod",
    "pyproject.toml",
    "app.py",
    "main.py",
    "index.js",
    "server.js",
    "main.go",
    "main.java",
];

/// Key files at or above this many bytes are left out of the analysis.
pub const DEFAULT_KEY_FILE_SIZE_LIMIT: u64 = 15_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryDetection {
    Simple,
    Accurate,
    None,
}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepotreeOptions {
    pub root: PathBuf,
    pub respect_gitignore: bool,
    pub max_depth: Option<usize>,
    pub include_hidden: bool,
    pub follow_links: bool,
    pub ignore_patterns: Vec<String>,
    pub key_files: Vec<String>,
    pub key_file_size_limit: u64,
    pub binary_detection: BinaryDetection,
    pub strict: bool,
}
impl Default for RepotreeOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            respect_gitignore: true,
            max_depth: None,
            include_hidden: false,
            follow_links: false,
            ignore_patterns: Vec::new(),
            key_files: DEFAULT_KEY_FILES.iter().map(|s| s.to_string()).collect(),
            key_file_size_limit: DEFAULT_KEY_FILE_SIZE_LIMIT,
            binary_detection: BinaryDetection::Simple,
            strict: false,
        }
    }
}
#[derive(Debug, Default)]
pub struct RepotreeBuilder {
    options: RepotreeOptions,
}
impl RepotreeBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: RepotreeOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.options.respect_gitignore = yes;
        self
    }
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = Some(depth);
        self
    }
    pub fn no_limit_depth(mut self) -> Self {
        self.options.max_depth = None;
        self
    }
    pub fn include_hidden(mut self, yes: bool) -> Self {
        self.options.include_hidden = yes;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }
    pub fn key_files(mut self, names: Vec<String>) -> Self {
        self.options.key_files = names;
        self
    }
    pub fn key_file_size_limit(mut self, limit: u64) -> Self {
        self.options.key_file_size_limit = limit;
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.options.binary_detection = method;
        self
    }
    pub fn strict(mut self, yes: bool) -> Self {
        self.options.strict = yes;
        self
    }
    pub fn build(self) -> RepotreeOptions {
        self.options
    }
}
