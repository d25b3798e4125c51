//! # Repotree
//!
//! `repotree` turns a repository's flat file listing into a nested tree and
//! renders it the way the `tree` command does, with box-drawing connectors.
//! Sibling order follows first appearance in the input, so identical input
//! always renders to identical text.
//!
//! Around that core it gathers what a README generation service needs: the
//! root README, a handful of manifest and entry-point files, and the request
//! body to post.
//!
//! # Features
//!
//! - `parallel`: Reads key files in parallel using Rayon.
//! - `logging`: Enables debug logging via the `tracing` crate.
//!
//! # Example
//!
//! ```
//! use repotree::{build, render};
//!
//! let tree = build(["src/main.rs", "src/lib.rs", "Cargo.toml"]);
//! assert_eq!(
//!     render(&tree),
//!     "├── src\n│   ├── main.rs\n│   └── lib.rs\n└── Cargo.toml"
//! );
//! ```

mod analysis;
mod engine;
mod error;
mod generate;
mod options;
pub mod output;
mod repo_url;
mod session;
mod source;
mod tree;
mod types;

pub use analysis::{find_readme, read_key_files, read_text_file, select_key_files};
pub use engine::{FetchTarget, attach_contents, fetch_plan, scan_local, snapshot_from_entries};
pub use error::RepotreeError;
pub use generate::{GenerateRequest, GenerateResponse, ServiceError, strip_code_fence};
pub use options::{
    BinaryDetection, DEFAULT_KEY_FILE_SIZE_LIMIT, DEFAULT_KEY_FILES, RepotreeBuilder,
    RepotreeOptions,
};
pub use repo_url::RepoUrl;
pub use session::{README_FILE_NAME, Session};
pub use source::{
    ApiError, PathFilter, RepoInfo, TreeListing, parse_listing, parse_path_list, parse_repo_info,
    walk_local,
};
pub use tree::{Directory, TreeNode, build, build_strict, render, render_with_prefix};
pub use types::{EntryKind, FileContent, RepoEntry, Snapshot};
