//! State for one loaded repository.
//!
//! A session is created when a repository load begins and replaced wholesale
//! by the next load. Edit, export and generation actions read from it.

use crate::error::RepotreeError;
use crate::generate::{GenerateRequest, GenerateResponse};
use crate::repo_url::RepoUrl;
use crate::types::{FileContent, Snapshot};
use std::fs;
use std::path::{Path, PathBuf};

pub const README_FILE_NAME: &str = "README.md";

#[derive(Debug, Clone)]
pub struct Session {
    repo: RepoUrl,
    structure: String,
    readme: Option<String>,
    analyzed_files: Vec<FileContent>,
}

impl Session {
    /// Starts an empty session for `repo_url`.
    pub fn begin(repo_url: &str) -> Result<Self, RepotreeError> {
        Ok(Self {
            repo: RepoUrl::parse(repo_url)?,
            structure: String::new(),
            readme: None,
            analyzed_files: Vec::new(),
        })
    }

    /// Replaces the tree text, README and analyzed files with those of
    /// `snapshot`.
    pub fn load(&mut self, snapshot: Snapshot) {
        self.structure = snapshot.rendered;
        self.readme = snapshot.readme;
        self.analyzed_files = snapshot.key_files;
    }

    pub fn repo(&self) -> &RepoUrl {
        &self.repo
    }

    pub fn structure(&self) -> &str {
        &self.structure
    }

    pub fn readme(&self) -> Option<&str> {
        self.readme.as_deref()
    }

    pub fn set_readme(&mut self, text: impl Into<String>) {
        self.readme = Some(text.into());
    }

    pub fn analyzed_files(&self) -> &[FileContent] {
        &self.analyzed_files
    }

    /// The request body for the generation service. Empty parts are omitted.
    pub fn generate_request(&self) -> GenerateRequest {
        GenerateRequest {
            repo_url: self.repo.as_str().to_string(),
            repo_structure: Some(self.structure.clone()).filter(|s| !s.is_empty()),
            existing_readme: self.readme.clone(),
            file_contents: Some(self.analyzed_files.clone()).filter(|f| !f.is_empty()),
        }
    }

    /// Replaces the README with the generated document, unwrapped from any
    /// code fence.
    pub fn apply_response(&mut self, response: &GenerateResponse) {
        self.readme = Some(response.markdown());
    }

    /// Writes the README into `dir` as `README.md`, returning the path
    /// written. A session without a README writes an empty file.
    pub fn export_readme(&self, dir: impl AsRef<Path>) -> Result<PathBuf, RepotreeError> {
        let path = dir.as_ref().join(README_FILE_NAME);
        fs::write(&path, self.readme.as_deref().unwrap_or_default())
            .map_err(|e| RepotreeError::io(&path, e))?;
        Ok(path)
    }
}
