use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum RepotreeError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(String),
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("Invalid repository URL: {0}")]
    InvalidRepoUrl(String),
    #[error("Malformed JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("Repository API error: {0}")]
    Api(String),
    #[error("Generation service error: {0}")]
    Service(String),
    #[error("Serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Path '{path}' conflicts with existing {existing} entry")]
    PathConflict { path: String, existing: &'static str },
}
impl RepotreeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RepotreeError::Io {
            path: path.into(),
            source,
        }
    }
}
