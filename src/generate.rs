//! Request and response bodies for a README generation service's
//! `POST /generate-readme` endpoint.

use crate::error::RepotreeError;
use crate::types::FileContent;
use serde::{Deserialize, Serialize};

/// The JSON body sent to the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub repo_url: String,
    /// The rendered file tree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_structure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_readme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_contents: Option<Vec<FileContent>>,
}

impl GenerateRequest {
    pub fn to_json(&self, pretty: bool) -> Result<String, RepotreeError> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
        .map_err(RepotreeError::Serialize)
    }
}

/// A successful reply from the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub readme: String,
}

impl GenerateResponse {
    /// Parses a reply body. A `{"detail": ...}` error body becomes
    /// [`RepotreeError::Service`].
    pub fn from_json(json: &str) -> Result<Self, RepotreeError> {
        serde_json::from_str(json).map_err(|e| {
            match serde_json::from_str::<ServiceError>(json) {
                Ok(service) => RepotreeError::Service(service.detail),
                Err(_) => RepotreeError::Parse(e),
            }
        })
    }

    /// The generated document with one wrapping code fence removed.
    pub fn markdown(&self) -> String {
        strip_code_fence(&self.readme)
    }
}

/// The error body the service returns with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    pub detail: String,
}

/// Removes a fence wrapping the whole text, e.g. ` ```markdown ... ``` `, and
/// trims the result.
///
/// The text must both open and close with a fence, and the opening line may
/// carry at most one info word. Anything else is only trimmed, so a document
/// that merely starts with a code block keeps it.
pub fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed.to_string();
    };
    match inner.split_once('\n') {
        Some((info, body)) if !info.trim().contains(char::is_whitespace) => body.trim().to_string(),
        _ => trimmed.to_string(),
    }
}
