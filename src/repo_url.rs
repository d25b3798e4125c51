use crate::error::RepotreeError;
use std::fmt;

const API_BASE: &str = "https://api.github.com";
const RAW_BASE: &str = "https://raw.githubusercontent.com";

/// A hosted repository identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoUrl {
    url: String,
    owner: String,
    name: String,
}

impl RepoUrl {
    /// Parses `http(s)://host/owner/repo`, tolerating a trailing `.git`, a
    /// trailing slash, extra path segments and a query or fragment.
    ///
    /// # Errors
    ///
    /// Returns [`RepotreeError::InvalidRepoUrl`] when the scheme or host is
    /// missing or the path has fewer than two segments.
    pub fn parse(url: &str) -> Result<Self, RepotreeError> {
        let url = url.trim();
        let invalid = |reason: &str| RepotreeError::InvalidRepoUrl(format!("{url}: {reason}"));

        let (scheme, rest) = url.split_once("://").ok_or_else(|| invalid("missing scheme"))?;
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid("unsupported scheme"));
        }
        let rest = rest.split(['?', '#']).next().unwrap_or_default();
        let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
        if host.is_empty() {
            return Err(invalid("missing host"));
        }

        let path = path.trim_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let (Some(owner), Some(name)) = (segments.next(), segments.next()) else {
            return Err(invalid("expected /owner/repository"));
        };
        let name = name.strip_suffix(".git").unwrap_or(name);
        if name.is_empty() {
            return Err(invalid("empty repository name"));
        }

        Ok(Self {
            url: url.to_string(),
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// The URL as given, trimmed.
    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `owner/name`.
    pub fn path(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// The repository metadata endpoint, which reports the default branch.
    pub fn repo_api_url(&self) -> String {
        format!("{API_BASE}/repos/{}", self.path())
    }

    /// The recursive git-tree endpoint for `branch`.
    pub fn tree_api_url(&self, branch: &str) -> String {
        format!("{API_BASE}/repos/{}/git/trees/{branch}?recursive=1", self.path())
    }

    /// The raw content URL of `file` on `branch`.
    pub fn raw_url(&self, branch: &str, file: &str) -> String {
        format!("{RAW_BASE}/{}/{branch}/{file}", self.path())
    }
}

impl fmt::Display for RepoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
