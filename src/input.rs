// src/input.rs
// =============================================================================
// Turns what the user typed into an owner/repo pair.
//
// Three ways in:
// - URL mode:    https://github.com/rust-lang/rust(.git)(/tree/master/...)
// - Manual mode: owner and repo given separately
// - Deep link:   any URL or query string carrying ?owner=...&repo=...
//                (pre-fills manual mode)
//
// All validation happens here, before any network request is made.
//
// Rust concepts:
// - OnceLock: build the Regex once and reuse it
// - Option vs Result: parse_repo_url says "no match" with None, the
//   RepoInput constructors explain *why* with a TreeError
// =============================================================================

use crate::error::TreeError;
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

// The repository the user wants a tree for
//
// Both fields are guaranteed non-empty once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInput {
    pub owner: String,
    pub repo: String,
}

// owner, then a lazy repo name so ".git" and any trailing path are left out
fn repo_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^https://github\.com/([^/]+)/([^/]+?)(?:\.git)?(?:/.*)?$")
            .expect("repo URL regex is valid")
    })
}

// Extracts owner and repo from a GitHub URL
//
// Returns None when the URL does not match the expected shape.
//
// Example:
//   "https://github.com/rust-lang/rust.git" -> rust-lang / rust
pub fn parse_repo_url(url: &str) -> Option<RepoInput> {
    let caps = repo_url_regex().captures(url.trim())?;
    Some(RepoInput {
        owner: caps[1].to_string(),
        repo: caps[2].to_string(),
    })
}

impl RepoInput {
    // URL mode
    pub fn from_url(url: &str) -> Result<Self, TreeError> {
        if url.trim().is_empty() {
            return Err(TreeError::MissingField("Please enter a repository URL".to_string()));
        }
        parse_repo_url(url).ok_or(TreeError::InvalidUrl)
    }

    // Manual mode: owner and repo are taken as typed (minus surrounding spaces)
    pub fn manual(owner: &str, repo: &str) -> Result<Self, TreeError> {
        let owner = owner.trim();
        let repo = repo.trim();
        if owner.is_empty() || repo.is_empty() {
            return Err(TreeError::MissingField(
                "Please enter both owner and repository name".to_string(),
            ));
        }
        Ok(RepoInput {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    // Deep link: reads the owner and repo query parameters
    //
    // Accepts a full URL ("https://example.com/?owner=a&repo=b"), or just
    // the query part with or without the leading "?".
    // Returns Some only when both parameters are present and non-empty.
    pub fn from_query(link: &str) -> Option<Self> {
        let link = link.trim();
        let query = match Url::parse(link) {
            Ok(url) => url.query().unwrap_or("").to_string(),
            Err(_) => link.trim_start_matches('?').to_string(),
        };

        let mut owner = None;
        let mut repo = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "owner" => owner = Some(value.into_owned()),
                "repo" => repo = Some(value.into_owned()),
                _ => {}
            }
        }

        match (owner, repo) {
            (Some(owner), Some(repo)) => RepoInput::manual(&owner, &repo).ok(),
            _ => None,
        }
    }
}

// What the user filled in, before validation
//
// One variant per input mode. resolve() turns it into a RepoInput or the
// error to show; no network request is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormInput {
    Url(String),
    Manual { owner: String, repo: String },
    Link(String),
}

impl FormInput {
    pub fn resolve(&self) -> Result<RepoInput, TreeError> {
        match self {
            FormInput::Url(url) => RepoInput::from_url(url),
            FormInput::Manual { owner, repo } => RepoInput::manual(owner, repo),
            FormInput::Link(link) => RepoInput::from_query(link).ok_or_else(|| {
                TreeError::MissingField(
                    "The link needs both an `owner` and a `repo` query parameter".to_string(),
                )
            }),
        }
    }
}

impl std::fmt::Display for RepoInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
