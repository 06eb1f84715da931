// src/github/fetch.rs
// =============================================================================
// This module fetches a repository's file tree from the GitHub API.
//
// Strategy:
// - List the root directory with GET /repos/{owner}/{repo}/contents/
// - For every directory in the listing, list it too (recursively)
// - One request at a time, depth-first: a directory is fully resolved
//   before its next sibling is fetched
//
// Failure policy:
// - Anything that goes wrong at the top level is returned as an error
// - A subdirectory that can't be listed becomes an empty directory marked
//   as Failed, gets a warning in the log, and the walk carries on
//
// No timeout, no retry: a hung request hangs the walk.
//
// Rust concepts:
// - async recursion: an async fn can't call itself directly because its
//   future would have infinite size, so we return a boxed future instead
// - Result + ?: propagate errors without nested matches
// =============================================================================

use crate::error::TreeError;
use crate::tree::TreeNode;
use chrono::{Local, TimeZone};
use futures::future::{BoxFuture, FutureExt};
use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use super::models::{ContentEntry, EntryType};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const GITHUB_JSON: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("repo-tree/", env!("CARGO_PKG_VERSION"));
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

// Everything the client needs to know, gathered from CLI flags and env vars
#[derive(Clone)]
pub struct ClientConfig {
    /// Base of the REST API, e.g. https://api.github.com
    pub api_base: Url,
    /// Personal access token, sent as a Bearer header when present
    pub token: Option<String>,
}

impl ClientConfig {
    pub fn new(api_base: Url, token: Option<String>) -> Self {
        // An empty token means "no token"
        let token = token.filter(|t| !t.trim().is_empty());
        ClientConfig { api_base, token }
    }
}

// Hand-written so the token never ends up in a log line
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base", &self.api_base.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

pub struct GitHubClient {
    http: Client,
    config: ClientConfig,
}

impl GitHubClient {
    pub fn new(config: ClientConfig) -> Result<Self, TreeError> {
        // GitHub rejects requests without a User-Agent
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(GitHubClient { http, config })
    }

    // Fetches the tree under `path` ("" for the repository root)
    //
    // Returns the entries of that directory in GitHub's listing order, with
    // every subdirectory's children filled in.
    //
    // Why BoxFuture?
    // - This function awaits itself for each subdirectory
    // - Boxing gives the future a fixed size so the compiler accepts that
    pub fn fetch_tree<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        path: &'a str,
    ) -> BoxFuture<'a, Result<Vec<TreeNode>, TreeError>> {
        async move {
            let entries = self.list_directory(owner, repo, path).await?;

            let mut nodes = Vec::with_capacity(entries.len());
            for entry in entries {
                let node = match entry.entry_type {
                    EntryType::Dir => {
                        let children = self.fetch_tree(owner, repo, &entry.path).await;
                        match children {
                            Ok(children) => TreeNode::directory(entry.path, children),
                            Err(e) => {
                                // One unreadable directory must not sink the whole tree
                                warn!(path = %entry.path, error = %e, "Failed to fetch subdirectory");
                                TreeNode::unlisted_directory(entry.path, e.to_string())
                            }
                        }
                    }
                    // Files, symlinks and submodules are all leaves
                    _ => TreeNode::file(entry.path),
                };
                nodes.push(node);
            }

            Ok(nodes)
        }
        .boxed()
    }

    // Lists a single directory (one HTTP request)
    async fn list_directory(&self, owner: &str, repo: &str, path: &str) -> Result<Vec<ContentEntry>, TreeError> {
        let url = self.contents_url(owner, repo, path)?;
        debug!(%url, "Listing directory");

        let mut request = self.http.get(url).header(ACCEPT, GITHUB_JSON);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        // Check the quota before anything else, and before reading the body
        check_rate_limit(response.headers())?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }

        let body = response.bytes().await?;
        let entries: Vec<ContentEntry> = serde_json::from_slice(&body)?;
        Ok(entries)
    }

    // Builds {api_base}/repos/{owner}/{repo}/contents/{path}
    //
    // Each path segment is percent-encoded, so "my docs" becomes "my%20docs".
    fn contents_url(&self, owner: &str, repo: &str, path: &str) -> Result<Url, TreeError> {
        let mut url = self.config.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| TreeError::ApiUrl(self.config.api_base.to_string()))?
            .pop_if_empty()
            .extend(["repos", owner, repo, "contents"])
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }
}

// Fails with RateLimitExceeded when the remaining quota is exactly zero
fn check_rate_limit(headers: &HeaderMap) -> Result<(), TreeError> {
    let remaining = header_number(headers, RATE_LIMIT_REMAINING);
    if let Some(remaining) = remaining {
        debug!(remaining, "GitHub API quota");
    }

    if remaining == Some(0) {
        let reset_at = format_reset_time(header_number(headers, RATE_LIMIT_RESET));
        return Err(TreeError::RateLimitExceeded { reset_at });
    }
    Ok(())
}

fn header_number(headers: &HeaderMap, name: &str) -> Option<i64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

// Turns the reset epoch (seconds) into local time, or "soon" if we can't
fn format_reset_time(epoch_secs: Option<i64>) -> String {
    epoch_secs
        .and_then(|secs| Local.timestamp_opt(secs, 0).single())
        .map(|time| time.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "soon".to_string())
}

// Maps a non-success status to the error the user will see
//
// The reason is the standard phrase for the code, not the one the server
// sent: reqwest does not expose the response's reason phrase. Codes with no
// standard phrase (599, 499, ...) read "Unknown".
fn status_error(status: StatusCode) -> TreeError {
    match status {
        StatusCode::FORBIDDEN => TreeError::RateLimitOrAccessDenied,
        StatusCode::NOT_FOUND => TreeError::RepositoryNotFound,
        StatusCode::UNAUTHORIZED => TreeError::InvalidToken,
        other => TreeError::Http {
            status: other.as_u16(),
            reason: other.canonical_reason().unwrap_or("Unknown").to_string(),
        },
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is fetch_tree not an `async fn`?
//    - An async fn compiles into a state machine that contains every future
//      it awaits. Awaiting itself would make that state machine contain
//      itself, which has no finite size
//    - Returning BoxFuture puts the inner future on the heap, breaking the cycle
//    - `.boxed()` comes from FutureExt and requires the future to be Send
//
// 2. What does the 'a lifetime mean here?
//    - The returned future borrows self, owner, repo and path
//    - 'a says: the future can't outlive any of them
//
// 3. Why read headers before the status code?
//    - When the quota is gone, GitHub answers 403. Checking the quota first
//      lets us tell the user *when* it resets instead of a vaguer message
// -----------------------------------------------------------------------------
