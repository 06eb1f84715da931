// src/error.rs
// =============================================================================
// Every way generating a tree can fail, as one enum.
//
// The messages are what the user sees. We print them verbatim, so they are
// written as full sentences telling the user what to do next.
//
// Rust concepts:
// - Enums with data: each variant can carry its own fields
// - thiserror: derives std::error::Error and Display from #[error(...)]
// - #[from]: lets the ? operator convert other error types into ours
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    /// The quota header said 0 requests remain. Detected before the body is read.
    #[error(
        "GitHub API rate limit exceeded. Limit resets at {reset_at}. Please enter a valid \
         Personal Access Token (PAT) with 'repo' scope (--token or GITHUB_TOKEN) to increase \
         the limit to 5,000 requests/hour."
    )]
    RateLimitExceeded { reset_at: String },

    /// HTTP 403 - either out of quota or the repo is not visible to us
    #[error(
        "GitHub API rate limit exceeded or access denied. Please enter a valid Personal \
         Access Token (PAT) with \"repo\" scope (--token or GITHUB_TOKEN) to increase the \
         limit to 5,000 requests/hour."
    )]
    RateLimitOrAccessDenied,

    /// HTTP 404
    #[error("Repository not found. Check the owner, repo name, or URL.")]
    RepositoryNotFound,

    /// HTTP 401
    #[error("Invalid token. Ensure your Personal Access Token has \"repo\" scope.")]
    InvalidToken,

    /// Any other non-success status
    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    /// The URL did not look like https://github.com/<owner>/<repo>
    #[error("Invalid GitHub URL. Use format: https://github.com/owner/repo")]
    InvalidUrl,

    /// A required input was empty. The message says which one.
    #[error("{0}")]
    MissingField(String),

    #[error("Failed to copy to clipboard: {0}")]
    ClipboardFailure(String),

    /// The request never got a response (DNS, TLS, connection reset, ...)
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response was not the JSON array of entries we expected
    #[error("Unexpected response from GitHub: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured API base URL could not be used to build a request URL
    #[error("Invalid API URL: {0}")]
    ApiUrl(String),
}
