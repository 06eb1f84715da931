// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Currently implements:
// - Listing one directory through the contents endpoint
// - Walking the whole repository depth-first, one request at a time
// - Rate-limit detection and status-code to error mapping
//
// Rust concepts:
// - Modules: Organizing related functionality
// - Public API: What other parts of the app can use
// =============================================================================

mod fetch;
mod models;

// Re-export the client so callers write `github::GitHubClient`
pub use fetch::{ClientConfig, GitHubClient, DEFAULT_API_URL};
