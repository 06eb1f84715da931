// src/github/models.rs
// =============================================================================
// The bits of GitHub's contents API response we care about.
//
// GET /repos/{owner}/{repo}/contents/{path} returns a JSON array like:
//   [{ "name": "src", "path": "src", "type": "dir", "sha": "...", ... }, ...]
//
// We only read `path` and `type`. serde ignores every other field.
// =============================================================================

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentEntry {
    /// Full path from the repository root
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
    Symlink,
    Submodule,
    /// Anything GitHub adds later
    #[serde(other)]
    Unknown,
}
