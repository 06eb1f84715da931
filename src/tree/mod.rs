// src/tree/mod.rs
// =============================================================================
// This module holds the in-memory repository tree and its text rendering.
//
// Submodules:
// - render: Turns a list of TreeNode into `tree`-command style text
//
// A TreeNode is either a file or a directory. Only directories have
// children, and that rule is built into the enum so it cannot be broken.
//
// Rust concepts:
// - Enums with data: NodeKind::Directory carries its children
// - Recursive types: a Vec<TreeNode> inside a TreeNode is fine because
//   Vec stores its items on the heap
// =============================================================================

mod render;

pub use render::{for_terminal, render, TreeSummary};

use serde::Serialize;

// One file or directory inside the repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// Full slash-separated path from the repo root (e.g. "src/tree/mod.rs")
    pub path: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    File,
    Directory {
        /// In the order GitHub listed them
        children: Vec<TreeNode>,
        listing: Listing,
    },
}

// Whether a directory's children were actually fetched
//
// A Failed directory always has an empty children list. Keeping the reason
// around lets --json and --strict tell "empty" apart from "couldn't look".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Listing {
    Complete,
    Failed { reason: String },
}

impl TreeNode {
    pub fn file(path: impl Into<String>) -> Self {
        TreeNode {
            path: path.into(),
            kind: NodeKind::File,
        }
    }

    pub fn directory(path: impl Into<String>, children: Vec<TreeNode>) -> Self {
        TreeNode {
            path: path.into(),
            kind: NodeKind::Directory {
                children,
                listing: Listing::Complete,
            },
        }
    }

    // A directory whose listing request failed: no children, reason kept
    pub fn unlisted_directory(path: impl Into<String>, reason: impl Into<String>) -> Self {
        TreeNode {
            path: path.into(),
            kind: NodeKind::Directory {
                children: Vec::new(),
                listing: Listing::Failed {
                    reason: reason.into(),
                },
            },
        }
    }

    /// The last path segment, e.g. "mod.rs" for "src/tree/mod.rs"
    pub fn name(&self) -> &str {
        match self.path.rsplit_once('/') {
            Some((_, name)) => name,
            None => &self.path,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    /// Children of a directory, or an empty slice for a file
    pub fn children(&self) -> &[TreeNode] {
        match &self.kind {
            NodeKind::Directory { children, .. } => children,
            NodeKind::File => &[],
        }
    }
}
