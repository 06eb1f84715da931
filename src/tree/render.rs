// src/tree/render.rs
// =============================================================================
// Renders a repository tree the way the classic `tree` command does:
//
//   my-repo/
//   ├── src/
//   │   └── main.rs
//   └── Cargo.toml
//
// How it works:
// - The first line is the repository name followed by "/"
// - Every entry gets "├── " unless it is the last of its siblings ("└── ")
// - Children are indented by extending the prefix: "│   " keeps the
//   parent's vertical line going, "    " ends it (parent was last)
//
// Entries are printed in the order GitHub returned them. We never sort.
//
// Rust concepts:
// - String building: push_str on one String instead of many allocations
// - Recursion with borrowed slices (&[TreeNode])
// =============================================================================

use super::{Listing, NodeKind, TreeNode};
use std::borrow::Cow;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_INDENT: &str = "│   ";
const SPACE_INDENT: &str = "    ";

// Renders the whole tree, headed by "<repo_name>/"
//
// repo_name comes from the request (what the user asked for), not from
// the tree. An empty name skips the header line.
pub fn render(repo_name: &str, nodes: &[TreeNode]) -> String {
    let mut out = String::new();
    render_level(nodes, 0, "", repo_name, &mut out);
    out
}

fn render_level(nodes: &[TreeNode], indent_level: usize, prefix: &str, repo_name: &str, out: &mut String) {
    if indent_level == 0 && !repo_name.is_empty() {
        out.push_str(repo_name);
        out.push_str("/\n");
    }

    for (index, node) in nodes.iter().enumerate() {
        let is_last = index == nodes.len() - 1;
        let connector = if is_last { LAST_BRANCH } else { BRANCH };

        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(node.name());
        if node.is_dir() {
            out.push('/');
        }
        out.push('\n');

        let children = node.children();
        if !children.is_empty() {
            let child_prefix = format!("{}{}", prefix, if is_last { SPACE_INDENT } else { PIPE_INDENT });
            render_level(children, indent_level + 1, &child_prefix, repo_name, out);
        }
    }
}

// Makes rendered text safe to print to a terminal
//
// File names come from the repository and may hold escape sequences or other
// control characters. Each one except '\n' becomes U+FFFD. Only for display:
// the copied text stays byte-for-byte what render() returned.
pub fn for_terminal(text: &str) -> Cow<'_, str> {
    let is_unsafe = |c: char| c.is_control() && c != '\n';
    if !text.contains(is_unsafe) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| if is_unsafe(c) { char::REPLACEMENT_CHARACTER } else { c })
            .collect(),
    )
}

// Counts shown after the tree, like the "N directories, M files" footer of `tree`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeSummary {
    pub directories: usize,
    pub files: usize,
    /// Directories whose listing failed and were rendered empty
    pub unlisted: usize,
}

impl TreeSummary {
    pub fn of(nodes: &[TreeNode]) -> Self {
        let mut summary = TreeSummary::default();
        summary.add(nodes);
        summary
    }

    fn add(&mut self, nodes: &[TreeNode]) {
        for node in nodes {
            match &node.kind {
                NodeKind::File => self.files += 1,
                NodeKind::Directory { children, listing } => {
                    self.directories += 1;
                    if matches!(listing, Listing::Failed { .. }) {
                        self.unlisted += 1;
                    }
                    self.add(children);
                }
            }
        }
    }
}

impl std::fmt::Display for TreeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} director{}, {} file{}",
            self.directories,
            if self.directories == 1 { "y" } else { "ies" },
            self.files,
            if self.files == 1 { "" } else { "s" }
        )?;
        if self.unlisted > 0 {
            write!(f, " ({} could not be listed)", self.unlisted)?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why pass `out: &mut String` instead of returning a String?
//    - Every level of recursion appends to the same buffer
//    - Returning and concatenating strings would copy text at every level
//
// 2. What is `nodes.len() - 1` when nodes is empty?
//    - It would underflow! But the loop body never runs for an empty slice,
//      so the subtraction never happens
//
// 3. Why &[TreeNode] instead of &Vec<TreeNode>?
//    - A slice works for any contiguous list (Vec, array, part of a Vec)
//    - Clippy recommends it for read-only parameters
// -----------------------------------------------------------------------------
