// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The three subcommands are the three ways to name a repository:
//   repo-tree url https://github.com/rust-lang/rust
//   repo-tree manual rust-lang rust
//   repo-tree link "https://example.com/?owner=rust-lang&repo=rust"
//
// Options shared by all of them (token, output format, copy) are global,
// so they can go before or after the subcommand.
//
// Rust concepts:
// - Derive macros: clap generates the parser from these types
// - env = "...": a flag falls back to an environment variable
// =============================================================================

use clap::{Parser, Subcommand};
use url::Url;

use crate::github::DEFAULT_API_URL;

#[derive(Parser, Debug)]
#[command(
    name = "repo-tree",
    version,
    about = "Render the file tree of a GitHub repository for your docs",
    long_about = "repo-tree lists a GitHub repository through the REST API and prints its file \
                  hierarchy as a `tree`-style diagram, ready to paste into a README."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// GitHub Personal Access Token (raises the limit from 60 to 5,000 requests/hour)
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the GitHub REST API (for GitHub Enterprise)
    #[arg(long, global = true, env = "REPO_TREE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: Url,

    /// Print the tree as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Copy the rendered tree to the clipboard (via the terminal)
    #[arg(long, global = true)]
    pub copy: bool,

    /// Exit with code 1 if any directory could not be listed
    #[arg(long, global = true)]
    pub strict: bool,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the tree from a repository URL
    ///
    /// Example: repo-tree url https://github.com/rust-lang/rust
    Url {
        /// GitHub repository URL (e.g., https://github.com/owner/repo)
        repo_url: String,
    },

    /// Generate the tree from an owner and a repository name
    ///
    /// Example: repo-tree manual rust-lang rust
    Manual {
        /// Repository owner (user or organization)
        owner: String,

        /// Repository name
        repo: String,
    },

    /// Generate the tree from a link carrying ?owner=...&repo=...
    ///
    /// Example: repo-tree link "https://example.com/?owner=rust-lang&repo=rust"
    Link {
        /// Link or query string with `owner` and `repo` parameters
        link: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_command_with_global_flags() {
        let cli = Cli::try_parse_from([
            "repo-tree",
            "url",
            "https://github.com/user/repo",
            "--json",
            "--token",
            "abc",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.token.as_deref(), Some("abc"));
        assert!(matches!(cli.command, Commands::Url { ref repo_url } if repo_url == "https://github.com/user/repo"));
    }

    #[test]
    fn test_parse_manual_command() {
        let cli = Cli::try_parse_from(["repo-tree", "--copy", "manual", "octo", "demo"]).unwrap();

        assert!(cli.copy);
        match cli.command {
            Commands::Manual { owner, repo } => {
                assert_eq!(owner, "octo");
                assert_eq!(repo, "demo");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_manual_needs_two_arguments() {
        assert!(Cli::try_parse_from(["repo-tree", "manual", "octo"]).is_err());
    }

    #[test]
    fn test_invalid_api_url_is_rejected() {
        assert!(Cli::try_parse_from(["repo-tree", "--api-url", "not a url", "manual", "a", "b"]).is_err());
    }
}
