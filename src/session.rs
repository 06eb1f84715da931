// src/session.rs
// =============================================================================
// The state of one "generate a tree" session.
//
// It remembers:
// - the last successfully generated tree (input, nodes and rendered text)
// - the last error message shown to the user
//
// Rules:
// - A failed generation clears the previous tree
// - A rejected input (bad URL, empty field) or a failed copy only sets the
//   error message; the previous tree stays
//
// The session only sees the fetcher through the TreeSource trait, so the
// tests below drive it with canned trees instead of a web server.
//
// Rust concepts:
// - Traits as seams between modules
// - &mut self: only one generate() can run at a time, checked at compile time
// =============================================================================

use crate::clipboard::{Clipboard, CopyFeedback};
use crate::error::TreeError;
use crate::github::GitHubClient;
use crate::input::{FormInput, RepoInput};
use crate::tree::{render, TreeNode};
use futures::future::BoxFuture;
use tokio::task::JoinHandle;
use tracing::info;

// Anything that can produce the tree under a path of a repository
pub trait TreeSource {
    fn fetch_tree<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        path: &'a str,
    ) -> BoxFuture<'a, Result<Vec<TreeNode>, TreeError>>;
}

impl TreeSource for GitHubClient {
    fn fetch_tree<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        path: &'a str,
    ) -> BoxFuture<'a, Result<Vec<TreeNode>, TreeError>> {
        GitHubClient::fetch_tree(self, owner, repo, path)
    }
}

// One successful generation
#[derive(Debug, Clone)]
pub struct GeneratedTree {
    pub input: RepoInput,
    pub nodes: Vec<TreeNode>,
    /// The rendered text, exactly what gets printed and copied
    pub text: String,
}

#[derive(Debug, Default)]
pub struct Session {
    current: Option<GeneratedTree>,
    error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&GeneratedTree> {
        self.current.as_ref()
    }

    /// Message of the last failure, if the last action failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // Fetches and renders the whole repository
    //
    // On success the result is available through current(). On failure the
    // previous tree is dropped and error() holds the message.
    pub async fn generate(&mut self, source: &dyn TreeSource, input: RepoInput) -> Result<(), TreeError> {
        info!(repo = %input, "Generating tree");
        self.error = None;

        let fetched = source.fetch_tree(&input.owner, &input.repo, "").await;
        match fetched {
            Ok(nodes) => {
                // The header line uses the name the user asked for
                let text = render(&input.repo, &nodes);
                self.current = Some(GeneratedTree { input, nodes, text });
                Ok(())
            }
            Err(e) => {
                self.current = None;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    // Validates the form, then generates
    //
    // Invalid input is rejected before the source is ever called, and the
    // previous tree is kept.
    pub async fn submit(&mut self, source: &dyn TreeSource, form: &FormInput) -> Result<(), TreeError> {
        match form.resolve() {
            Ok(input) => self.generate(source, input).await,
            Err(e) => Err(self.reject(e)),
        }
    }

    // Records an error that happened before any fetch (input validation)
    pub fn reject(&mut self, err: TreeError) -> TreeError {
        self.error = Some(err.to_string());
        err
    }

    // Copies the current tree; Ok(None) when there is nothing to copy yet
    pub fn copy(
        &mut self,
        clipboard: &mut dyn Clipboard,
        feedback: &CopyFeedback,
    ) -> Result<Option<JoinHandle<()>>, TreeError> {
        let Some(current) = &self.current else {
            return Ok(None);
        };
        match feedback.copy(clipboard, &current.text) {
            Ok(handle) => Ok(Some(handle)),
            Err(e) => Err(self.reject(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    // Returns queued results in order, one per fetch_tree call
    struct FakeSource {
        results: Mutex<Vec<Result<Vec<TreeNode>, TreeError>>>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn new(results: Vec<Result<Vec<TreeNode>, TreeError>>) -> Self {
            FakeSource {
                results: Mutex::new(results.into_iter().rev().collect()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl TreeSource for FakeSource {
        fn fetch_tree<'a>(
            &'a self,
            _owner: &'a str,
            _repo: &'a str,
            _path: &'a str,
        ) -> BoxFuture<'a, Result<Vec<TreeNode>, TreeError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self
                .results
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(Vec::new()));
            async move { next }.boxed()
        }
    }

    #[derive(Default)]
    struct RecordingClipboard {
        copied: Vec<String>,
    }

    impl Clipboard for RecordingClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), TreeError> {
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    fn input() -> RepoInput {
        RepoInput::manual("octo", "demo").unwrap()
    }

    #[tokio::test]
    async fn test_generate_renders_with_requested_repo_name() {
        let source = FakeSource::new(vec![Ok(vec![
            TreeNode::directory("a", vec![TreeNode::file("a/x")]),
            TreeNode::file("b"),
        ])]);
        let mut session = Session::new();

        session.generate(&source, input()).await.unwrap();
        let generated = session.current().unwrap();

        assert_eq!(generated.text, "demo/\n├── a/\n│   └── x\n└── b\n");
        assert_eq!(generated.nodes.len(), 2);
        assert!(session.error().is_none());
    }

    #[tokio::test]
    async fn test_failed_generation_clears_previous_tree() {
        let source = FakeSource::new(vec![
            Ok(vec![TreeNode::file("README.md")]),
            Err(TreeError::RepositoryNotFound),
        ]);
        let mut session = Session::new();

        session.generate(&source, input()).await.unwrap();
        assert!(session.current().is_some());

        let err = session.generate(&source, input()).await.unwrap_err();
        assert!(matches!(err, TreeError::RepositoryNotFound));
        assert!(session.current().is_none());
        assert_eq!(
            session.error(),
            Some("Repository not found. Check the owner, repo name, or URL.")
        );
    }

    #[tokio::test]
    async fn test_rejected_input_keeps_previous_tree() {
        let source = FakeSource::new(vec![Ok(vec![TreeNode::file("README.md")])]);
        let mut session = Session::new();
        session.generate(&source, input()).await.unwrap();

        let err = RepoInput::from_url("https://gitlab.com/a/b").unwrap_err();
        session.reject(err);

        assert!(session.current().is_some());
        assert_eq!(
            session.error(),
            Some("Invalid GitHub URL. Use format: https://github.com/owner/repo")
        );
    }

    #[tokio::test]
    async fn test_copy_places_exact_text() {
        let source = FakeSource::new(vec![Ok(vec![TreeNode::file("a"), TreeNode::file("b")])]);
        let mut session = Session::new();
        session.generate(&source, input()).await.unwrap();

        let mut clipboard = RecordingClipboard::default();
        let feedback = CopyFeedback::new();
        let handle = session.copy(&mut clipboard, &feedback).unwrap();

        assert!(handle.is_some());
        assert_eq!(clipboard.copied, vec!["demo/\n├── a\n└── b\n".to_string()]);
        assert!(feedback.is_copied());
    }

    #[tokio::test]
    async fn test_copy_without_tree_does_nothing() {
        let mut session = Session::new();
        let mut clipboard = RecordingClipboard::default();

        let handle = session.copy(&mut clipboard, &CopyFeedback::new()).unwrap();

        assert!(handle.is_none());
        assert!(clipboard.copied.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_without_fetching() {
        let source = FakeSource::new(vec![Ok(vec![TreeNode::file("README.md")])]);
        let mut session = Session::new();

        let form = FormInput::Url("https://gitlab.com/a/b".to_string());
        let err = session.submit(&source, &form).await.unwrap_err();

        assert!(matches!(err, TreeError::InvalidUrl));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            session.error(),
            Some("Invalid GitHub URL. Use format: https://github.com/owner/repo")
        );
    }

    #[tokio::test]
    async fn test_incomplete_link_is_rejected_without_fetching() {
        let source = FakeSource::new(vec![]);
        let mut session = Session::new();

        let form = FormInput::Link("?repo=demo".to_string());
        let err = session.submit(&source, &form).await.unwrap_err();

        assert!(matches!(err, TreeError::MissingField(_)));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_valid_form_fetches_once() {
        let source = FakeSource::new(vec![Ok(vec![TreeNode::file("README.md")])]);
        let mut session = Session::new();

        let form = FormInput::Manual {
            owner: "octo".to_string(),
            repo: "demo".to_string(),
        };
        session.submit(&source, &form).await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.current().unwrap().text, "demo/\n└── README.md\n");
    }
}
