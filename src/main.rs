// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Turn the chosen subcommand into an owner/repo pair
// 3. Fetch the repository tree and render it
// 4. Print it (text or JSON) and optionally copy it
// 5. Exit with proper code (0 = success, 1 = strict mode found unlisted
//    directories, 2 = error)
//
// stdout only ever gets the tree. Progress, summaries and errors go to stderr.
// =============================================================================

mod cli;           // src/cli.rs - command-line parsing
mod clipboard;     // src/clipboard.rs - OSC 52 copy + "Copied!" feedback
mod error;         // src/error.rs - TreeError
mod github;        // src/github/ - GitHub API client
mod input;         // src/input.rs - URL / manual / deep-link parsing
mod logging;       // src/logging.rs - tracing setup
mod session;       // src/session.rs - generation state
mod tree;          // src/tree/ - TreeNode and rendering

use std::io::{IsTerminal, Write};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use clipboard::{CopyFeedback, Osc52Clipboard};
use github::{ClientConfig, GitHubClient};
use input::FormInput;
use session::Session;
use tree::{for_terminal, TreeSummary};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = tree printed
//   Ok(1) = tree printed, but --strict and some directories failed to list
//   Ok(2) = nothing printed; the session's error message went to stderr
//   Err   = unexpected error (writing to stdout, JSON encoding, ...)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    let mut session = Session::new();

    let form = form_input(&cli.command);
    let client = GitHubClient::new(ClientConfig::new(cli.api_url.clone(), cli.token.clone()))?;

    eprintln!("🔍 Fetching tree for {}", repo_label(&form));
    if session.submit(&client, &form).await.is_err() {
        // Bad input and fetch errors both abort; the message is in the session
        return Ok(report_error(&session));
    }
    let Some(generated) = session.current() else {
        return Ok(report_error(&session));
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&generated.nodes)?);
    } else {
        let mut stdout = std::io::stdout();
        if stdout.is_terminal() {
            write!(stdout, "{}", for_terminal(&generated.text))?;
        } else {
            write!(stdout, "{}", generated.text)?;
        }
        stdout.flush()?;
    }

    let summary = TreeSummary::of(&generated.nodes);
    eprintln!("\n📊 {}: {}", generated.input, summary);

    if cli.copy {
        if let Err(e) = copy_tree(&mut session).await {
            eprintln!("❌ {}", e);
            return Ok(2);
        }
    }

    if cli.strict && summary.unlisted > 0 {
        eprintln!("⚠️  {} director(ies) could not be listed", summary.unlisted);
        return Ok(1);
    }
    Ok(0)
}

// Prints the session's error message, like the error area of a form
fn report_error(session: &Session) -> i32 {
    eprintln!("❌ {}", session.error().unwrap_or("Unknown error"));
    2
}

// Each subcommand is one of the input modes
fn form_input(command: &Commands) -> FormInput {
    match command {
        Commands::Url { repo_url } => FormInput::Url(repo_url.clone()),
        Commands::Manual { owner, repo } => FormInput::Manual {
            owner: owner.clone(),
            repo: repo.clone(),
        },
        Commands::Link { link } => FormInput::Link(link.clone()),
    }
}

// What to show in the progress line, before the input is validated
fn repo_label(form: &FormInput) -> String {
    match form.resolve() {
        Ok(input) => input.to_string(),
        Err(_) => "the given repository".to_string(),
    }
}

// Copies the tree and shows "Copied!" until the feedback expires
async fn copy_tree(session: &mut Session) -> Result<()> {
    let feedback = CopyFeedback::new();
    let mut clipboard = Osc52Clipboard::stderr();

    let Some(expiry) = session.copy(&mut clipboard, &feedback)? else {
        return Ok(());
    };

    let mut stderr = std::io::stderr();
    if stderr.is_terminal() {
        // A transient status line, erased once the feedback turns off
        write!(stderr, "📋 Copied!")?;
        stderr.flush()?;
        expiry.await?;
        if !feedback.is_copied() {
            write!(stderr, "\r\x1b[K")?;
            stderr.flush()?;
        }
    } else {
        writeln!(stderr, "📋 Copied!")?;
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does run() return anyhow::Result but the modules return TreeError?
//    - The modules know exactly what can go wrong, so they say it with an enum
//    - main only needs to print the message, and anyhow accepts any error
//
// 2. What is `let ... else`?
//    - `let Some(x) = value else { return ...; };`
//    - Binds x if the pattern matches, otherwise runs the else block,
//      which must leave the function (return, break, panic, ...)
//
// 3. Why write "\r\x1b[K"?
//    - \r moves the cursor back to the start of the line
//    - \x1b[K clears from the cursor to the end of the line
//    - Together they erase the "Copied!" message
// -----------------------------------------------------------------------------
