//! copilot CLI: terminal client for the Knowledge Copilot API.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use knowledge_copilot::config::Overrides;
use knowledge_copilot::{Copilot, Outcome, Settings};

#[derive(Parser)]
#[command(name = "copilot", version, about = "Knowledge Copilot terminal client")]
struct Cli {
    /// Backend base address (overrides COPILOT_API_BASE and copilot.toml).
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Project id that scopes documents, queries and metrics.
    #[arg(long, global = true)]
    project: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show health, documents and metrics.
    Status,

    /// Upload pasted text, or a UTF-8 .txt/.md file with --file.
    Upload {
        /// Text to upload.
        text: Option<String>,

        /// Local file to upload instead of text.
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// Ask a question against the uploaded documents.
    Ask {
        question: String,

        /// Number of chunks to retrieve (1-20).
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=20))]
        top_k: Option<u8>,
    },

    /// Run the summary action over every listed document.
    Summarize,

    /// Rate an answer.
    Feedback {
        #[arg(long)]
        query_id: String,

        #[arg(long)]
        rating: u8,

        #[arg(long)]
        note: Option<String>,
    },

    /// Show one document with its chunks.
    Doc { id: String },

    /// Show a stored query.
    Query { id: String },

    /// Interactive session (default).
    Shell,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let overrides = Overrides {
        api_base: cli.api_base,
        project_id: cli.project,
    };
    let settings = Settings::load_with(&overrides).context("loading copilot settings")?;

    let mut copilot = Copilot::from_settings(&settings);
    copilot.mount().await;

    let outcome = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Status => Outcome::Completed,
        Commands::Upload { text, file } => match (text, file) {
            (_, Some(path)) => upload_path(&mut copilot, &path).await?,
            (Some(text), None) => copilot.upload(text).await,
            (None, None) => copilot.upload(String::new()).await,
        },
        Commands::Ask { question, top_k } => copilot.ask(question, top_k).await,
        Commands::Summarize => copilot.summarize().await,
        Commands::Feedback {
            query_id,
            rating,
            note,
        } => {
            copilot
                .feedback(Some(&query_id), rating, note.as_deref())
                .await
        }
        Commands::Doc { id } => copilot.show_document(&id).await,
        Commands::Query { id } => copilot.show_query(&id).await,
        Commands::Shell => {
            shell(&mut copilot).await?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    print!("{}", copilot.render());
    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn upload_path(copilot: &mut Copilot, path: &Path) -> Result<Outcome> {
    copilot
        .upload_path(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

const SHELL_HELP: &str = "\
commands:
  upload <text>            upload pasted text
  file <path>              upload a .txt/.md file
  ask <question>           ask a question
  summary                  run the summary action
  feedback <1-5> [note]    rate the last answer
  doc <id>                 show a document with its chunks
  query <id>               show a stored query
  project <id>             switch project
  refresh                  reload documents and metrics
  show                     print the page
  help                     this text
  quit                     leave";

async fn shell(copilot: &mut Copilot) -> Result<()> {
    print!("{}", copilot.render());
    println!("{}", "type `help` for commands".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let line = line.trim();
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match cmd {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{}", SHELL_HELP);
                continue;
            }
            "show" => {}
            "refresh" => {
                copilot.refresh().await;
            }
            "project" if !rest.is_empty() => {
                copilot.set_project(rest);
                copilot.refresh().await;
            }
            "upload" => {
                copilot.upload(rest).await;
            }
            "file" if !rest.is_empty() => {
                if let Err(err) = upload_path(copilot, Path::new(rest)).await {
                    eprintln!("{}", format!("{:#}", err).red());
                    continue;
                }
            }
            "ask" => {
                copilot.ask(rest, None).await;
            }
            "summary" => {
                copilot.summarize().await;
            }
            "feedback" => {
                let (rating, note) = rest.split_once(' ').unwrap_or((rest, ""));
                let Ok(rating) = rating.parse::<u8>() else {
                    println!("usage: feedback <1-5> [note]");
                    continue;
                };
                let note = Some(note.trim()).filter(|n| !n.is_empty());
                copilot.feedback(None, rating, note).await;
            }
            "doc" if !rest.is_empty() => {
                copilot.show_document(rest).await;
            }
            "query" if !rest.is_empty() => {
                copilot.show_query(rest).await;
            }
            _ => {
                println!("unknown command `{}`; type `help`", line);
                continue;
            }
        }
        print!("{}", copilot.render());
    }
    Ok(())
}
