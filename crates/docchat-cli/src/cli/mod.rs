//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use docchat_core::backend::{self, BackendClient};
use docchat_core::config::Config;
use docchat_core::session::Session;

mod commands;

#[derive(Parser)]
#[command(name = "docchat")]
#[command(version)]
#[command(about = "Terminal client for a document-chat backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Backend base URL (overrides DOCCHAT_BASE_URL and config)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Chat interactively with the uploaded documents
    Chat,
    /// Send a single question and print the reply
    Ask {
        /// The question to send
        #[arg(short, long)]
        prompt: String,
    },
    /// Upload documents (PDF, DOC, DOCX, PPTX, CSV)
    Upload {
        /// Files to upload
        #[arg(value_name = "FILE", required = true)]
        files: Vec<std::path::PathBuf>,
    },
    /// Manage uploaded documents
    Docs {
        #[command(subcommand)]
        command: DocsCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum DocsCommands {
    /// Lists uploaded documents
    List,
    /// Deletes a document by its stored name
    Delete {
        /// The stored name as reported by the backend (id prefix included)
        #[arg(value_name = "STORED_NAME")]
        name: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

/// Diagnostics go to stderr, filtered by DOCCHAT_LOG (default: warn).
fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = tracing_subscriber::EnvFilter::try_from_env("DOCCHAT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, base_url } = cli;

    // default to chat mode
    let command = command.unwrap_or(Commands::Chat);

    if let Commands::Config { command } = &command {
        return match command {
            ConfigCommands::Path => commands::config::path(),
        };
    }

    let config = Config::load().context("load config")?;
    let resolved = backend::resolve_base_url(base_url.as_deref(), config.base_url.as_deref())?;
    let client = BackendClient::new(resolved, config.request_timeout())?;
    let mut session = Session::new(client);

    match command {
        Commands::Chat => commands::chat::run(&mut session).await,
        Commands::Ask { prompt } => commands::ask::run(&mut session, &prompt).await,
        Commands::Upload { files } => commands::upload::run(&mut session, &files).await,
        Commands::Docs { command } => match command {
            DocsCommands::List => commands::docs::list(&mut session).await,
            DocsCommands::Delete { name } => commands::docs::delete(&mut session, &name).await,
        },
        Commands::Config { .. } => unreachable!("handled above"),
    }
}
