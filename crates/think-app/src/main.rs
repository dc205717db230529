//! think: command-line front end for a think server.
//!
//! Renders pages to HTML and drives the records and file APIs.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use think_app::actions::{delete_note, save_note};
use think_app::shell;
use think_client::{ClientConfig, FileClient, RecordClient};
use think_core::defaults::LIST_WIDTH;
use think_core::{generate_uuid, parse_v4, Note, RecordKind, RecordStore};
use think_render::{generate_html_from_note, note_namespace, EditorSession};

#[derive(Parser)]
#[command(name = "think")]
#[command(author, version, about = "Notes and records from a think server")]
#[command(propagate_version = true)]
struct Cli {
    /// Server base URL (overrides config file and THINK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a page (`/r`, `/n/new`, `/n/<id>`) to HTML
    Open {
        /// Page path
        path: String,

        /// Viewport width in pixels
        #[arg(short, long, default_value_t = LIST_WIDTH)]
        width: u32,
    },

    /// List every record
    List,

    /// Show one record; notes are rendered to HTML
    Show {
        id: String,

        /// Container width in pixels
        #[arg(short, long, default_value_t = LIST_WIDTH)]
        width: u32,
    },

    /// Create a note
    New {
        /// Heading placed first (can specify multiple)
        #[arg(long)]
        heading: Vec<String>,

        /// Paragraph text (can specify multiple)
        #[arg(short, long)]
        text: Vec<String>,

        /// Ids of records to embed
        #[arg(long)]
        embed: Vec<String>,
    },

    /// Delete a record
    Delete { id: String },

    /// Check whether a record exists
    Exists { id: String },

    /// Render a note body from a JSON file without a server
    Render {
        file: PathBuf,

        /// Container width in pixels
        #[arg(short, long, default_value_t = LIST_WIDTH)]
        width: u32,
    },

    /// Attach a file to a record
    Upload {
        id: String,
        file: PathBuf,

        /// Name to store the file under (default: the file's name)
        #[arg(short, long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let _guard = init_logging();

    let cli = Cli::parse();

    let result = tokio::select! {
        result = run(cli) => result,
        _ = tokio::signal::ctrl_c() => Err(anyhow!("Interrupted")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing with configurable output.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, enables file logging)
///   LOG_ANSI    - "true"/"false" override ANSI colors
///   RUST_LOG    - standard env filter (default: "think=info")
///
/// Console output goes to stderr; stdout carries command output.
fn init_logging() -> Option<WorkerGuard> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "think=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let guard = if let Some(ref path) = log_file {
        let file_dir = Path::new(path).parent().unwrap_or(Path::new("."));
        let file_name = Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("think.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false));
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stderr)"),
        "Logging initialized"
    );

    guard
}

fn client_config(api_url: Option<String>) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::load().context("Failed to load client config")?;
    if let Some(url) = api_url {
        config.base_url = url;
    }
    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli { api_url, command } = cli;

    // Rendering a local file needs no server configuration.
    if let Commands::Render { file, width } = &command {
        return cmd_render(file, *width);
    }

    let config = client_config(api_url)?;
    let store = RecordClient::new(config.clone())?;

    match command {
        Commands::Open { path, width } => {
            println!("{}", shell::open(&store, &path, width).await);
        }
        Commands::List => cmd_list(&store).await?,
        Commands::Show { id, width } => cmd_show(&store, &id, width).await?,
        Commands::New {
            heading,
            text,
            embed,
        } => cmd_new(&store, &heading, &text, &embed).await?,
        Commands::Delete { id } => {
            if !delete_note(&store, &id).await? {
                bail!("Server did not confirm deletion of {}", id);
            }
            println!("Deleted {}", id);
        }
        Commands::Exists { id } => {
            let exists = store.is_exist_record(&id).await?;
            println!("{}", exists);
        }
        Commands::Upload { id, file, name } => {
            let files = FileClient::new(&config)?;
            cmd_upload(&files, &id, &file, name.as_deref()).await?;
        }
        Commands::Render { file, width } => cmd_render(&file, width)?,
    }

    Ok(())
}

async fn cmd_list(store: &dyn RecordStore) -> anyhow::Result<()> {
    let records = store.list_records().await?;
    for record in &records {
        println!(
            "{}  {:<12}  {}",
            record.id,
            record.mime_type,
            record.updated_at.to_rfc3339()
        );
    }
    println!("{} record(s)", records.len());
    Ok(())
}

async fn cmd_show(store: &dyn RecordStore, id: &str, width: u32) -> anyhow::Result<()> {
    let record = store.get_record(id).await?;
    match record.classify() {
        RecordKind::Note(note) => println!("{}", generate_html_from_note(&note, width)?),
        RecordKind::Other(record) => println!("{}", serde_json::to_string_pretty(&record)?),
    }
    Ok(())
}

async fn cmd_new(
    store: &dyn RecordStore,
    headings: &[String],
    texts: &[String],
    embeds: &[String],
) -> anyhow::Result<()> {
    let id = generate_uuid();
    let mut session = EditorSession::mount(note_namespace(id), None)?;
    for heading in headings {
        session.append_heading("h1", heading)?;
    }
    for text in texts {
        session.append_paragraph(text)?;
    }
    for embed in embeds {
        let embed_id = parse_v4(embed).ok_or_else(|| anyhow!("Invalid record id: {}", embed))?;
        session.insert_record(embed_id)?;
    }

    if !save_note(store, id, &session).await? {
        bail!("Server did not accept note {}", id);
    }
    println!("{}", id);
    Ok(())
}

fn cmd_render(file: &Path, width: u32) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let body: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not JSON", file.display()))?;
    let note = Note {
        id: generate_uuid(),
        body,
        updated_at: Utc::now(),
    };
    println!("{}", generate_html_from_note(&note, width)?);
    Ok(())
}

async fn cmd_upload(
    files: &FileClient,
    id: &str,
    file: &Path,
    name: Option<&str>,
) -> anyhow::Result<()> {
    let record_id = parse_v4(id).ok_or_else(|| anyhow!("Invalid record id: {}", id))?;
    let filename = match name {
        Some(name) => name.to_string(),
        None => file
            .file_name()
            .and_then(|f| f.to_str())
            .ok_or_else(|| anyhow!("Cannot derive a file name from {}", file.display()))?
            .to_string(),
    };
    let bytes = std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;

    if !files.upload(record_id, &filename, bytes).await? {
        bail!("Server did not accept upload of {}", filename);
    }
    println!("{}", files.view_url(record_id, &filename));
    Ok(())
}
