//! Graph RAG Workbench CLI
//!
//! A console front for the graph RAG backend: one-shot chat and ingest
//! commands plus an interactive mode composing both panels.

mod panel;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use panel::{ChatPanel, IngestForm};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use workbench_client::ApiClient;
use workbench_core::GraphEdgeContext;

/// Graph RAG Workbench - chat with and feed your knowledge graph
#[derive(Parser)]
#[command(name = "workbench")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend base URL (defaults to API_BASE_URL or http://localhost:8000)
    #[arg(long)]
    api_url: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a single chat message
    Chat {
        /// The message to send
        message: String,
    },

    /// Ingest text into the knowledge graph
    Ingest {
        /// Text content (reads from stdin if neither this nor --file is given)
        text: Option<String>,

        /// Source label, e.g. "Wikipedia: Kubernetes"
        #[arg(short, long)]
        source: Option<String>,

        /// Read content from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Check whether the backend is reachable
    Health,

    /// Interactive mode
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let client = match cli.api_url {
        Some(url) => ApiClient::new(url),
        None => ApiClient::default_local(),
    };

    match cli.command {
        Commands::Chat { message } => {
            cmd_chat(client, message).await?;
        }
        Commands::Ingest { text, source, file } => {
            cmd_ingest(client, text, source, file).await?;
        }
        Commands::Health => {
            cmd_health(client).await?;
        }
        Commands::Interactive => {
            cmd_interactive(client).await?;
        }
    }

    Ok(())
}

async fn cmd_chat(client: ApiClient, message: String) -> Result<()> {
    let mut panel = ChatPanel::new();

    let Some(message) = panel.begin_send(&message) else {
        println!("Nothing to send.");
        return Ok(());
    };

    match client.chat(&message, &panel.history).await {
        Ok(result) => {
            panel.complete(result);
            print_reply(&panel);
            Ok(())
        }
        Err(e) => {
            panel.fail(e.to_string());
            anyhow::bail!("Chat failed: {}", e)
        }
    }
}

async fn cmd_ingest(
    client: ApiClient,
    text: Option<String>,
    source: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let content = match (text, file) {
        (Some(content), _) => content,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?,
        (None, None) => {
            // Read from stdin
            eprintln!("Enter content (Ctrl+D to finish):");
            let stdin = io::stdin();
            let lines: Vec<String> = stdin.lock().lines().filter_map(|l| l.ok()).collect();
            lines.join("\n")
        }
    };

    let mut form = IngestForm::new();
    form.text = content;
    form.source = source.unwrap_or_default();

    let Some(request) = form.begin_submit() else {
        println!("Nothing to ingest.");
        return Ok(());
    };

    match client.ingest(&request.text, request.source).await {
        Ok(result) => {
            form.complete(result);
            if let Some(result) = &form.result {
                println!("✓ {}", result.message);
                println!("Entities stored: {}", result.entities_display());
            }
            Ok(())
        }
        Err(e) => {
            form.fail(e.to_string());
            anyhow::bail!("Ingest failed: {}", e)
        }
    }
}

async fn cmd_health(client: ApiClient) -> Result<()> {
    let healthy = client.health().await.unwrap_or(false);
    if !healthy {
        eprintln!("Error: backend is not reachable.");
        eprintln!("  Backend: {}", client.base_url());
        anyhow::bail!("Backend unavailable");
    }

    println!("✓ Backend reachable at {}", client.base_url());
    Ok(())
}

async fn cmd_interactive(client: ApiClient) -> Result<()> {
    let healthy = client.health().await.unwrap_or(false);
    if !healthy {
        eprintln!("Error: backend is not reachable.");
        eprintln!("  Backend: {}", client.base_url());
        anyhow::bail!("Backend unavailable");
    }

    let mut chat = ChatPanel::new();
    let mut form = IngestForm::new();

    println!("Graph RAG Workbench - Interactive Mode");
    println!("Commands: chat, ingest, source, history, context, reset, help, quit");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("workbench> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let parts: Vec<&str> = line.trim().splitn(2, ' ').collect();
        let cmd = parts.first().map(|s| *s).unwrap_or("");
        let arg = parts.get(1).map(|s| *s).unwrap_or("");

        match cmd {
            "" => continue,

            "chat" | "c" => {
                let Some(message) = chat.begin_send(arg) else {
                    println!("Usage: chat <message>");
                    continue;
                };
                match client.chat(&message, &chat.history).await {
                    Ok(result) => {
                        chat.complete(result);
                        print_reply(&chat);
                    }
                    Err(e) => {
                        chat.fail(e.to_string());
                        println!("Error: {}", e);
                    }
                }
            }

            "ingest" | "i" => {
                form.text = arg.to_string();
                let Some(request) = form.begin_submit() else {
                    println!("Usage: ingest <text>");
                    continue;
                };
                match client.ingest(&request.text, request.source).await {
                    Ok(result) => {
                        form.complete(result);
                        if let Some(result) = &form.result {
                            println!("✓ {}", result.message);
                            println!("Entities stored: {}", result.entities_display());
                        }
                    }
                    Err(e) => {
                        form.fail(e.to_string());
                        println!("Error: {}", e);
                    }
                }
            }

            "source" | "s" => {
                form.source = arg.to_string();
                if form.source.trim().is_empty() {
                    println!("Source label cleared.");
                } else {
                    println!("Source label for next ingest: {}", form.source);
                }
            }

            "history" => {
                if chat.history.is_empty() {
                    println!("No messages yet.");
                } else {
                    for message in &chat.history {
                        println!("[{}] {}", message.role, message.content);
                    }
                }
            }

            "context" => {
                if chat.context.is_empty() {
                    println!("No graph context yet.");
                } else {
                    print_context(&chat.context);
                }
            }

            "reset" => {
                chat.reset();
                println!("Conversation cleared.");
            }

            "help" | "h" | "?" => {
                println!("Commands:");
                println!("  chat <message>   - Send a chat message");
                println!("  ingest <text>    - Ingest text into the graph");
                println!("  source <label>   - Set the source label for the next ingest");
                println!("  history          - Show the conversation");
                println!("  context          - Show the last graph context");
                println!("  reset            - Clear the conversation");
                println!("  quit             - Exit");
            }

            "quit" | "q" | "exit" => {
                println!("Goodbye!");
                break;
            }

            _ => {
                println!("Unknown command: {}. Type 'help' for available commands.", cmd);
            }
        }

        println!();
    }

    Ok(())
}

fn print_reply(panel: &ChatPanel) {
    if let Some(reply) = panel.history.last() {
        println!("{}", reply.content);
    }

    if !panel.context.is_empty() {
        println!();
        println!("Graph context:");
        print_context(&panel.context);
    }
}

fn print_context(context: &[GraphEdgeContext]) {
    for edge in context {
        println!("  • {} [{}]", edge, edge.relationship);
        if let Some(summary) = &edge.summary {
            println!("    {}", summary);
        }
    }
}
