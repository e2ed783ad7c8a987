// VoxFlow — Voice commands to image-generation workflows in Rust
// License: Apache-2.0

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use voxflow::catalog::Catalog;
use voxflow::config::Config;
use voxflow::export::WorkflowExport;
use voxflow::interpreter::Interpreter;
use voxflow::session::SessionHistory;
use voxflow::workflow::WorkflowNode;

const LOGO: &str = "🎙️";

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "voxflow",
    about = "VoxFlow — Voice commands to image-generation workflows",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interpret one command and print the resulting workflow
    Interpret {
        /// Command text to interpret
        #[arg(short, long)]
        message: String,
        /// Transcription confidence in [0, 1]
        #[arg(long, default_value_t = 1.0)]
        confidence: f64,
        /// Also export the workflow as JSON into the configured directory
        #[arg(short, long)]
        export: bool,
        /// Config file path
        #[arg(short, long)]
        config: Option<String>,
    },
    /// List the built-in workflow templates
    Templates,
    /// Interactive command-to-workflow REPL
    Repl {
        /// Config file path
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Show version information
    Version,
    /// Show configuration status
    Status {
        /// Config file path
        #[arg(short, long)]
        config: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    voxflow::logger::init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Interpret {
            message,
            confidence,
            export,
            config,
        }) => {
            interpret_cmd(message, confidence, export, config).await;
        }
        Some(Commands::Templates) => {
            templates_cmd();
        }
        Some(Commands::Repl { config }) => {
            repl_cmd(config).await;
        }
        Some(Commands::Version) => {
            version_cmd();
        }
        Some(Commands::Status { config }) => {
            status_cmd(config);
        }
        None => {
            // Default: interactive REPL
            repl_cmd(None).await;
        }
    }
}

fn load_config(path: Option<&str>) -> Config {
    let result = match path {
        Some(p) => Config::load(Path::new(p)),
        None => Config::default_path().and_then(|p| Config::load(&p)),
    };
    match result {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{} Configuration Error: {}", LOGO, e);
            std::process::exit(1);
        }
    }
}

fn build_interpreter(cfg: &Config) -> Interpreter {
    Interpreter::with_delay(
        Arc::new(Catalog::builtin()),
        Duration::from_millis(cfg.interpreter.processing_delay_ms),
    )
}

// ---------------------------------------------------------------------------
// Interpret command (one-shot)
// ---------------------------------------------------------------------------

async fn interpret_cmd(message: String, confidence: f64, export: bool, config_path: Option<String>) {
    let cfg = load_config(config_path.as_deref());
    let interpreter = build_interpreter(&cfg);
    let history = SessionHistory::with_capacity(cfg.sessions.max_sessions);

    let nodes = match interpreter.interpret(&message).await {
        Ok(nodes) => nodes,
        Err(e) => {
            eprintln!("{} Error: {}", LOGO, e);
            std::process::exit(1);
        }
    };

    let session = history.record(message.as_str(), nodes.clone(), confidence).await;
    print_workflow(&nodes);
    println!(
        "\n{} nodes generated (session {}, confidence {:.0}%)",
        nodes.len(),
        session.id,
        session.confidence * 100.0
    );

    if export {
        match export_workflow(nodes, &message, &cfg).await {
            Ok(path) => println!("Exported workflow to {}", path.display()),
            Err(e) => {
                eprintln!("{} Export Error: {:#}", LOGO, e);
                std::process::exit(1);
            }
        }
    }
}

async fn export_workflow(
    nodes: Vec<WorkflowNode>,
    transcript: &str,
    cfg: &Config,
) -> anyhow::Result<PathBuf> {
    let export = WorkflowExport::new(nodes, transcript)?;
    let path = export
        .write_to(Path::new(&cfg.export.directory))
        .await
        .with_context(|| format!("writing export into {}", cfg.export.directory))?;
    Ok(path)
}

fn print_workflow(nodes: &[WorkflowNode]) {
    for node in nodes {
        println!("[{}] {} — {}", node.node_type, node.id, node.name);
        for (key, value) in &node.parameters {
            println!("    {}: {}", key, value);
        }
    }
}

// ---------------------------------------------------------------------------
// Templates / status / version commands
// ---------------------------------------------------------------------------

fn templates_cmd() {
    let catalog = Catalog::builtin();
    println!("{} {} workflow templates:\n", LOGO, catalog.len());
    for template in catalog.iter() {
        println!("{} — {}", template.id, template.name);
        println!("    {}", template.description);
        println!("    keywords: {}", template.keywords.join(", "));
        println!("    nodes: {}", template.nodes.len());
    }
}

fn version_cmd() {
    println!("{} VoxFlow v{}", LOGO, voxflow::VERSION);
}

fn status_cmd(config_path: Option<String>) {
    let cfg = load_config(config_path.as_deref());
    let catalog = Catalog::builtin();
    println!("{} VoxFlow v{}", LOGO, voxflow::VERSION);
    println!("Templates:         {}", catalog.len());
    println!("Processing delay:  {} ms", cfg.interpreter.processing_delay_ms);
    println!("Session cap:       {}", cfg.sessions.max_sessions);
    println!("Export directory:  {}", cfg.export.directory);
}

// ---------------------------------------------------------------------------
// REPL
// ---------------------------------------------------------------------------

/// Interactive readline loop: each line is interpreted as a voice command;
/// slash commands inspect or export the session state.
async fn repl_cmd(config_path: Option<String>) {
    let cfg = load_config(config_path.as_deref());
    let interpreter = build_interpreter(&cfg);
    let history = SessionHistory::with_capacity(cfg.sessions.max_sessions);

    println!("{} VoxFlow v{} — Voice commands to workflows", LOGO, voxflow::VERSION);
    println!("Type a command and press Enter. Type 'exit' or Ctrl+D to quit.");
    println!("Slash commands: /export, /sessions, /templates, /clear\n");

    let mut rl = match rustyline::DefaultEditor::new() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to initialize readline: {}", e);
            return;
        }
    };

    loop {
        match rl.readline(&format!("{} > ", LOGO)) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "exit" || trimmed == "quit" {
                    println!("Goodbye! 👋");
                    break;
                }

                let _ = rl.add_history_entry(trimmed);

                if trimmed.starts_with('/') {
                    handle_slash_command(trimmed, &history, &cfg).await;
                    continue;
                }

                match interpreter.interpret(trimmed).await {
                    Ok(nodes) => {
                        // Typed commands carry full confidence; a speech
                        // frontend would pass its own score here.
                        history.record(trimmed, nodes.clone(), 1.0).await;
                        print_workflow(&nodes);
                        println!("{} nodes generated\n", nodes.len());
                    }
                    Err(e) => {
                        eprintln!("{} Error: {}\n", LOGO, e);
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                continue;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("Goodbye! 👋");
                break;
            }
            Err(e) => {
                eprintln!("Readline error: {}", e);
                break;
            }
        }
    }
}

async fn handle_slash_command(command: &str, history: &SessionHistory, cfg: &Config) {
    match command {
        "/export" => match history.latest().await {
            Some(session) => {
                match export_workflow(session.workflow, &session.transcript, cfg).await {
                    Ok(path) => println!("Exported workflow to {}\n", path.display()),
                    Err(e) => eprintln!("{} Export Error: {:#}\n", LOGO, e),
                }
            }
            None => println!("⚠️  Nothing to export — no workflow generated yet.\n"),
        },
        "/sessions" => {
            let sessions = history.recent().await;
            if sessions.is_empty() {
                println!("No sessions recorded yet.\n");
                return;
            }
            for session in sessions {
                println!(
                    "{}  {:>3.0}%  {} nodes  {}",
                    session.timestamp.format("%H:%M:%S"),
                    session.confidence * 100.0,
                    session.workflow.len(),
                    session.transcript
                );
            }
            println!();
        }
        "/templates" => {
            templates_cmd();
            println!();
        }
        "/clear" => {
            history.clear().await;
            println!("Session history cleared.\n");
        }
        _ => {
            println!("Unknown command: {}\n", command);
        }
    }
}
