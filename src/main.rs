//! Quadrant Tasks - Main Entry Point
//!
//! Command-line front end for the quadrant board.
//! The actual implementation is in the `quadrant_tasks` library.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use quadrant_tasks::config::{AppConfig, BackendMode};
use quadrant_tasks::{Quadrant, TodoApp, formatting, logging};
use std::path::PathBuf;
use tracing::debug;

/// Quadrant Tasks - Eisenhower matrix task manager
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Use a local task file instead of the remote service
    #[arg(long, global = true)]
    local: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the board (or one quadrant)
    List {
        #[arg(short, long)]
        quadrant: Option<Quadrant>,
    },

    /// Add a task
    Add {
        /// Task title
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        /// Target quadrant (default: important-urgent)
        #[arg(short, long)]
        quadrant: Option<Quadrant>,
    },

    /// Add tasks extracted from free text
    Bulk {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Edit a task's title and/or quadrant
    Edit {
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        quadrant: Option<Quadrant>,
    },

    /// Mark a task done, or open again
    Toggle { id: String },

    /// Move a task to another quadrant
    Move { id: String, quadrant: Quadrant },

    /// Drop a task onto a quadrant or onto another task
    Drop {
        id: String,
        /// Quadrant id or task id
        target: String,
    },

    /// Delete a task
    Delete { id: String },
}

async fn run(app: &TodoApp, command: Command) -> Result<String> {
    match command {
        Command::List { quadrant } => app.handle_list(quadrant).await,
        Command::Add { title, quadrant } => app.handle_add(&title.join(" "), quadrant).await,
        Command::Bulk { text } => app.handle_bulk(&text.join(" ")).await,
        Command::Edit {
            id,
            title,
            quadrant,
        } => app.handle_edit(&id, title, quadrant).await,
        Command::Toggle { id } => app.handle_toggle(&id).await,
        Command::Move { id, quadrant } => app.handle_move(&id, quadrant).await,
        Command::Drop { id, target } => app.handle_drop(&id, &target).await,
        Command::Delete { id } => app.handle_delete(&id).await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok());
    if let Some(path) = args.local {
        config.backend.mode = BackendMode::Local;
        config.backend.data_file = path;
    }

    let level = if args.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    logging::init_logging(level);
    debug!(mode = ?config.backend.mode, "starting");

    let app = TodoApp::from_config(&config)?;
    match run(&app, args.command).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", formatting::format_error(&format!("{:#}", e)));
            std::process::exit(1);
        }
    }
}
