//! Expiry Tracker CLI Entry Point

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use expiry_tracker_lib::commands;
use expiry_tracker_lib::config::{AppConfig, StorageMode};
use expiry_tracker_lib::domain::ItemDraft;
use expiry_tracker_lib::view;
use expiry_tracker_lib::AppState;

#[derive(Parser)]
#[command(name = "expiry-tracker", version, about = "Track expiry dates and renewals of household items")]
struct Cli {
    /// Directory holding the database and fallback storage
    #[arg(long, global = true, env = "EXPIRY_TRACKER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Storage backends the store may choose from
    #[arg(long, global = true, value_enum, env = "EXPIRY_TRACKER_STORAGE", default_value_t = StorageMode::Auto)]
    storage: StorageMode,

    /// Directory for rotated log files (default: <data-dir>/logs)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Save an item
    Add(AddArgs),
    /// Show all items
    List {
        /// Print the HTML listing instead of plain text
        #[arg(long)]
        html: bool,
    },
    /// Delete ALL items
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Show the active storage backend and paths
    Info,
}

#[derive(Args)]
struct AddArgs {
    #[arg(long, default_value = "")]
    category: String,
    /// Item name
    #[arg(long, default_value = "")]
    item: String,
    /// Expiry date
    #[arg(long, default_value = "")]
    date: String,
    #[arg(long, default_value = "")]
    reminder: String,
    /// Renewal cycle
    #[arg(long, default_value = "")]
    cycle: String,
    #[arg(long, default_value = "")]
    price: String,
    #[arg(long, default_value = "")]
    notes: String,
    /// Replace the item with this id instead of creating a new one
    #[arg(long)]
    id: Option<String>,
}

impl From<AddArgs> for ItemDraft {
    fn from(args: AddArgs) -> Self {
        ItemDraft {
            id: args.id,
            category: args.category,
            item: args.item,
            date: args.date,
            cycle: args.cycle,
            price: args.price,
            notes: args.notes,
            reminder: args.reminder,
        }
    }
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

async fn dispatch(cmd: Command, state: &AppState) -> anyhow::Result<bool> {
    match cmd {
        Command::Add(args) => match commands::save_item(&state.store, args.into()).await {
            Ok(msg) => {
                println!("{}", msg);
                Ok(true)
            }
            Err(msg) => {
                eprintln!("{}", msg);
                Ok(false)
            }
        },
        Command::List { html: true } => match commands::populate_view_list(&state.store).await {
            Ok(page) => {
                println!("{}", page);
                Ok(true)
            }
            Err(page) => {
                println!("{}", page);
                Ok(false)
            }
        },
        Command::List { html: false } => match commands::list_items(&state.store).await {
            Ok(items) => {
                println!("{}", view::render_item_text(&items));
                Ok(true)
            }
            Err(msg) => {
                eprintln!("{}", msg);
                Ok(false)
            }
        },
        Command::Clear { yes } => {
            let confirmed = yes || confirm(commands::DELETE_CONFIRM_PROMPT)?;
            match commands::delete_all(&state.store, confirmed).await {
                Ok(Some(msg)) => {
                    println!("{}", msg);
                    Ok(true)
                }
                Ok(None) => Ok(true),
                Err(msg) => {
                    eprintln!("{}", msg);
                    Ok(false)
                }
            }
        }
        Command::Info => {
            println!("backend:   {}", state.store.backend());
            println!("storage:   {}", state.config.storage);
            println!("database:  {}", state.config.db_path().display());
            println!("fallback:  {}", state.config.fallback_path().display());
            println!("logs:      {}", state.config.log_dir.display());
            Ok(true)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::new(cli.data_dir, cli.storage, cli.log_dir);

    if let Err(e) = rolling_logger::init_logger(&config.log_dir, "ExpiryTracker") {
        eprintln!("Logging to file disabled: {}", e);
    }

    let state = AppState::on_ready(config).await;
    let _ = rolling_logger::info(&format!("Store ready ({})", state.store.backend()));

    match dispatch(cli.cmd, &state).await {
        Ok(true) => Ok(ExitCode::SUCCESS),
        Ok(false) => Ok(ExitCode::FAILURE),
        Err(e) => {
            let _ = rolling_logger::error(&format!("Command failed: {:#}", e));
            Err(e)
        }
    }
}
