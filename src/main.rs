//! menustat CLI - record customers, menu items and orders, then report on them

mod commands;
mod interactive;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use menustat::config::{self, MenustatConfig};
use menustat::dispatch::Action;
use menustat::{NewCustomer, NewMenuItem, NewOrder, SqliteStore, WritePolicy};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "menustat")]
#[command(version)]
#[command(about = "Record restaurant orders in SQLite and report on what sells and when")]
#[command(long_about = r#"
menustat keeps customers, menu items and orders in a local SQLite file and
answers a fixed set of questions about them:
  • Which items are ordered most
  • How many orders an ordering customer places on average
  • How orders split across menu categories
  • Which hours of the day are busiest

Example usage:
  menustat add-customer --name "Ada" --email ada@example.com --registered 2024-05-01
  menustat add-item --name Burger --category Food --price 4.50
  menustat add-order --customer 1 --item 1 --at "2024-05-01 13:45:00"
  menustat top-items --limit 3
  menustat            # numbered interactive menu
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a customer
    AddCustomer {
        #[arg(short, long)]
        name: String,

        /// Must be unique across customers
        #[arg(short, long)]
        email: String,

        /// Registration date (YYYY-MM-DD)
        #[arg(short, long)]
        registered: String,
    },

    /// Add an item to the menu
    AddItem {
        #[arg(short, long)]
        name: String,

        #[arg(long)]
        category: String,

        #[arg(short, long)]
        price: f64,
    },

    /// Record an order of one menu item by one customer
    AddOrder {
        /// Customer ID
        #[arg(long)]
        customer: i64,

        /// Menu item ID
        #[arg(short, long)]
        item: i64,

        /// Order date and time (YYYY-MM-DD HH:MM:SS)
        #[arg(short, long)]
        at: String,
    },

    /// Most ordered menu items
    TopItems {
        /// Maximum number of rows (defaults to the config value, then 5)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Average number of orders per ordering customer
    AvgOrders,

    /// Order counts per menu category
    ByCategory,

    /// Order counts per hour of day
    PeakTimes,

    /// Show row counts for every table
    Stats,

    /// List registered customers
    Customers,

    /// List menu items
    Items,

    /// List recorded orders with customer and item names
    Orders,

    /// Numbered menu prompting for each field
    Interactive,

    /// Write a config file with every default spelled out
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

pub fn success_envelope(command: &str, data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "ok": true,
        "command": command,
        "data": data,
    })
}

pub fn failure_envelope(command: &str, error: &str) -> serde_json::Value {
    serde_json::json!({
        "ok": false,
        "command": command,
        "error": error,
    })
}

/// Print a success envelope in JSON mode
pub fn emit_success(mode: OutputMode, command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    if mode == OutputMode::Json {
        println!("{}", serde_json::to_string_pretty(&success_envelope(command, data))?);
    }
    Ok(())
}

/// Print a failure envelope in JSON mode
pub fn emit_failure(mode: OutputMode, command: &str, error: &str) -> anyhow::Result<()> {
    if mode == OutputMode::Json {
        println!("{}", serde_json::to_string_pretty(&failure_envelope(command, error))?);
    }
    Ok(())
}

/// Everything resolved from flags and the config file before the store opens
pub struct Settings {
    pub database: PathBuf,
    pub policy: WritePolicy,
    pub top_items_limit: usize,
}

impl Settings {
    fn resolve(cli_database: Option<PathBuf>, config: &MenustatConfig) -> Self {
        let database = cli_database
            .or_else(|| config.database.as_ref().map(PathBuf::from))
            .unwrap_or_else(config::default_database_path);

        Self {
            database,
            policy: WritePolicy::from_config(config),
            top_items_limit: config.top_items_limit(),
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging; stderr keeps reports and JSON on stdout clean
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = if cli.json { OutputMode::Json } else { OutputMode::Human };

    if let Some(Commands::Init { force }) = cli.command {
        let path = cli.config.unwrap_or_else(config::default_config_path);
        commands::run_init(&path, force, output_mode)?;
        return Ok(ExitCode::SUCCESS);
    }

    let loaded = config::load_config(cli.config.as_deref())?;
    if loaded.is_some() {
        tracing::debug!("Loaded config from {:?}", cli.config.clone().unwrap_or_else(config::default_config_path));
    }
    let settings = Settings::resolve(cli.database, &loaded.unwrap_or_default());

    config::ensure_db_dir(&settings.database)?;
    let store = SqliteStore::open(&settings.database)?;

    let action = match cli.command {
        None | Some(Commands::Interactive) => {
            if !output_mode.is_human() {
                menustat::ui::warn("--json is ignored by the interactive menu");
            }
            interactive::run(&store, &settings)?;
            return Ok(ExitCode::SUCCESS);
        }
        Some(Commands::Stats) => {
            commands::run_stats(&store, &settings, output_mode)?;
            return Ok(ExitCode::SUCCESS);
        }
        Some(Commands::Customers) => {
            commands::run_customers(&store, output_mode)?;
            return Ok(ExitCode::SUCCESS);
        }
        Some(Commands::Items) => {
            commands::run_items(&store, output_mode)?;
            return Ok(ExitCode::SUCCESS);
        }
        Some(Commands::Orders) => {
            commands::run_orders(&store, output_mode)?;
            return Ok(ExitCode::SUCCESS);
        }
        Some(Commands::Init { .. }) => unreachable!("handled before the store opens"),

        Some(Commands::AddCustomer { name, email, registered }) => {
            Action::AddCustomer(NewCustomer::new(name, email, registered))
        }
        Some(Commands::AddItem { name, category, price }) => {
            Action::AddMenuItem(NewMenuItem::new(name, category, price))
        }
        Some(Commands::AddOrder { customer, item, at }) => Action::AddOrder(NewOrder::new(customer, item, at)),
        Some(Commands::TopItems { limit }) => Action::TopMenuItems {
            limit: limit.unwrap_or(settings.top_items_limit),
        },
        Some(Commands::AvgOrders) => Action::AverageOrders,
        Some(Commands::ByCategory) => Action::OrdersByCategory,
        Some(Commands::PeakTimes) => Action::PeakOrderingTimes,
    };

    if commands::run_action(&store, settings.policy, action, output_mode)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
