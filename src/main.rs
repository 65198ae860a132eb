use anyhow::Result;
use clap::{Parser, Subcommand};

use equiptrack::cli::{
    handle_equipment_command, handle_export_command, handle_history_command,
    handle_stock_command, handle_user_command,
};
use equiptrack::config::{Settings, StockLabelPolicy, TrackerPaths};
use equiptrack::services::{effective_role, UserService};
use equiptrack::storage::Storage;

#[derive(Parser)]
#[command(
    name = "equiptrack",
    version,
    about = "Equipment inventory tracker with stock assignment and audit history",
    long_about = "equiptrack keeps an inventory of equipment, the stock each piece \
                  is stored in, and a durable history of who changed what."
)]
struct Cli {
    /// Act as this user (default: anonymous operator)
    #[arg(long = "as", global = true, env = "EQUIPTRACK_USER", value_name = "USERNAME")]
    actor: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Equipment management commands
    #[command(subcommand, alias = "eq")]
    Equipment(equiptrack::cli::EquipmentCommands),

    /// Stock management commands
    #[command(subcommand)]
    Stock(equiptrack::cli::StockCommands),

    /// User management commands
    #[command(subcommand)]
    User(equiptrack::cli::UserCommands),

    /// Audit log and transfer history
    #[command(subcommand)]
    History(equiptrack::cli::HistoryCommands),

    /// Export history to CSV or JSON
    #[command(subcommand)]
    Export(equiptrack::cli::ExportCommands),

    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config {
        /// Set how stock labels are rendered in update entries (legacy, names)
        #[arg(long)]
        stock_labels: Option<String>,
    },
}

fn main() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = TrackerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let actor = UserService::new(&storage, &settings).resolve_actor(cli.actor.as_deref())?;
    tracing::debug!(actor = actor.label(), "resolved acting user");

    match cli.command {
        Some(Commands::Equipment(cmd)) => {
            handle_equipment_command(&storage, &settings, &actor, cmd)?;
        }
        Some(Commands::Stock(cmd)) => {
            handle_stock_command(&storage, &settings, &actor, cmd)?;
        }
        Some(Commands::User(cmd)) => {
            handle_user_command(&storage, &settings, &actor, cmd)?;
        }
        Some(Commands::History(cmd)) => {
            handle_history_command(&storage, &settings, &actor, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, &settings, &actor, cmd)?;
        }
        Some(Commands::Init) => {
            settings.save(&paths)?;
            println!("Initialized equiptrack at: {}", paths.base_dir().display());
        }
        Some(Commands::Config { stock_labels }) => {
            if let Some(value) = stock_labels {
                settings.stock_label_policy = StockLabelPolicy::parse(&value).ok_or_else(|| {
                    anyhow::anyhow!("Invalid stock label policy: '{}'. Use legacy or names", value)
                })?;
                settings.save(&paths)?;
            }

            println!("equiptrack Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  Stock labels:    {:?}", settings.stock_label_policy);
            println!("  Allow anonymous: {}", settings.allow_anonymous);
            println!("  History limit:   {}", settings.history_limit);
            println!();
            println!(
                "Acting as: {} ({})",
                actor.label(),
                effective_role(&actor, &settings)
            );
        }
        None => {
            println!("equiptrack - equipment inventory with audit history");
            println!();
            println!("Run 'equiptrack --help' for usage information.");
        }
    }

    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("EQUIPTRACK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
