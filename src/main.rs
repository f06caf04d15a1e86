use anyhow::Result;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use wallet_ledger::config::Config;
use wallet_ledger::core::render::identity_label;
use wallet_ledger::Wallet;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[command(name = "wallet-ledger", version, about = "Wallet view over a ledger node's chain")]
struct Cli {
    /// Configuration file; defaults to ./wallet.toml when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the wallet's transactions and balance once
    Show {
        /// Identifier to show instead of the stored one
        #[arg(long)]
        id: Option<String>,
    },
    /// Print the stored identifier
    Id,
    /// Store the identifier used by `show`, `watch` and `GET /wallet`
    SetId { id: String },
    /// Forget the stored identifier
    ClearId,
    /// Re-print the wallet whenever the chain changes
    Watch,
    /// Serve the JSON API
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging()?;

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    let wallet = Wallet::new(config)?;

    match cli.command {
        Command::Show { id } => {
            let view = match id {
                Some(id) => wallet.view(&id).await?,
                None => wallet.stored_view().await?,
            };
            print!("{}", view.render());
        }
        Command::Id => {
            let id = wallet.identity().await;
            println!("{}", identity_label(id.as_deref()));
        }
        Command::SetId { id } => {
            wallet.set_identity(&id).await?;
            println!("{id}");
        }
        Command::ClearId => {
            wallet.clear_identity().await?;
            println!("{}", identity_label(None));
        }
        Command::Watch => wallet.watch().await?,
        Command::Serve => Arc::new(wallet).serve().await?,
    }

    Ok(())
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
