//! # Kitchen Board demo
//!
//! Starts the board with the wall clock, attaches a logging observer, plays one
//! short conversation and prints the resulting board as JSON.

use clap::Parser;
use kitchen_board::broadcast::{spawn_observer, LogObserver};
use kitchen_board::clock::{Clock, SystemClock};
use kitchen_board::config::BoardConfig;
use kitchen_board::lifecycle::{setup_tracing, KitchenSystem};
use kitchen_board::model::{Intent, Reply, UserId};
use kitchen_board::projection::project_all;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Instrument};

#[derive(Parser)]
#[command(name = "kitchen-board")]
#[command(about = "Kitchen order board", long_about = None)]
struct Cli {
    /// TOML config file. Built-in defaults are used without it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Chat identity the demo conversation is sent as.
    #[arg(long, default_value = "demo")]
    user: String,

    /// Print the display projection instead of the raw snapshot.
    #[arg(long, default_value_t = false)]
    projected: bool,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let cli = Cli::parse();
    setup_tracing();

    let config = match &cli.config {
        Some(path) => BoardConfig::load(path).map_err(|e| e.to_string())?,
        None => BoardConfig::default(),
    };
    info!(config = ?cli.config, "Starting kitchen board");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let system = KitchenSystem::new(&config, clock.clone(), config.access_policy());

    let subscription = system.board.subscribe().await.map_err(|e| e.to_string())?;
    let observer = spawn_observer(subscription, LogObserver);

    let user = UserId::from(cli.user);
    let first_item = config
        .catalog
        .first()
        .and_then(|category| category.items.first())
        .cloned()
        .unwrap_or_default();
    let conversation = vec![
        Intent::Start,
        Intent::Text("GF-254".into()),
        Intent::Text("20".into()),
        Intent::AddItem(first_item.clone()),
        Intent::AddItem(first_item),
        Intent::Submit,
    ];

    let span = tracing::info_span!("demo_conversation");
    async {
        for intent in conversation {
            match system.sessions.dispatch(user.clone(), intent).await {
                Ok(Reply::Submitted(order)) => info!(order_id = %order.id, "Order on the board"),
                Ok(Reply::AccessDenied) => {
                    warn!(%user, "Not on the allow list");
                    break;
                }
                Ok(reply) => info!(?reply, "Reply"),
                Err(e) => return Err(e.to_string()),
            }
        }
        Ok(())
    }
    .instrument(span)
    .await?;

    let snapshot = system.board.snapshot().await.map_err(|e| e.to_string())?;
    let json = if cli.projected {
        serde_json::to_string_pretty(&project_all(&snapshot, clock.now()))
    } else {
        serde_json::to_string_pretty(&snapshot)
    }
    .map_err(|e| e.to_string())?;
    println!("{json}");

    system.shutdown().await?;
    if let Err(e) = observer.await {
        warn!("Observer task failed: {:?}", e);
    }
    Ok(())
}
