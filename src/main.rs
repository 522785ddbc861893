// src/main.rs

use std::sync::Arc;

use clap::Parser;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use finsent::agent::AgentContext;
use finsent::config::FinsentConfig;
use finsent::llm::OpenAiProvider;
use finsent::server;
use finsent::store::{migrations, SentimentStore};

#[derive(Parser, Debug)]
#[command(name = "finsent", version, about = "Central bank sentiment analytics service")]
struct Args {
    /// Bind host (overrides FINSENT_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides FINSENT_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// SQLite database URL (overrides DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = FinsentConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    // Initialize tracing
    let level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting FinSENT backend");
    info!("Model: {}", config.model);
    info!("Database: {}", config.database_url);

    // Create database pool and apply schema
    let pool = SqlitePoolOptions::new()
        .max_connections(config.sqlite_max_connections)
        .connect(&config.database_url)
        .await?;
    migrations::run_migrations(&pool).await?;

    let store = SentimentStore::new(pool);
    let provider = Arc::new(OpenAiProvider::new(&config)?);
    let agent = Arc::new(AgentContext::new(provider, store.clone()));

    server::run(&config, agent, store).await
}
