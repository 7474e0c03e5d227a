// src/main.rs
// string-analyzer: string property service with structured and natural-language filtering

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use string_analyzer::{
    api::create_router,
    config::CONFIG,
    db,
    filters,
    records::StringRecord,
    state::AppState,
    store::{sqlite, MemoryRecordStore, RecordStore, SqliteRecordStore},
};

#[derive(Parser)]
#[command(name = "string-analyzer")]
#[command(about = "Analyze, store and query strings by their properties")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Address to bind
        #[arg(long, env = "HOST")]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// SQLite database URL
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,

        /// Keep records in process memory instead of SQLite
        #[arg(long)]
        in_memory: bool,
    },

    /// Print the record a value would be stored as, without storing it
    Analyze {
        value: String,
    },

    /// Print the filters a natural-language query translates to
    Translate {
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let (level, rejected) = CONFIG.tracing_level_or_default();
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    if let Some(e) = rejected {
        warn!("{}, falling back to INFO", e);
    }

    let cli = Cli::parse();

    match cli.command {
        None => run_server(None, None, None, false).await,
        Some(Commands::Serve {
            host,
            port,
            database_url,
            in_memory,
        }) => run_server(host, port, database_url, in_memory).await,
        Some(Commands::Analyze { value }) => {
            let record = StringRecord::new(value);
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Some(Commands::Translate { query }) => {
            let parsed = filters::translate(&query)?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
            Ok(())
        }
    }
}

async fn run_server(
    host: Option<String>,
    port: Option<u16>,
    database_url: Option<String>,
    in_memory: bool,
) -> Result<()> {
    let mut config = CONFIG.clone();
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(database_url) = database_url {
        config.database_url = database_url;
    }

    let store: Arc<dyn RecordStore> = if in_memory {
        info!("Using in-memory record store");
        Arc::new(MemoryRecordStore::new())
    } else {
        let pool = db::create_pool(&config.database_url, config.sqlite_max_connections).await?;
        sqlite::run_migrations(&pool).await?;
        Arc::new(SqliteRecordStore::new(pool))
    };

    let app_state = Arc::new(AppState::new(store));
    let app = create_router(app_state, &config.cors_origin, config.request_timeout());

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
