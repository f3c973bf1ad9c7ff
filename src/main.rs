use std::path::PathBuf;

use anyhow::Context;
use axum::extract::FromRef;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod controllers;
mod error;
mod hash;
mod models;
mod storage;
mod types;

use config::{Config, DatabaseKind};
pub(crate) use error::{ApiError, ApiResult};
use storage::memory::MemoryStorage;
use storage::postgres::PgStorage;
use storage::AnyStorage;

#[derive(Parser)]
#[command(version, about = "Store and fetch text pastes keyed by hashed ids")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service.
    Serve,
    /// Create the paste schema and table if missing.
    InitSchema,
}

#[derive(Clone, FromRef)]
pub struct App {
    config: Config,
    storage: AnyStorage,
}

impl App {
    async fn load(config: Config) -> anyhow::Result<Self> {
        let storage = match config.database.kind {
            DatabaseKind::Postgres => {
                let url = config
                    .database
                    .url
                    .as_deref()
                    .context("database.url is not set")?;
                PgStorage::connect(url, config.database.max_connections)
                    .await
                    .context("failed to connect to database")?
                    .into()
            }
            DatabaseKind::Memory => MemoryStorage::new().into(),
        };

        Ok(App { config, storage })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = Config::load(&cli.config).await?;
    let app = App::load(config).await?;

    match cli.command {
        Command::Serve => commands::serve::run(app).await,
        Command::InitSchema => commands::init_schema::run(app).await,
    }
}
