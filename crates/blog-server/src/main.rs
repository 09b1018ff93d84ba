//! blog-server binary.
//!
//! Configuration is layered: built-in defaults, then the TOML file named by
//! `--config` (optional), then `BLOG_*` environment variables.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use blog_server::ServerConfig;
use blog_store_sqlite::SqliteStore;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Blog content-management API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = ServerConfig::load(cli.config).context("invalid server configuration")?;
  tracing::debug!(?cfg, "effective configuration");

  let db_path = cfg.resolved_database_path();
  let store = SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("cannot open database {}", db_path.display()))?;
  tracing::info!(path = %db_path.display(), "database ready");

  let address = cfg.address();
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("cannot listen on {address}"))?;
  tracing::info!(%address, app = %cfg.app_name, "serving");

  axum::serve(listener, blog_server::app(Arc::new(store), &cfg))
    .await
    .context("server terminated")
}
