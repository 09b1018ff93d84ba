//! HTTP server assembly for the blog backend.
//!
//! Combines the JSON API from `blog-api` with the root and health endpoints
//! and request tracing. The binary in `main.rs` handles configuration and
//! store opening.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Json, Router, routing::get};
use blog_core::store::BlogStore;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and `BLOG_*`
/// environment variables. Missing keys fall back to [`Default`].
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  /// SQLite file; `:memory:` opens a throwaway in-memory database.
  pub database_path: PathBuf,
  pub app_name:      String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:          "127.0.0.1".to_string(),
      port:          8000,
      database_path: PathBuf::from("blog.db"),
      app_name:      "Blog API".to_string(),
    }
  }
}

impl ServerConfig {
  /// Layer defaults, the TOML file at `path` (skipped when absent) and
  /// `BLOG_*` environment variables, in that order of precedence.
  pub fn load(path: impl Into<PathBuf>) -> Result<Self, config::ConfigError> {
    let path = path.into();
    if path.is_file() {
      tracing::info!(path = %path.display(), "reading config file");
    } else {
      tracing::info!(path = %path.display(), "no config file; using defaults and environment");
    }

    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("BLOG"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// `database_path` with a leading `~/` expanded to the user's home.
  pub fn resolved_database_path(&self) -> PathBuf { expand_tilde(&self.database_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the complete application router.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: BlogStore + 'static,
{
  let welcome = json!({
    "message": format!("Welcome to {}", config.app_name),
    "health":  "/health",
  });

  Router::new()
    .route(
      "/",
      get(move || {
        let body = welcome.clone();
        async move { Json(body) }
      }),
    )
    .route("/health", get(health))
    .merge(blog_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> { Json(json!({ "status": "healthy" })) }
