//! Catalog service health check

use anyhow::Result;
use bookfind_core::Config;
use catalog::{CatalogService, HttpCatalog};
use std::path::PathBuf;
use std::time::Duration;
use tracing::error;

pub async fn cmd_health(json_output: bool) -> Result<()> {
  let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
  let config = Config::load_for_project(&cwd);

  let catalog = HttpCatalog::new()
    .with_url(&config.service.base_url)
    .with_timeout(Duration::from_secs(config.service.timeout_secs));

  match catalog.health().await {
    Ok(health) => {
      if json_output {
        println!("{}", serde_json::to_string_pretty(&health)?);
      } else {
        println!("Status:      {}", health.status);
        println!("Database:    {}", health.database);
        println!("Search index: {}", health.meilisearch);
      }
      Ok(())
    }
    Err(e) => {
      error!("Health check failed: {}", e);
      std::process::exit(1);
    }
  }
}
