//! Configuration commands

use anyhow::{Context, Result};
use bookfind_core::Config;
use std::path::PathBuf;

fn cwd() -> PathBuf {
  std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Write a starter config into the current directory
pub fn cmd_config_init() -> Result<()> {
  let path = Config::project_config_path(&cwd());
  if path.exists() {
    println!("Config already exists at {}", path.display());
    return Ok(());
  }

  std::fs::write(&path, Config::generate_template()).context("Failed to write config")?;
  println!("Wrote {}", path.display());
  Ok(())
}

/// Print the effective configuration
pub fn cmd_config_show() -> Result<()> {
  let config = Config::load_for_project(&cwd());
  print!("{}", toml::to_string_pretty(&config).context("Failed to render config")?);
  Ok(())
}
