//! Configuration system for bookfind with per-project overrides.
//!
//! Config priority: project-relative (bookfind.toml) > user (~/.config/bookfind/config.toml)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Service Configuration
// ============================================================================

/// Catalog service endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
  /// Base URL of the catalog API (default: http://localhost:8000/api/v1)
  pub base_url: String,

  /// Request timeout in seconds (default: 60)
  /// A catalog query can take tens of seconds on a cold index.
  pub timeout_secs: u64,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:8000/api/v1".to_string(),
      timeout_secs: 60,
    }
  }
}

// ============================================================================
// Search Configuration
// ============================================================================

/// Search defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
  /// Results per page (default: 20)
  pub page_size: u32,

  /// Maximum query length accepted by the service (default: 200)
  pub max_query_len: usize,
}

impl Default for SearchConfig {
  fn default() -> Self {
    Self {
      page_size: 20,
      max_query_len: 200,
    }
  }
}

// ============================================================================
// Progress Configuration
// ============================================================================

/// Simulated progress timeline tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
  /// Tick period for the progress simulator in milliseconds (default: 500)
  pub tick_interval_ms: u64,

  /// Override for per-stage estimated durations in seconds.
  /// Must match the number of stages to take effect; the stage labels
  /// themselves are fixed.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub stage_secs: Option<Vec<u64>>,
}

impl Default for ProgressConfig {
  fn default() -> Self {
    Self {
      tick_interval_ms: 500,
      stage_secs: None,
    }
  }
}

// ============================================================================
// Main Configuration
// ============================================================================

/// Bookfind configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Catalog service endpoint settings
  #[serde(default)]
  pub service: ServiceConfig,

  /// Search defaults
  #[serde(default)]
  pub search: SearchConfig,

  /// Progress simulator tuning
  #[serde(default)]
  pub progress: ProgressConfig,
}

impl Config {
  /// Load config for a project, with fallback to user config
  pub fn load_for_project(project_path: &Path) -> Self {
    // Try project-relative first
    let project_config = Self::project_config_path(project_path);
    if project_config.exists()
      && let Ok(content) = std::fs::read_to_string(&project_config)
      && let Ok(config) = toml::from_str(&content)
    {
      return config;
    }

    // Fall back to user config
    if let Some(user_config_path) = Self::user_config_path()
      && user_config_path.exists()
      && let Ok(content) = std::fs::read_to_string(&user_config_path)
      && let Ok(config) = toml::from_str(&content)
    {
      return config;
    }

    // Default
    Self::default()
  }

  /// Get the user-level config path
  pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("BOOKFIND_CONFIG_DIR") {
      return Some(PathBuf::from(path).join("config.toml"));
    }

    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
      return Some(PathBuf::from(path).join("bookfind").join("config.toml"));
    }

    dirs::config_dir().map(|p: PathBuf| p.join("bookfind").join("config.toml"))
  }

  /// Get the project-relative config path
  pub fn project_config_path(project_path: &Path) -> PathBuf {
    project_path.join("bookfind.toml")
  }

  /// Generate a default config file as a string
  pub fn generate_template() -> String {
    format!(
      r#"# Bookfind Configuration
# Place as bookfind.toml (project) or ~/.config/bookfind/config.toml (user)

[service]
# Base URL of the catalog API
base_url = "{base_url}"
# Request timeout in seconds
timeout_secs = {timeout_secs}

[search]
# Results per page
page_size = {page_size}

[progress]
# Tick period for the progress simulator in milliseconds
tick_interval_ms = {tick_interval_ms}
# Per-stage estimated durations in seconds (optional override)
# stage_secs = [3, 12, 35, 15]
"#,
      base_url = ServiceConfig::default().base_url,
      timeout_secs = ServiceConfig::default().timeout_secs,
      page_size = SearchConfig::default().page_size,
      tick_interval_ms = ProgressConfig::default().tick_interval_ms,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.service.base_url, "http://localhost:8000/api/v1");
    assert_eq!(config.service.timeout_secs, 60);
    assert_eq!(config.search.page_size, 20);
    assert_eq!(config.progress.tick_interval_ms, 500);
    assert!(config.progress.stage_secs.is_none());
  }

  #[test]
  fn test_toml_roundtrip() {
    let config = Config {
      service: ServiceConfig {
        base_url: "https://catalog.example.com/api/v1".to_string(),
        timeout_secs: 30,
      },
      search: SearchConfig {
        page_size: 50,
        max_query_len: 100,
      },
      progress: ProgressConfig {
        tick_interval_ms: 250,
        stage_secs: Some(vec![1, 2, 3, 4]),
      },
    };

    let toml_str = toml::to_string_pretty(&config).unwrap();
    let parsed: Config = toml::from_str(&toml_str).unwrap();

    assert_eq!(parsed.service.base_url, "https://catalog.example.com/api/v1");
    assert_eq!(parsed.service.timeout_secs, 30);
    assert_eq!(parsed.search.page_size, 50);
    assert_eq!(parsed.progress.tick_interval_ms, 250);
    assert_eq!(parsed.progress.stage_secs, Some(vec![1, 2, 3, 4]));
  }

  #[test]
  fn test_partial_config_uses_defaults() {
    let toml_content = r#"
[service]
base_url = "http://books.local/api/v1"
"#;
    let config: Config = toml::from_str(toml_content).unwrap();
    assert_eq!(config.service.base_url, "http://books.local/api/v1");
    // Everything else falls back to defaults
    assert_eq!(config.service.timeout_secs, 60);
    assert_eq!(config.search.page_size, 20);
    assert_eq!(config.progress.tick_interval_ms, 500);
  }

  #[test]
  fn test_load_for_project_prefers_project_file() {
    let temp = TempDir::new().unwrap();
    let config_content = r#"
[search]
page_size = 5
"#;
    std::fs::write(temp.path().join("bookfind.toml"), config_content).unwrap();

    let config = Config::load_for_project(temp.path());
    assert_eq!(config.search.page_size, 5);
  }

  #[test]
  fn test_load_for_project_missing_file_is_default() {
    let temp = TempDir::new().unwrap();
    let config = Config::load_for_project(temp.path());
    assert_eq!(config.search.page_size, 20);
  }

  #[test]
  fn test_template_parses() {
    let template = Config::generate_template();
    let parsed: Config = toml::from_str(&template).unwrap();
    assert_eq!(parsed.service.timeout_secs, 60);
  }
}
