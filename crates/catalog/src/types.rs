use serde::{Deserialize, Serialize};

/// Parameters for a catalog search.
///
/// At least one of `q`/`title`/`author` should be set; the orchestrator
/// enforces that before issuing a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub q: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub author: Option<String>,
  pub page: u32,
  pub page_size: u32,
}

impl Default for SearchQuery {
  fn default() -> Self {
    Self {
      q: None,
      title: None,
      author: None,
      page: 1,
      page_size: 20,
    }
  }
}

/// One downloadable format of a book (same title+author may carry several).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookFormat {
  pub extension: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub filesize: Option<u64>,
  #[serde(default)]
  pub download_url: String,
  #[serde(default)]
  pub md5: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookResult {
  pub id: String,
  pub title: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub author: Option<String>,
  #[serde(default)]
  pub formats: Vec<BookFormat>,
}

/// Search response from the catalog.
///
/// `results` and `total` may be absent in degraded responses and must
/// default to empty/zero rather than fail to decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
  #[serde(default)]
  pub total: u64,
  #[serde(default)]
  pub page: u32,
  #[serde(default)]
  pub page_size: u32,
  #[serde(default)]
  pub results: Vec<BookResult>,
  /// Distinct books after the service merges formats by title+author
  #[serde(default)]
  pub total_books: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
  pub status: String,
  #[serde(default)]
  pub database: String,
  #[serde(default)]
  pub meilisearch: String,
}
