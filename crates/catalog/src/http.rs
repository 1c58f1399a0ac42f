use crate::{CatalogError, CatalogService, HealthResponse, SearchQuery, SearchResponse};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP implementation of [`CatalogService`].
#[derive(Debug, Clone)]
pub struct HttpCatalog {
  client: reqwest::Client,
  base_url: String,
  /// Per-request timeout; catalog queries can take tens of seconds
  timeout: Duration,
}

impl Default for HttpCatalog {
  fn default() -> Self {
    Self::new()
  }
}

impl HttpCatalog {
  pub fn new() -> Self {
    Self {
      client: reqwest::Client::new(),
      base_url: DEFAULT_BASE_URL.to_string(),
      timeout: DEFAULT_TIMEOUT,
    }
  }

  pub fn with_url(mut self, url: impl Into<String>) -> Self {
    self.base_url = url.into();
    self
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  fn search_url(&self) -> String {
    format!("{}/search", self.base_url)
  }

  fn health_url(&self) -> String {
    format!("{}/health", self.base_url)
  }

  fn query_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(ref q) = query.q {
      params.push(("q", q.clone()));
    }
    if let Some(ref title) = query.title {
      params.push(("title", title.clone()));
    }
    if let Some(ref author) = query.author {
      params.push(("author", author.clone()));
    }
    params.push(("page", query.page.to_string()));
    params.push(("page_size", query.page_size.to_string()));
    params
  }
}

#[async_trait]
impl CatalogService for HttpCatalog {
  async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, CatalogError> {
    debug!(
      page = query.page,
      page_size = query.page_size,
      "Searching catalog at {}",
      self.base_url
    );

    let response = self
      .client
      .get(self.search_url())
      .query(&Self::query_params(query))
      .timeout(self.timeout)
      .send()
      .await?;

    if !response.status().is_success() {
      let code = response.status().as_u16();
      let body = response.text().await.unwrap_or_default();
      warn!("Catalog search failed: {} - {}", code, body);
      return Err(CatalogError::Status { code, body });
    }

    let result: SearchResponse = response.json().await?;
    debug!(
      total = result.total,
      books = result.results.len(),
      "Catalog search succeeded"
    );
    Ok(result)
  }

  async fn health(&self) -> Result<HealthResponse, CatalogError> {
    let response = self
      .client
      .get(self.health_url())
      .timeout(Duration::from_secs(5))
      .send()
      .await?;

    if !response.status().is_success() {
      let code = response.status().as_u16();
      let body = response.text().await.unwrap_or_default();
      return Err(CatalogError::Status { code, body });
    }

    Ok(response.json().await?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_catalog_defaults() {
    let catalog = HttpCatalog::new();
    assert_eq!(catalog.base_url, DEFAULT_BASE_URL);
    assert_eq!(catalog.timeout, DEFAULT_TIMEOUT);
  }

  #[test]
  fn test_catalog_customization() {
    let catalog = HttpCatalog::new()
      .with_url("http://books.local/api/v1")
      .with_timeout(Duration::from_secs(10));
    assert_eq!(catalog.search_url(), "http://books.local/api/v1/search");
    assert_eq!(catalog.health_url(), "http://books.local/api/v1/health");
    assert_eq!(catalog.timeout, Duration::from_secs(10));
  }

  #[test]
  fn test_query_params_include_only_set_inputs() {
    let query = SearchQuery {
      q: Some("dune".to_string()),
      page: 3,
      page_size: 50,
      ..Default::default()
    };
    let params = HttpCatalog::query_params(&query);
    assert_eq!(
      params,
      vec![
        ("q", "dune".to_string()),
        ("page", "3".to_string()),
        ("page_size", "50".to_string()),
      ]
    );
  }

  #[test]
  fn test_query_params_title_author_variant() {
    let query = SearchQuery {
      title: Some("neuromancer".to_string()),
      author: Some("gibson".to_string()),
      ..Default::default()
    };
    let params = HttpCatalog::query_params(&query);
    assert_eq!(params[0], ("title", "neuromancer".to_string()));
    assert_eq!(params[1], ("author", "gibson".to_string()));
  }

  #[test]
  fn test_status_error_message_carries_code() {
    // The failure classifier keys on the numeric status code in the text
    let err = CatalogError::Status {
      code: 503,
      body: "Search service unavailable".to_string(),
    };
    let message = err.to_string();
    assert!(message.contains("503"));
    assert!(message.contains("Search service unavailable"));
  }

  #[tokio::test]
  async fn test_search_unreachable_service_errors() {
    // Nothing listens on this port; the request must surface an error,
    // not hang past the configured timeout
    let catalog = HttpCatalog::new()
      .with_url("http://127.0.0.1:1/api/v1")
      .with_timeout(Duration::from_secs(2));
    let result = catalog.search(&SearchQuery::default()).await;
    assert!(result.is_err());
  }
}
