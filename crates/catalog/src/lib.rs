mod error;
mod http;
mod types;

pub use error::CatalogError;
pub use http::HttpCatalog;
pub use types::{BookFormat, BookResult, HealthResponse, SearchQuery, SearchResponse};

use async_trait::async_trait;

/// The remote book-catalog service the search orchestrator talks to.
///
/// The lifecycle controller depends only on this trait; tests substitute
/// scripted implementations for the HTTP client.
#[async_trait]
pub trait CatalogService: Send + Sync {
  /// Run a paged search against the catalog.
  async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, CatalogError>;

  /// Probe service health.
  async fn health(&self) -> Result<HealthResponse, CatalogError>;
}
