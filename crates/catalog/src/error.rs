use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("Request error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("Catalog returned {code}: {body}")]
  Status { code: u16, body: String },
}
