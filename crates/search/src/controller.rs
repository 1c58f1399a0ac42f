//! Search lifecycle controller.
//!
//! Owns the session state machine (idle, searching, succeeded, failed),
//! starts the progress simulator when a search begins, issues the real
//! request through the [`CatalogService`] seam, and reconciles the
//! simulated timeline with the real outcome.

use crate::classify;
use crate::progress::{ProgressSimulator, ProgressTracker};
use crate::timeline::Timeline;
use catalog::{BookResult, CatalogService, SearchQuery};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Inputs and outcome of the current search session.
///
/// One session is live at a time; a new `search()` call reuses the same
/// storage cells.
#[derive(Debug, Clone)]
pub struct SearchSession {
  pub query: String,
  pub title: String,
  pub author: String,
  pub page: u32,
  pub page_size: u32,
  pub results: Vec<BookResult>,
  pub total: u64,
  pub loading: bool,
  pub error: Option<String>,
  pub has_searched: bool,
  pub total_elapsed_secs: u64,
}

impl SearchSession {
  fn new(page_size: u32) -> Self {
    Self {
      query: String::new(),
      title: String::new(),
      author: String::new(),
      page: 1,
      page_size,
      results: Vec::new(),
      total: 0,
      loading: false,
      error: None,
      has_searched: false,
      total_elapsed_secs: 0,
    }
  }
}

/// Drives one search session against the catalog.
///
/// Failures are never fatal: every outcome lands back in a stable state
/// ready for the next `search()` call.
pub struct SearchController {
  service: Arc<dyn CatalogService>,
  session: SearchSession,
  simulator: ProgressSimulator,
}

impl SearchController {
  pub fn new(service: Arc<dyn CatalogService>, timeline: Timeline, tick_interval: Duration) -> Self {
    Self {
      service,
      session: SearchSession::new(20),
      simulator: ProgressSimulator::new(timeline, tick_interval),
    }
  }

  pub fn with_page_size(mut self, page_size: u32) -> Self {
    self.session.page_size = page_size;
    self
  }

  pub fn session(&self) -> &SearchSession {
    &self.session
  }

  /// Read handle for the presentation layer; stays valid across searches.
  pub fn progress(&self) -> ProgressTracker {
    self.simulator.tracker()
  }

  pub fn set_query(&mut self, query: impl Into<String>) {
    self.session.query = query.into();
  }

  pub fn set_title(&mut self, title: impl Into<String>) {
    self.session.title = title.into();
  }

  pub fn set_author(&mut self, author: impl Into<String>) {
    self.session.author = author.into();
  }

  /// Run a search with the current inputs and page.
  ///
  /// A call with every input blank after trimming is a silent no-op: no
  /// state change, no request.
  pub async fn search(&mut self) {
    let Some(request) = self.build_request() else {
      debug!("Ignoring search with blank inputs");
      return;
    };

    self.session.loading = true;
    self.session.error = None;
    self.simulator.start();

    match self.service.search(&request).await {
      Ok(response) => {
        self.simulator.stop(true);
        self.session.results = response.results;
        self.session.total = response.total;
        debug!(total = self.session.total, page = request.page, "Search succeeded");
      }
      Err(e) => {
        self.simulator.stop(false);
        let message = e.to_string();
        warn!("Search failed: {}", message);
        self.session.error = Some(classify::user_message_for(&message).to_string());
        self.session.results = Vec::new();
        self.session.total = 0;
      }
    }

    self.session.has_searched = true;
    self.session.total_elapsed_secs = self.simulator.total_elapsed_secs();
    // Cleared strictly after the simulator has stopped, so the session is
    // never observed idle with a live tick task
    self.session.loading = false;
  }

  /// Jump to a page and re-run the search with the inputs preserved.
  ///
  /// Deliberately does not guard against a prior in-flight search being
  /// superseded; a stale response may overwrite newer state.
  pub async fn change_page(&mut self, new_page: u32) {
    self.session.page = new_page;
    self.search().await;
  }

  fn build_request(&self) -> Option<SearchQuery> {
    let query = self.session.query.trim();
    let title = self.session.title.trim();
    let author = self.session.author.trim();

    if query.is_empty() && title.is_empty() && author.is_empty() {
      return None;
    }

    Some(SearchQuery {
      q: (!query.is_empty()).then(|| query.to_string()),
      title: (!title.is_empty()).then(|| title.to_string()),
      author: (!author.is_empty()).then(|| author.to_string()),
      page: self.session.page,
      page_size: self.session.page_size,
    })
  }
}
