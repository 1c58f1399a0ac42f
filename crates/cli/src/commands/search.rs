//! Catalog search command with a live progress timeline

use anyhow::Result;
use bookfind_core::Config;
use catalog::HttpCatalog;
use search::{ProgressSnapshot, ProgressTracker, SearchController, StageStatus, Timeline};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::error;

#[allow(clippy::too_many_arguments)]
pub async fn cmd_search(
  query: Option<&str>,
  title: Option<&str>,
  author: Option<&str>,
  page: u32,
  page_size: Option<u32>,
  json_output: bool,
  quiet: bool,
) -> Result<()> {
  let blank = |s: Option<&str>| s.map(str::trim).unwrap_or("").is_empty();
  if blank(query) && blank(title) && blank(author) {
    anyhow::bail!("Provide a query, --title, or --author");
  }

  let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
  let config = Config::load_for_project(&cwd);

  let service = Arc::new(
    HttpCatalog::new()
      .with_url(&config.service.base_url)
      .with_timeout(Duration::from_secs(config.service.timeout_secs)),
  );

  let timeline = Timeline::standard_with_durations(config.progress.stage_secs.as_deref());
  let tick = Duration::from_millis(config.progress.tick_interval_ms);

  let mut controller =
    SearchController::new(service, timeline, tick).with_page_size(page_size.unwrap_or(config.search.page_size));
  if let Some(q) = query {
    controller.set_query(q);
  }
  if let Some(t) = title {
    controller.set_title(t);
  }
  if let Some(a) = author {
    controller.set_author(a);
  }

  // Render simulated progress on stderr while the request is in flight
  let (stop_tx, stop_rx) = oneshot::channel();
  let render_handle =
    (!quiet && !json_output).then(|| tokio::spawn(render_progress(controller.progress(), tick, stop_rx)));

  controller.change_page(page).await;

  let _ = stop_tx.send(());
  if let Some(handle) = render_handle {
    let _ = handle.await;
  }

  let session = controller.session();

  if json_output {
    println!(
      "{}",
      serde_json::to_string_pretty(&serde_json::json!({
        "total": session.total,
        "page": session.page,
        "page_size": session.page_size,
        "elapsed_secs": session.total_elapsed_secs,
        "error": session.error,
        "results": session.results,
      }))?
    );
    if session.error.is_some() {
      std::process::exit(1);
    }
    return Ok(());
  }

  if let Some(ref message) = session.error {
    error!("{}", message);
    std::process::exit(1);
  }

  if session.results.is_empty() {
    println!("No books found.");
    return Ok(());
  }

  println!(
    "Found {} books on this page ({} records total, {}s):\n",
    session.results.len(),
    session.total,
    session.total_elapsed_secs
  );

  for (i, book) in session.results.iter().enumerate() {
    let author = book.author.as_deref().unwrap_or("Unknown author");
    println!("{}. {} ({})", i + 1, book.title, author);
    for format in &book.formats {
      match format.filesize {
        Some(size) => println!("   [{}] {} {}", format.extension, format_size(size), format.download_url),
        None => println!("   [{}] {}", format.extension, format.download_url),
      }
    }
    println!();
  }

  let seen = u64::from(session.page) * u64::from(session.page_size);
  if session.total > seen {
    println!("More results: bookfind search ... --page {}", session.page + 1);
  }

  Ok(())
}

/// Periodically redraw a one-line view of the simulated timeline.
async fn render_progress(tracker: ProgressTracker, tick: Duration, mut stop_rx: oneshot::Receiver<()>) {
  let mut interval = tokio::time::interval(tick);

  loop {
    tokio::select! {
      _ = interval.tick() => {
        let snapshot = tracker.snapshot();
        if !snapshot.running {
          continue;
        }
        if let Some(line) = progress_line(&snapshot) {
          eprint!("\r{:<70}", line);
          let _ = std::io::stderr().flush();
        }
      }
      _ = &mut stop_rx => break,
    }
  }

  // Clear the status line before results print
  eprint!("\r{:<70}\r", "");
  let _ = std::io::stderr().flush();
}

fn progress_line(snapshot: &ProgressSnapshot) -> Option<String> {
  let total = snapshot.stages.len();
  let (idx, stage) = snapshot
    .stages
    .iter()
    .enumerate()
    .find(|(_, s)| s.status == StageStatus::Active)
    .or_else(|| snapshot.stages.iter().enumerate().last())?;

  Some(format!(
    "[{}/{}] {} {}% ({}s elapsed)",
    idx + 1,
    total,
    stage.label,
    stage.progress,
    snapshot.total_elapsed_secs
  ))
}

/// Format a file size for display
fn format_size(bytes: u64) -> String {
  const KB: u64 = 1024;
  const MB: u64 = 1024 * 1024;

  if bytes >= MB {
    format!("{:.1} MB", bytes as f64 / MB as f64)
  } else if bytes >= KB {
    format!("{} KB", bytes / KB)
  } else {
    format!("{} B", bytes)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use search::SearchStage;

  #[test]
  fn test_format_size() {
    assert_eq!(format_size(512), "512 B");
    assert_eq!(format_size(2048), "2 KB");
    assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
  }

  #[test]
  fn test_progress_line_shows_active_stage() {
    let snapshot = ProgressSnapshot {
      stages: vec![
        SearchStage {
          label: "Connecting to catalog",
          estimated_secs: 3,
          status: StageStatus::Completed,
          progress: 100,
          elapsed_secs: 3,
        },
        SearchStage {
          label: "Querying index",
          estimated_secs: 12,
          status: StageStatus::Active,
          progress: 58,
          elapsed_secs: 7,
        },
      ],
      total_elapsed_secs: 10,
      running: true,
    };

    let line = progress_line(&snapshot).unwrap();
    assert!(line.contains("[2/2]"));
    assert!(line.contains("Querying index"));
    assert!(line.contains("58%"));
  }

  #[test]
  fn test_progress_line_empty_timeline() {
    let snapshot = ProgressSnapshot {
      stages: Vec::new(),
      total_elapsed_secs: 0,
      running: true,
    };
    assert!(progress_line(&snapshot).is_none());
  }
}
