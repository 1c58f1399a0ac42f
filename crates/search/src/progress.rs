//! Progress simulator for in-flight catalog searches.
//!
//! Advances the illusion of progress over wall-clock time against the
//! estimated stage timeline, with no knowledge of the real request's
//! state. The owning controller reconciles the simulation with the real
//! outcome through [`ProgressSimulator::stop`].

use crate::timeline::Timeline;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::debug;

/// Simulated progress percentage never passes this before the real
/// request resolves.
const PROGRESS_CAP: u8 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
  Pending,
  Active,
  Completed,
}

/// Runtime state of one timeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchStage {
  pub label: &'static str,
  pub estimated_secs: u64,
  pub status: StageStatus,
  /// 0-100
  pub progress: u8,
  /// Whole seconds spent in this stage
  pub elapsed_secs: u64,
}

#[derive(Debug)]
struct ProgressState {
  stages: Vec<SearchStage>,
  total_elapsed_secs: u64,
  stopped: bool,
}

impl Default for ProgressState {
  fn default() -> Self {
    Self {
      stages: Vec::new(),
      total_elapsed_secs: 0,
      stopped: true,
    }
  }
}

/// Read-only view of simulated progress for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
  pub stages: Vec<SearchStage>,
  pub total_elapsed_secs: u64,
  pub running: bool,
}

/// Cloneable read handle over the shared progress state.
///
/// Outlives the simulator it observes; a snapshot taken after teardown
/// simply reports the frozen final state.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
  state: Arc<Mutex<ProgressState>>,
}

impl ProgressTracker {
  pub fn snapshot(&self) -> ProgressSnapshot {
    let st = lock(&self.state);
    ProgressSnapshot {
      stages: st.stages.clone(),
      total_elapsed_secs: st.total_elapsed_secs,
      running: !st.stopped,
    }
  }
}

fn lock(state: &Arc<Mutex<ProgressState>>) -> MutexGuard<'_, ProgressState> {
  state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drives simulated stage progress on a fixed tick while a search is in
/// flight.
///
/// The tick task and the shutdown channel are instance-scoped; dropping
/// the simulator cancels the task, so a discarded search session cannot
/// keep mutating state or leak a timer.
pub struct ProgressSimulator {
  timeline: Timeline,
  tick_interval: Duration,
  state: Arc<Mutex<ProgressState>>,
  shutdown_tx: Option<broadcast::Sender<()>>,
  task: Option<JoinHandle<()>>,
  started_at: Option<Instant>,
}

impl ProgressSimulator {
  pub fn new(timeline: Timeline, tick_interval: Duration) -> Self {
    Self {
      timeline,
      // tokio::time::interval panics on a zero period
      tick_interval: tick_interval.max(Duration::from_millis(1)),
      state: Arc::new(Mutex::new(ProgressState::default())),
      shutdown_tx: None,
      task: None,
      started_at: None,
    }
  }

  pub fn tracker(&self) -> ProgressTracker {
    ProgressTracker {
      state: Arc::clone(&self.state),
    }
  }

  pub fn is_running(&self) -> bool {
    !lock(&self.state).stopped
  }

  pub fn total_elapsed_secs(&self) -> u64 {
    lock(&self.state).total_elapsed_secs
  }

  /// Reset the stage sequence and spawn the tick task.
  ///
  /// A previous run, if still active, is cancelled first; stage state
  /// never carries over between searches.
  pub fn start(&mut self) {
    self.cancel();

    {
      let mut st = lock(&self.state);
      st.stages = fresh_stages(&self.timeline);
      st.total_elapsed_secs = 0;
      st.stopped = false;
    }

    let started = Instant::now();
    self.started_at = Some(started);

    let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
    self.shutdown_tx = Some(shutdown_tx);

    let state = Arc::clone(&self.state);
    let timeline = self.timeline.clone();
    let tick_interval = self.tick_interval;

    self.task = Some(tokio::spawn(async move {
      let mut interval = tokio::time::interval(tick_interval);
      // Skip the immediate tick
      interval.tick().await;

      loop {
        tokio::select! {
          _ = interval.tick() => {
            let elapsed = started.elapsed().as_secs_f64();
            let mut st = lock(&state);
            if st.stopped {
              break;
            }
            advance_stages(&mut st.stages, &timeline, elapsed);
            st.total_elapsed_secs = elapsed as u64;
          }
          _ = shutdown_rx.recv() => break,
        }
      }
    }));
  }

  /// Stop the simulation and reconcile stage state with the real outcome.
  ///
  /// Wins over a concurrently scheduled tick: the `stopped` flag is set
  /// under the same lock every tick mutates through, so no stage mutation
  /// can land after this returns.
  pub fn stop(&mut self, success: bool) {
    let Some(started) = self.started_at.take() else {
      return;
    };
    let total = started.elapsed().as_secs();

    {
      let mut st = lock(&self.state);
      if !st.stopped {
        st.stopped = true;
        st.total_elapsed_secs = total;
        if success {
          complete_stages(&mut st.stages, total);
        }
        // On failure the stages stay exactly as the last tick left them
      }
    }

    self.shutdown();
    debug!(total_secs = total, success, "Progress simulation stopped");
  }

  /// Cancel the tick task without reconciling stage state (teardown path).
  fn cancel(&mut self) {
    lock(&self.state).stopped = true;
    self.shutdown();
    self.started_at = None;
  }

  fn shutdown(&mut self) {
    if let Some(tx) = self.shutdown_tx.take() {
      let _ = tx.send(());
    }
    // The loop exits on the signal or on the stopped flag; no need to join
    self.task.take();
  }
}

impl Drop for ProgressSimulator {
  fn drop(&mut self) {
    self.cancel();
  }
}

fn fresh_stages(timeline: &Timeline) -> Vec<SearchStage> {
  let mut stages: Vec<SearchStage> = timeline
    .specs()
    .iter()
    .map(|spec| SearchStage {
      label: spec.label,
      estimated_secs: spec.estimated_secs,
      status: StageStatus::Pending,
      progress: 0,
      elapsed_secs: 0,
    })
    .collect();

  if let Some(first) = stages.first_mut() {
    first.status = StageStatus::Active;
  }
  stages
}

/// Advance simulated stage state to `elapsed` seconds after search start.
pub(crate) fn advance_stages(stages: &mut [SearchStage], timeline: &Timeline, elapsed: f64) {
  for (i, stage) in stages.iter_mut().enumerate() {
    let (start, end) = timeline.bounds(i);
    let (start_f, end_f) = (start as f64, end as f64);

    if elapsed >= end_f {
      if stage.status != StageStatus::Completed {
        // Snap to the planned duration so per-stage clock drift stays hidden
        stage.status = StageStatus::Completed;
        stage.progress = 100;
        stage.elapsed_secs = stage.estimated_secs;
      }
    } else if elapsed >= start_f {
      if stage.status == StageStatus::Pending {
        stage.status = StageStatus::Active;
      }
      stage.elapsed_secs = (elapsed - start_f) as u64;
      let frac = (elapsed - start_f) / (end_f - start_f);
      stage.progress = (((frac * 100.0).round()) as u8).min(PROGRESS_CAP);
    }
  }

  // Overrun: the request outlived the whole planned timeline. The last
  // stage goes back to active, pinned at the cap, elapsed unbounded.
  if let Some(last) = stages.len().checked_sub(1) {
    let (start, end) = timeline.bounds(last);
    if elapsed >= end as f64 {
      let stage = &mut stages[last];
      stage.status = StageStatus::Active;
      stage.progress = PROGRESS_CAP;
      stage.elapsed_secs = (elapsed - start as f64) as u64;
    }
  }
}

/// Force every stage to completed after a successful request.
///
/// Unfinished stages get their planned duration, except the last one,
/// which absorbs the remainder so per-stage elapsed values sum to the
/// observed total (within rounding).
pub(crate) fn complete_stages(stages: &mut [SearchStage], total_elapsed_secs: u64) {
  let last_incomplete = stages.iter().rposition(|s| s.status != StageStatus::Completed);

  for stage in stages.iter_mut() {
    if stage.status != StageStatus::Completed {
      stage.elapsed_secs = stage.estimated_secs;
    }
    stage.status = StageStatus::Completed;
    stage.progress = 100;
  }

  if let Some(idx) = last_incomplete {
    let prior: u64 = stages
      .iter()
      .enumerate()
      .filter(|(i, _)| *i != idx)
      .map(|(_, s)| s.elapsed_secs)
      .sum();
    stages[idx].elapsed_secs = total_elapsed_secs.saturating_sub(prior);
  }
}
