//! Stage timeline for simulated search progress.
//!
//! A timeline is an ordered list of named stages with estimated durations;
//! cumulative boundaries come from a prefix sum over those durations.

/// One named phase of the simulated timeline, fixed at definition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSpec {
  pub label: &'static str,
  pub estimated_secs: u64,
}

/// Default timeline for a catalog search.
pub const DEFAULT_STAGES: [StageSpec; 4] = [
  StageSpec {
    label: "Connecting to catalog",
    estimated_secs: 3,
  },
  StageSpec {
    label: "Querying index",
    estimated_secs: 12,
  },
  StageSpec {
    label: "Matching records",
    estimated_secs: 35,
  },
  StageSpec {
    label: "Merging formats",
    estimated_secs: 15,
  },
];

/// Stage specs plus their cumulative `[start, end)` boundaries in seconds.
#[derive(Debug, Clone)]
pub struct Timeline {
  specs: Vec<StageSpec>,
  bounds: Vec<(u64, u64)>,
}

impl Timeline {
  pub fn new(specs: Vec<StageSpec>) -> Self {
    let mut bounds = Vec::with_capacity(specs.len());
    let mut start = 0;
    for spec in &specs {
      let end = start + spec.estimated_secs;
      bounds.push((start, end));
      start = end;
    }
    Self { specs, bounds }
  }

  pub fn standard() -> Self {
    Self::new(DEFAULT_STAGES.to_vec())
  }

  /// Standard labels with per-stage duration overrides.
  ///
  /// The override only takes effect when it names a positive duration for
  /// every stage; anything else falls back to the standard timeline.
  pub fn standard_with_durations(durations: Option<&[u64]>) -> Self {
    match durations {
      Some(secs) if secs.len() == DEFAULT_STAGES.len() && secs.iter().all(|s| *s > 0) => {
        let specs = DEFAULT_STAGES
          .iter()
          .zip(secs)
          .map(|(spec, secs)| StageSpec {
            label: spec.label,
            estimated_secs: *secs,
          })
          .collect();
        Self::new(specs)
      }
      _ => Self::standard(),
    }
  }

  pub fn len(&self) -> usize {
    self.specs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.specs.is_empty()
  }

  pub fn specs(&self) -> &[StageSpec] {
    &self.specs
  }

  /// `[start, end)` boundary of stage `i` in seconds since search start.
  pub fn bounds(&self, i: usize) -> (u64, u64) {
    self.bounds[i]
  }

  /// Planned end of the whole timeline.
  pub fn total_secs(&self) -> u64 {
    self.bounds.last().map(|(_, end)| *end).unwrap_or(0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn spec(label: &'static str, secs: u64) -> StageSpec {
    StageSpec {
      label,
      estimated_secs: secs,
    }
  }

  #[test]
  fn test_boundaries_are_prefix_sums() {
    let timeline = Timeline::new(vec![spec("a", 3), spec("b", 12), spec("c", 35), spec("d", 15)]);
    assert_eq!(timeline.bounds(0), (0, 3));
    assert_eq!(timeline.bounds(1), (3, 15));
    assert_eq!(timeline.bounds(2), (15, 50));
    assert_eq!(timeline.bounds(3), (50, 65));
    assert_eq!(timeline.total_secs(), 65);
  }

  #[test]
  fn test_standard_timeline() {
    let timeline = Timeline::standard();
    assert_eq!(timeline.len(), DEFAULT_STAGES.len());
    assert_eq!(timeline.total_secs(), DEFAULT_STAGES.iter().map(|s| s.estimated_secs).sum::<u64>());
  }

  #[test]
  fn test_duration_override_applies() {
    let timeline = Timeline::standard_with_durations(Some(&[1, 2, 3, 4]));
    assert_eq!(timeline.bounds(3), (6, 10));
    assert_eq!(timeline.specs()[0].label, DEFAULT_STAGES[0].label);
  }

  #[test]
  fn test_duration_override_rejected_on_length_mismatch() {
    let timeline = Timeline::standard_with_durations(Some(&[1, 2]));
    assert_eq!(timeline.total_secs(), Timeline::standard().total_secs());
  }

  #[test]
  fn test_duration_override_rejected_on_zero() {
    let timeline = Timeline::standard_with_durations(Some(&[1, 0, 3, 4]));
    assert_eq!(timeline.total_secs(), Timeline::standard().total_secs());
  }
}
