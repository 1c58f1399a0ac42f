//! Progressive search orchestration for the bookfind catalog client.
//!
//! A catalog query can take tens of seconds; this crate drives the request
//! lifecycle while simulating a staged progress timeline from wall-clock
//! time alone, then reconciles the simulation with the real outcome.

mod classify;
mod controller;
mod progress;
mod timeline;

pub use classify::{FailureKind, classify, user_message_for};
pub use controller::{SearchController, SearchSession};
pub use progress::{ProgressSimulator, ProgressSnapshot, ProgressTracker, SearchStage, StageStatus};
pub use timeline::{DEFAULT_STAGES, StageSpec, Timeline};
