mod config;

pub use config::{Config, ProgressConfig, SearchConfig, ServiceConfig};
