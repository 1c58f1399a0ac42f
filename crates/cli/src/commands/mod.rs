mod config;
mod health;
mod search;

pub use config::{cmd_config_init, cmd_config_show};
pub use health::cmd_health;
pub use search::cmd_search;
