mod runner_config;

pub use runner_config::{get_config_manager, RunnerConfig};
