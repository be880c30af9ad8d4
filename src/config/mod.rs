//! Configuration module
//!
//! - types.rs: Gateway address and HTTP sender options
//! - io.rs: Configuration loading and environment overrides
//! - paths.rs: Configuration file paths

mod io;
mod paths;
mod types;

pub use io::{apply_env_overrides, load_config, load_config_from_path};
pub use paths::{config_dir, config_path};
pub use types::{GatewayConfig, SenderOptions};
