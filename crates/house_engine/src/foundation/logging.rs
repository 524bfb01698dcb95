//! Logging utilities

pub use log::{debug, error, info, trace, warn};

/// Initialize logging with a default level filter.
///
/// `RUST_LOG`, when set, still takes precedence over `default_level`.
pub fn init_with_level(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        log::debug!("Logger already initialized: {}", e);
    }
}
