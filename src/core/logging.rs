//! Logging initialization

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable.
///
/// # Panics
/// Panics if a global logger is already installed; call once at startup.
///
/// # Example
/// ```
/// loctree::core::logging::init();
/// log::info!("Octree built");
/// ```
pub fn init() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();
}
