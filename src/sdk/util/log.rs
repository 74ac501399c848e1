use env_logger::{Builder, Env};

pub const DEFAULT_FILTER: &str = "info";

/// Installs the env_logger backend. `RUST_LOG` takes precedence over `default_filter`.
pub fn init_logging(default_filter: &str) {
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .init();
}
