#![forbid(unsafe_op_in_unsafe_fn)]

use env_logger::{Builder, Env};

/// Installs the process logger.
///
/// `RUST_LOG` overrides `default_filter`. Returns false if a logger was already installed.
pub fn init_logging(default_filter: &str) -> bool {
    let env = Env::default().default_filter_or(default_filter);
    let ok = Builder::from_env(env)
        .format_timestamp_millis()
        .format_target(true)
        .try_init()
        .is_ok();

    if !ok {
        log::debug!("logging: logger already installed, keeping it");
    }
    ok
}
