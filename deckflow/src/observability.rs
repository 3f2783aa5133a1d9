//! Tracing setup helpers.

use std::sync::Once;

static INIT: Once = Once::new();

/// Installs a global tracing subscriber reading `RUST_LOG`.
///
/// Safe to call more than once; only the first call installs. Binaries
/// and tests that want stage lifecycle logs call this at startup.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
