//! Tracing subscriber setup.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber.
///
/// `RUST_LOG` wins over `default_filter` when it is set. Calling this more
/// than once is harmless; later calls are ignored.
///
/// # Errors
///
/// Returns an error string if `default_filter` is not a valid filter.
pub fn init(default_filter: &str) -> Result<(), String> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(default_filter)
            .map_err(|e| format!("Invalid log filter `{default_filter}`: {e}"))?,
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_filter() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert!(init("taskboard=notalevel").is_err());
    }

    #[test]
    fn repeated_init_is_harmless() {
        assert!(init("warn").is_ok());
        assert!(init("debug").is_ok());
    }
}
