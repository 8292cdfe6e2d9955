//! `tracing` subscriber setup for the binary.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs a stderr subscriber so stdout carries only command output.
///
/// `RUST_LOG` wins when set; otherwise `repotrack=info`, or
/// `repotrack=debug` with `verbose`. A second call is a no-op.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("repotrack=debug")
    } else {
        EnvFilter::new("repotrack=info")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_follows_verbose() {
        assert_eq!(default_filter(false).to_string().to_lowercase(), "repotrack=info");
        assert_eq!(default_filter(true).to_string().to_lowercase(), "repotrack=debug");
    }

    #[test]
    fn init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
