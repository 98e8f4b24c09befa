//! Logging setup shared by the CLI and the GUI.
//!
//! Library code only emits `tracing` events; binaries call [`init_logging`]
//! once at startup.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crates whose events pass the default filter
const TARGETS: [&str; 3] = ["mixte_core", "mixte", "mixte_gui"];

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Warnings and above
    #[default]
    Normal,
    /// Info and above
    Verbose,
    /// Everything, including blocked actions and parse details
    Debug,
}

impl Verbosity {
    /// From the `-q` flag and the number of `-v` flags
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Debug,
        }
    }

    pub fn to_level(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Debug => Level::DEBUG,
        }
    }

    /// Filter directive used when `RUST_LOG` is not set
    pub fn default_filter(&self) -> String {
        let level = self.to_level().to_string().to_lowercase();
        TARGETS
            .iter()
            .map(|target| format!("{}={}", target, level))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `verbosity`. Calling twice is harmless.
pub fn init_logging(verbosity: Verbosity) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.default_filter()));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(false)
            .with_line_number(false),
    );

    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        assert_eq!(Verbosity::from_flags(true, 2), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, 5), Verbosity::Debug);
    }

    #[test]
    fn test_levels() {
        assert_eq!(Verbosity::Quiet.to_level(), Level::ERROR);
        assert_eq!(Verbosity::default().to_level(), Level::WARN);
        assert_eq!(Verbosity::Debug.to_level(), Level::DEBUG);
    }

    #[test]
    fn test_default_filter_covers_every_crate() {
        assert_eq!(
            Verbosity::Verbose.default_filter(),
            "mixte_core=info,mixte=info,mixte_gui=info"
        );
    }

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        init_logging(Verbosity::Quiet);
        init_logging(Verbosity::Debug);
    }
}
