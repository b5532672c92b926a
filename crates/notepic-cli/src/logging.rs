//! Tracing subscriber setup

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Pick the filter directive.
///
/// Precedence: `--log-level` > `--verbose` > `RUST_LOG` > config file > warn
pub fn filter_directive(
    cli_level: Option<LogLevel>,
    verbose: bool,
    rust_log: Option<String>,
    config_level: Option<LogLevel>,
) -> String {
    if let Some(level) = cli_level {
        return LevelFilter::from(level).to_string().to_lowercase();
    }
    if verbose {
        return "debug".to_string();
    }
    if let Some(directive) = rust_log.filter(|d| !d.trim().is_empty()) {
        return directive;
    }
    LevelFilter::from(config_level.unwrap_or(LogLevel::Warn))
        .to_string()
        .to_lowercase()
}

/// Install the global subscriber. Logs go to stderr.
pub fn init(
    cli_level: Option<LogLevel>,
    verbose: bool,
    config_level: Option<LogLevel>,
) {
    let directive = filter_directive(
        cli_level,
        verbose,
        std::env::var("RUST_LOG").ok(),
        config_level,
    );

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_level_wins() {
        let directive = filter_directive(
            Some(LogLevel::Error),
            true,
            Some("trace".into()),
            Some(LogLevel::Info),
        );
        assert_eq!(directive, "error");
    }

    #[test]
    fn verbose_beats_environment() {
        assert_eq!(filter_directive(None, true, Some("warn".into()), None), "debug");
    }

    #[test]
    fn environment_beats_config() {
        let directive = filter_directive(
            None,
            false,
            Some("notepic_core=trace".into()),
            Some(LogLevel::Info),
        );
        assert_eq!(directive, "notepic_core=trace");
    }

    #[test]
    fn config_then_default() {
        assert_eq!(filter_directive(None, false, None, Some(LogLevel::Info)), "info");
        assert_eq!(filter_directive(None, false, Some("  ".into()), None), "warn");
        assert_eq!(filter_directive(Some(LogLevel::Off), false, None, None), "off");
    }
}
