#![forbid(unsafe_code)]

//! Subscriber setup for the binary.
//!
//! `GARDENPATH_LOG` takes an `EnvFilter` directive string and wins over the
//! `-v`/`-q` flags. Output goes to stderr so frame listings on stdout stay
//! clean.

use crate::{Error, Result};
use tracing_subscriber::filter::{Directive, EnvFilter, LevelFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

pub const ENV_LOG: &str = "GARDENPATH_LOG";

/// Build the event filter from an optional directive string and the CLI level.
pub fn build_filter(directives: Option<&str>, level: LevelFilter) -> Result<EnvFilter> {
    match directives.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => EnvFilter::try_new(d)
            .map_err(|e| Error::Config(format!("{ENV_LOG}: invalid filter {d:?}: {e}"))),
        None => Ok(EnvFilter::default().add_directive(Directive::from(level))),
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(level: LevelFilter, json: bool) -> Result<()> {
    let env = std::env::var(ENV_LOG).ok();
    let filter = build_filter(env.as_deref(), level)?;

    let result = if json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_filter(filter),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_filter(filter),
            )
            .try_init()
    };
    result.map_err(|e| Error::Config(format!("cannot install logger: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_level_used_without_directives() {
        let filter = build_filter(None, LevelFilter::DEBUG).unwrap();
        assert_eq!(filter.to_string(), "debug");
        let filter = build_filter(Some("  "), LevelFilter::WARN).unwrap();
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn directives_override_cli_level() {
        let filter = build_filter(Some("gpath_engine=trace"), LevelFilter::ERROR).unwrap();
        let shown = filter.to_string();
        assert!(shown.contains("gpath_engine=trace"));
        assert!(!shown.contains("error"));
    }

    #[test]
    fn bad_directives_are_config_errors() {
        let err = build_filter(Some("gpath_engine=loud"), LevelFilter::INFO).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
