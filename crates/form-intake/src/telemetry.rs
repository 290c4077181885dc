use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::EnvFilter;

/// Target of the per-request access line. Always enabled at INFO, whatever the
/// configured level, so every request is logged exactly once.
pub const REQUEST_LOG_TARGET: &str = "form_intake::requests";

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "invalid log level/filter '{value}': unable to build EnvFilter")
            }
            TelemetryError::Subscriber(err) => write!(f, "unable to install subscriber: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// `RUST_LOG` wins over the configured level when it is set and parses. The request
/// line target is added on top of either.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|source| {
            TelemetryError::EnvFilter {
                value: config.log_level.clone(),
                source,
            }
        })?,
    };

    let request_line = format!("{REQUEST_LOG_TARGET}=info");
    let directive = request_line
        .parse::<Directive>()
        .map_err(|source| TelemetryError::EnvFilter {
            value: request_line.clone(),
            source,
        })?;

    Ok(filter.add_directive(directive))
}

/// Install the global subscriber. Request lines go to stdout as plain compact text so
/// they stay greppable by their tag.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config)?)
        .with_writer(std::io::stdout)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::env_guard;

    #[test]
    fn rejects_unparseable_level() {
        let _lock = env_guard().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        std::env::remove_var("RUST_LOG");
        let config = TelemetryConfig {
            log_level: "form_intake=loud".to_string(),
        };

        let err = env_filter(&config).expect_err("bad directive rejected");
        assert!(err.to_string().contains("form_intake=loud"));
    }

    #[test]
    fn accepts_module_directives() {
        let _lock = env_guard().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        std::env::remove_var("RUST_LOG");
        let config = TelemetryConfig {
            log_level: "warn,form_intake_api=debug".to_string(),
        };

        assert!(env_filter(&config).is_ok());
    }

    #[test]
    fn request_lines_survive_quieter_levels() {
        let _lock = env_guard().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        std::env::remove_var("RUST_LOG");
        let config = TelemetryConfig {
            log_level: "warn".to_string(),
        };

        let filter = env_filter(&config).expect("filter builds");
        assert!(filter
            .to_string()
            .contains(&format!("{REQUEST_LOG_TARGET}=info")));
    }
}
