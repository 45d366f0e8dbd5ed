//! Run configuration parsed from environment variables.
//!
//! Every setting can be supplied through a `LANGCHECK_` environment variable
//! and overridden by the matching command-line flag.

use std::env;
use std::str::FromStr;

use langcheck::EvalBudget;

use crate::error::CliError;

/// Environment variable holding the log level.
pub const LOG_LEVEL_VAR: &str = "LANGCHECK_LOG_LEVEL";
/// Environment variable holding the per-line step limit.
pub const STEP_LIMIT_VAR: &str = "LANGCHECK_STEP_LIMIT";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so that stderr stays quiet on a normal run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging.
    Trace,
    /// Compilation details and per-line progress.
    Debug,
    /// Run start and finish.
    Info,
    /// Undecided lines and other anomalies.
    #[default]
    Warn,
    /// Failures only.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Parse a step limit, rejecting zero and non-numeric values.
///
/// # Errors
///
/// Returns `CliError::InvalidConfig` when `value` is not a positive integer.
pub fn parse_step_limit(value: &str) -> Result<u64, CliError> {
    match value.trim().parse::<u64>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(CliError::InvalidConfig(format!(
            "invalid step limit '{value}', expected a positive integer"
        ))),
    }
}

/// Configuration for one run.
///
/// # Environment Variables
///
/// - `LANGCHECK_LOG_LEVEL`: trace, debug, info, warn or error
/// - `LANGCHECK_STEP_LIMIT`: node evaluations allowed per line; unset means
///   unlimited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log level for stderr output.
    pub log_level: LogLevel,
    /// Per-line step limit, `None` for unlimited.
    pub step_limit: Option<u64>,
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a variable holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(val) => val.parse()?,
            None => LogLevel::default(),
        };
        let step_limit = lookup(STEP_LIMIT_VAR)
            .map(|val| parse_step_limit(&val))
            .transpose()?;
        Ok(Self {
            log_level,
            step_limit,
        })
    }

    /// Apply command-line overrides on top of environment defaults.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        step_limit: Option<u64>,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }

        if let Some(limit) = step_limit {
            self.step_limit = Some(limit);
        }

        self
    }

    /// Evaluation budget for each line.
    #[must_use]
    pub fn budget(&self) -> EvalBudget {
        self.step_limit
            .map_or_else(EvalBudget::unlimited, EvalBudget::steps)
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lookup_from(
        pairs: &'static [(&'static str, &'static str)],
    ) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("Debug", LogLevel::Debug)]
    #[case("INFO", LogLevel::Info)]
    #[case("warning", LogLevel::Warn)]
    #[case("error", LogLevel::Error)]
    fn log_level_parses_case_insensitively(#[case] input: &str, #[case] expected: LogLevel) {
        assert_eq!(input.parse::<LogLevel>().ok(), Some(expected));
    }

    #[test]
    fn log_level_rejects_invalid_values() {
        let result = "loud".parse::<LogLevel>();
        assert!(result.unwrap_err().to_string().contains("unknown log level"));
    }

    #[rstest]
    #[case("1", Some(1))]
    #[case(" 5000 ", Some(5000))]
    #[case("0", None)]
    #[case("-3", None)]
    #[case("lots", None)]
    fn step_limit_must_be_positive(#[case] input: &str, #[case] expected: Option<u64>) {
        assert_eq!(parse_step_limit(input).ok(), expected);
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = CliConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.budget(), EvalBudget::unlimited());
    }

    #[test]
    fn reads_variables() {
        let config = CliConfig::from_lookup(lookup_from(&[
            (LOG_LEVEL_VAR, "debug"),
            (STEP_LIMIT_VAR, "250"),
        ]))
        .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.budget(), EvalBudget::steps(250));
    }

    #[test]
    fn invalid_variable_is_reported() {
        let err = CliConfig::from_lookup(lookup_from(&[(STEP_LIMIT_VAR, "0")])).unwrap_err();
        assert!(err.to_string().contains("invalid step limit '0'"));
    }

    #[test]
    fn apply_overrides_updates_selected_fields() {
        let config = CliConfig::default().apply_overrides(Some(LogLevel::Error), Some(42));
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.step_limit, Some(42));

        let config = CliConfig::default().apply_overrides(None, None);
        assert_eq!(config, CliConfig::default());
    }
}
