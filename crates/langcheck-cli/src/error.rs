//! Error types for the command-line front end.

use std::io;
use std::path::PathBuf;

use langcheck::ExprError;
use thiserror::Error;

/// Errors that can occur while running a check.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input file does not exist.
    #[error("input file not found: {}", path.display())]
    ResourceNotFound {
        /// Path as given on the command line.
        path: PathBuf,
    },

    /// The input file exists but could not be read.
    #[error("failed to read {}", path.display())]
    Read {
        /// Path as given on the command line.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The expression did not compile.
    #[error("cannot compile expression `{expression}`")]
    Compile {
        /// Expression as given on the command line.
        expression: String,
        /// Compilation failure.
        #[source]
        source: ExprError,
    },

    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn resource_not_found_names_the_path() {
        let error = CliError::ResourceNotFound {
            path: PathBuf::from("missing.txt"),
        };
        assert_eq!(error.to_string(), "input file not found: missing.txt");
    }

    #[test]
    fn compile_error_exposes_its_cause() {
        let error = CliError::Compile {
            expression: "L9".into(),
            source: ExprError::UndefinedReference {
                name: "L9".into(),
                position: 0,
            },
        };
        assert_eq!(error.to_string(), "cannot compile expression `L9`");
        let cause = error.source().map(ToString::to_string);
        assert_eq!(
            cause.as_deref(),
            Some("language `L9` is not defined (referenced at byte 0)")
        );
    }

    #[test]
    fn invalid_config_displays_message() {
        let error = CliError::InvalidConfig("unknown log level".to_string());
        assert_eq!(error.to_string(), "invalid configuration: unknown log level");
    }
}
