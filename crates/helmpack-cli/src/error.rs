//! CLI error types with exit code handling
//!
//! Every variant corresponds to one pipeline stage so the rendered
//! diagnostic and the exit code both say where the run stopped.

use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Missing or invalid invocation inputs
    #[error("Input error: {message}")]
    #[diagnostic(code(helmpack::cli::input))]
    Input {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Helm could not be installed
    #[error("Install failed: {message}")]
    #[diagnostic(code(helmpack::cli::install))]
    Install {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Values overlays could not be merged
    #[error("Values merge failed: {message}")]
    #[diagnostic(code(helmpack::cli::values))]
    Values { message: String },

    /// `helm dependency update` failed; `output` is the tool's own text
    #[error("`helm dependency update` failed:\n{output}")]
    #[diagnostic(code(helmpack::cli::dependency))]
    DependencyUpdate { output: String },

    /// `helm package` failed or its archive could not be found
    #[error("`helm package` failed:\n{output}")]
    #[diagnostic(code(helmpack::cli::package))]
    Package { output: String },

    /// The step output could not be written
    #[error("Output error: {message}")]
    #[diagnostic(code(helmpack::cli::output))]
    Output { message: String },

    /// Internal error (runtime, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(helmpack::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Input { .. } => exit_codes::INPUT_ERROR,
            CliError::Install { .. } => exit_codes::INSTALL_ERROR,
            CliError::Values { .. } => exit_codes::VALUES_ERROR,
            CliError::DependencyUpdate { .. } => exit_codes::DEPENDENCY_ERROR,
            CliError::Package { .. } => exit_codes::PACKAGE_ERROR,
            CliError::Output { .. } => exit_codes::OUTPUT_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create an input error
    pub fn input(message: impl ToString) -> Self {
        Self::Input {
            message: message.to_string(),
            help: None,
        }
    }

    /// Create an input error with help text
    pub fn input_with_help(message: impl ToString, help: impl Into<String>) -> Self {
        Self::Input {
            message: message.to_string(),
            help: Some(help.into()),
        }
    }

    /// Create an install error
    pub fn install(message: impl ToString) -> Self {
        Self::Install {
            message: message.to_string(),
            help: None,
        }
    }

    /// Create an install error with help text
    pub fn install_with_help(message: impl ToString, help: impl Into<String>) -> Self {
        Self::Install {
            message: message.to_string(),
            help: Some(help.into()),
        }
    }

    /// Create a values merge error
    pub fn values(message: impl ToString) -> Self {
        Self::Values {
            message: message.to_string(),
        }
    }

    /// Create a package error
    pub fn package(output: impl ToString) -> Self {
        Self::Package {
            output: output.to_string(),
        }
    }

    /// Create an output error
    pub fn output(message: impl ToString) -> Self {
        Self::Output {
            message: message.to_string(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl ToString) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_stage() {
        let errors = [
            CliError::input("x"),
            CliError::install("x"),
            CliError::values("x"),
            CliError::DependencyUpdate { output: "x".into() },
            CliError::package("x"),
            CliError::output("x"),
            CliError::internal("x"),
        ];
        let mut codes: Vec<u8> = errors.iter().map(CliError::exit_code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(!codes.contains(&exit_codes::SUCCESS));
    }

    #[test]
    fn test_tool_output_is_verbatim() {
        let err = CliError::DependencyUpdate {
            output: "Error: no repository definition for https://charts.example.com\n".into(),
        };
        assert_eq!(
            err.to_string(),
            "`helm dependency update` failed:\nError: no repository definition for https://charts.example.com\n"
        );
    }
}
