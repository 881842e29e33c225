//! Miette-based error diagnostics for CLI error presentation.
//!
//! Provides rich error types with source code context, labels, and help
//! suggestions for the errors a command can end with.

use std::path::Path;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError as SettingsError, Error};
use crate::infrastructure::config::settings::{Config, DATABASE_ENV};

/// Configuration error with optional source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(affinity::config))]
pub struct ConfigError {
    /// Human-readable error message.
    pub message: String,

    /// Source content (the configuration file).
    #[source_code]
    pub src: String,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: Option<SourceSpan>,

    /// Optional help text with suggestions for fixing the error.
    #[help]
    pub help: Option<String>,
}

impl ConfigError {
    /// Create a configuration error without a location.
    #[must_use]
    pub fn new(message: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: None,
            help: None,
        }
    }

    /// Point the error at `len` bytes starting at `offset`.
    #[must_use]
    pub fn at(mut self, offset: usize, len: usize) -> Self {
        self.span = Some((offset, len).into());
        self
    }

    /// Add a help suggestion to the error.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Store connection error.
#[derive(Debug, Error, Diagnostic)]
#[error("store unavailable: {message}")]
#[diagnostic(code(affinity::store))]
pub struct StoreError {
    /// Detailed error message from the connection failure.
    pub message: String,

    #[help]
    pub help: Option<String>,
}

impl StoreError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            help: Some(format!(
                "check store.database in the config file or the {DATABASE_ENV} variable"
            )),
        }
    }
}

/// Any other command failure.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(affinity::command))]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Load and validate the configuration file, rendering failures.
///
/// # Errors
/// Returns a diagnostic pointing into the file when it is unreadable,
/// malformed or invalid.
pub fn load_config(path: &Path) -> miette::Result<Config> {
    let src = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::new(format!("cannot read {}: {e}", path.display()), String::new())
            .with_help("pass --config <path> or copy config.example.toml to config.toml")
    })?;

    Config::parse_toml(&src).map_err(|e| config_report(e, src))
}

fn config_report(error: Error, src: String) -> miette::Report {
    match error {
        Error::Config(SettingsError::Parse(parse)) => {
            let span = parse.span();
            let diagnostic = ConfigError::new(parse.message().to_string(), src);
            match span {
                Some(range) => diagnostic.at(range.start, range.len()).into(),
                None => diagnostic.into(),
            }
        }
        Error::Config(SettingsError::InvalidValue { field, reason }) => {
            let offset = src.find(field);
            let diagnostic = ConfigError::new(format!("invalid value for {field}: {reason}"), src);
            match offset {
                Some(offset) => diagnostic.at(offset, field.len()).into(),
                None => diagnostic.into(),
            }
        }
        other => ConfigError::new(other.to_string(), src).into(),
    }
}

/// Convert a command failure into a rendered diagnostic.
#[must_use]
pub fn report(error: Error) -> miette::Report {
    match error {
        Error::Connection(message) => StoreError::new(message).into(),
        other => CommandError::new(other.to_string()).into(),
    }
}
