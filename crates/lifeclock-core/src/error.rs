//! Error types for lifeclock-core.
//!
//! Input validation failures are always reported synchronously from the
//! entry point that received the bad value. Nothing inside a tick returns
//! an error.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors raised while deriving or accepting a birth moment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// Age given in years was below zero
    #[error("age must be a non-negative number of years, got {0}")]
    NegativeAge(f64),

    /// Age was NaN or infinite
    #[error("age must be a finite number of years")]
    NonFiniteAge,

    /// Age so large the birth moment cannot be represented
    #[error("age of {0} years is out of range")]
    AgeOutOfRange(f64),

    /// Calendar date text did not match DD-MM-YYYY
    #[error("'{text}' is not a valid date, expected DD-MM-YYYY: {source}")]
    MalformedDate {
        text: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Birth moment lies after the current time
    #[error("birth moment {birth} is in the future (now is {now})")]
    FutureBirthMoment {
        birth: NaiveDateTime,
        now: NaiveDateTime,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}
