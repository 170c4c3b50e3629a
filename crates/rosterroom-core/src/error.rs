//! Core error types for rosterroom-core.
//!
//! This module defines the error hierarchy using thiserror so that every
//! fallible operation in the library reports a typed, printable cause.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for rosterroom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Document store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed 12-hour class time strings
    #[error("Time parse error: {0}")]
    TimeParse(#[from] TimeParseError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 decoding of stored document images
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Document-store-specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("admin not found: {0}")]
    AdminNotFound(String),

    #[error("course not found: {0}")]
    CourseNotFound(String),

    #[error("batch not found: {0}")]
    BatchNotFound(String),

    #[error("schedule not found: {0}")]
    ScheduleNotFound(String),

    /// Failed to read the persisted document
    #[error("failed to read document at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the persisted document
    #[error("failed to write document at {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Payload exists but is not a valid document
    #[error("document is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Malformed 12-hour time strings.
///
/// A malformed stored time indicates a caller bug, not a runtime condition
/// to recover from, so parsing fails loudly instead of guessing a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("missing meridiem in class time '{0}'")]
    MissingMeridiem(String),

    #[error("missing minute separator in class time '{0}'")]
    MissingMinute(String),

    #[error("non-numeric hour or minute in class time '{0}'")]
    NotNumeric(String),

    #[error("unrecognized meridiem '{0}' (expected AM or PM)")]
    BadMeridiem(String),
}

/// Validation errors raised when finalizing drafts or mutating records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("rating must be between 1 and 5 stars, got {0}")]
    RatingOutOfRange(u8),

    #[error("at least one class day must be selected")]
    NoDaysSelected,

    #[error("class hour must be between 1 and 12, got {0}")]
    HourOutOfRange(u32),

    #[error("class minute must be one of 00, 15, 30 or 45, got {0}")]
    MinuteNotOnGrid(u32),

    #[error("unrecognized weekday: {0}")]
    UnknownWeekday(String),

    #[error("unrecognized batch status: {0}")]
    UnknownBatchStatus(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
