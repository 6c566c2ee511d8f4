//! Error types for the deck generation service.
//!
//! - [`RequestError`] - rejected uploads (client mistakes)
//! - [`GeneratorError`] - the external generator failed or timed out
//! - [`GenerateError`] - top-level generation errors, mapped to HTTP statuses
//! - [`ConfigError`] - invalid environment configuration
//! - [`ServerError`] - server startup errors
//!
//! `Display` of [`GenerateError`] is the plain-text body sent to clients.

use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;

use crate::generate::OUTPUT_FILE_NAME;

// =============================================================================
// Request Errors
// =============================================================================

/// Upload rejected before any work is done.
#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    /// Unreadable multipart body. `status` is the one axum assigns to the
    /// failure, e.g. 413 when the body limit is exceeded.
    #[error("Multipart error: {detail}")]
    Multipart { status: StatusCode, detail: String },

    /// No `excel` part, or one sent without a filename.
    #[error("Missing file: need 'excel'")]
    MissingExcel,

    /// No `template` part and no default template configured.
    ///
    /// Reported as a 400: the client can always fix it by attaching a
    /// template, even though the server could also have one configured.
    #[error("Missing file: need 'template'")]
    MissingTemplate,

    /// Excel filename without an `.xlsx`/`.xls` extension.
    #[error("Excel must be .xlsx or .xls")]
    InvalidExcel(String),

    /// Template filename without a `.pptx` extension.
    #[error("Template must be .pptx")]
    InvalidTemplate(String),
}

// =============================================================================
// Generator Errors
// =============================================================================

/// Errors from running the generator program.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Could not start or wait for the process.
    #[error("Failed to run generator: {0}")]
    Spawn(#[source] std::io::Error),

    /// Exceeded the configured timeout; the process was killed.
    #[error("Generation timed out. Try a smaller file or retry.")]
    Timeout(Duration),

    /// Non-zero exit.
    #[error("Script failed\nSTDOUT:\n{stdout}\n\nSTDERR:\n{stderr}")]
    Failed {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// Exited successfully without writing the deck.
    #[error("Output PPTX not found (expected '{}')", OUTPUT_FILE_NAME)]
    MissingOutput,
}

// =============================================================================
// Generation Errors (top-level)
// =============================================================================

/// Everything that can go wrong while serving one generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// Work directory / file staging failure.
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenerateError {
    /// HTTP status reported for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GenerateError::Request(RequestError::Multipart { status, .. }) => *status,
            GenerateError::Request(_) => StatusCode::BAD_REQUEST,
            GenerateError::Generator(GeneratorError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            GenerateError::Generator(_) | GenerateError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Invalid configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A numeric variable did not parse.
    #[error("Invalid value for {var}: '{value}'")]
    InvalidNumber { var: String, value: String },

    /// The generator command line is blank.
    #[error("Generator command is empty")]
    EmptyGenerator,
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for generation.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
