//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **File Types** - the file handle abstraction used by the form
//! - **Response Types** - what a generation request settles into
//! - **Error Types** - the submission error taxonomy

use std::fmt;

use crate::config::{GENERIC_ERROR_FALLBACK, MISSING_FILES_MESSAGE, SERVER_ERROR_FALLBACK};

// =============================================================================
// File Types
// =============================================================================

/// A file picked by the user.
///
/// Implemented by `web_sys::File` in the browser and by plain structs in tests,
/// so the submission logic never touches platform handles directly.
pub trait SelectedFile {
    /// Original filename, as reported by the picker.
    fn file_name(&self) -> String;

    /// Size in bytes.
    fn size(&self) -> u64;
}

impl SelectedFile for web_sys::File {
    fn file_name(&self) -> String {
        self.name()
    }

    fn size(&self) -> u64 {
        web_sys::Blob::size(self) as u64
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// A settled generation request.
#[derive(Clone, Debug, PartialEq)]
pub enum GenerateResponse {
    /// 2xx status; the body read as bytes.
    Succeeded { bytes: Vec<u8> },
    /// Any other status; the body read as text.
    Failed { status: u16, body: String },
}

// =============================================================================
// Error Types
// =============================================================================

/// Failure to send a request or read its response.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransportError {
    pub message: Option<String>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()) }
    }

    /// An error that carries no usable message.
    pub fn silent() -> Self {
        Self { message: None }
    }
}

/// Failure to hand the generated bytes to the user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DownloadError {
    pub message: Option<String>,
}

impl DownloadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()) }
    }
}

/// Why a submission failed.
///
/// `Display` yields the exact line shown under the form.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitError {
    /// One of the two file slots was empty at submit time.
    Validation,
    /// The server answered with a non-success status.
    Server { status: u16, detail: String },
    /// The request could not be sent or its body could not be read.
    Transport(Option<String>),
    /// The response arrived but could not be saved.
    Download(Option<String>),
}

impl SubmitError {
    /// Text displayed to the user.
    pub fn user_message(&self) -> &str {
        match self {
            SubmitError::Validation => MISSING_FILES_MESSAGE,
            SubmitError::Server { detail, .. } if detail.is_empty() => SERVER_ERROR_FALLBACK,
            SubmitError::Server { detail, .. } => detail,
            SubmitError::Transport(message) | SubmitError::Download(message) => message
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or(GENERIC_ERROR_FALLBACK),
        }
    }

    /// HTTP status for server failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            SubmitError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

impl std::error::Error for SubmitError {}

impl From<TransportError> for SubmitError {
    fn from(err: TransportError) -> Self {
        SubmitError::Transport(err.message)
    }
}

impl From<DownloadError> for SubmitError {
    fn from(err: DownloadError) -> Self {
        SubmitError::Download(err.message)
    }
}

/// Result type alias for submissions.
pub type SubmitResult<T> = Result<T, SubmitError>;
