//! Submission lifecycle for the upload form.
//!
//! ```text
//! Idle ──submit──▶ Validating ──missing file──▶ Idle (error)
//!                      │
//!                      └──▶ Sending ──▶ Success (download) ──▶ Idle
//!                                  └──▶ Failed (error)     ──▶ Idle
//! ```
//!
//! The logic here is platform-free: the network and the "save file" step are
//! injected through [`GenerateTransport`] and [`Downloader`], and UI state is
//! written through [`SubmissionView`]. The browser wiring lives in
//! [`crate::services`] and [`crate::components`].

#![allow(async_fn_in_trait)]

use std::cell::Cell;

use crate::config::{DOWNLOAD_FILENAME, EXCEL_FIELD, TEMPLATE_FIELD};
use crate::types::{
    DownloadError, GenerateResponse, SelectedFile, SubmitError, SubmitResult, TransportError,
};

// =============================================================================
// Capabilities
// =============================================================================

/// One named part of the multipart body.
#[derive(Debug)]
pub struct PayloadPart<'a, F> {
    pub name: &'static str,
    pub file: &'a F,
}

/// Multipart body for a generation request: `excel` then `template`.
#[derive(Debug)]
pub struct GeneratePayload<'a, F> {
    parts: [PayloadPart<'a, F>; 2],
}

impl<'a, F> GeneratePayload<'a, F> {
    pub fn new(excel: &'a F, template: &'a F) -> Self {
        Self {
            parts: [
                PayloadPart { name: EXCEL_FIELD, file: excel },
                PayloadPart { name: TEMPLATE_FIELD, file: template },
            ],
        }
    }

    pub fn parts(&self) -> &[PayloadPart<'a, F>] {
        &self.parts
    }
}

/// Sends a generation request and reads its response body.
pub trait GenerateTransport {
    type File: SelectedFile;

    /// POST the payload. A non-success status is `Ok(Failed)`; only
    /// send/read failures are `Err`.
    async fn generate(
        &self,
        payload: &GeneratePayload<'_, Self::File>,
    ) -> Result<GenerateResponse, TransportError>;
}

/// Persists bytes held in memory under a filename.
pub trait Downloader {
    fn save(&self, bytes: &[u8], filename: &str) -> Result<(), DownloadError>;
}

/// Sink for the form's visible state.
pub trait SubmissionView {
    fn set_loading(&self, loading: bool);
    fn set_error(&self, error: Option<SubmitError>);
}

// =============================================================================
// Tickets
// =============================================================================

/// Hands out one ticket per submission; only the newest may settle the form.
#[derive(Debug, Default)]
pub struct SubmissionTickets {
    latest: Cell<u64>,
}

impl SubmissionTickets {
    pub fn issue(&self) -> u64 {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        next
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }
}

// =============================================================================
// Submitter
// =============================================================================

/// How an accepted submission ended.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// The deck was handed to the downloader.
    Downloaded { filename: String, size: usize },
    /// A newer submission started while this one was in flight; its result
    /// was dropped without touching the form.
    Superseded,
}

/// Drives one form's submissions against a transport and a downloader.
pub struct Submitter<T, D> {
    transport: T,
    downloader: D,
    tickets: SubmissionTickets,
}

impl<T, D> Submitter<T, D>
where
    T: GenerateTransport,
    D: Downloader,
{
    pub fn new(transport: T, downloader: D) -> Self {
        Self {
            transport,
            downloader,
            tickets: SubmissionTickets::default(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn downloader(&self) -> &D {
        &self.downloader
    }

    /// Submit the two selected files.
    ///
    /// Missing files fail synchronously with [`SubmitError::Validation`] and
    /// never reach the transport. Otherwise exactly one request is issued and
    /// `loading` stays true until it settles.
    pub async fn submit<V: SubmissionView>(
        &self,
        excel: Option<&T::File>,
        template: Option<&T::File>,
        view: &V,
    ) -> SubmitResult<SubmitOutcome> {
        view.set_error(None);

        let (excel, template) = match (excel, template) {
            (Some(excel), Some(template)) => (excel, template),
            _ => {
                log::warn!("Submit rejected: both files are required");
                view.set_error(Some(SubmitError::Validation));
                return Err(SubmitError::Validation);
            }
        };

        let payload = GeneratePayload::new(excel, template);
        let ticket = self.tickets.issue();
        view.set_loading(true);

        log::info!(
            "📤 Submitting {} ({} bytes) + {} ({} bytes)",
            excel.file_name(),
            excel.size(),
            template.file_name(),
            template.size(),
        );

        let result = self.transport.generate(&payload).await;

        if !self.tickets.is_current(ticket) {
            log::debug!("Submission #{} superseded, dropping its response", ticket);
            return Ok(SubmitOutcome::Superseded);
        }

        let outcome = self.finish(result);

        match &outcome {
            Ok(SubmitOutcome::Downloaded { filename, size }) => {
                log::info!("✅ Saved {} ({} bytes)", filename, size);
            }
            Ok(SubmitOutcome::Superseded) => {}
            Err(err) => {
                log::warn!("❌ Generation failed: {}", err);
                view.set_error(Some(err.clone()));
            }
        }
        view.set_loading(false);

        outcome
    }

    fn finish(
        &self,
        result: Result<GenerateResponse, TransportError>,
    ) -> SubmitResult<SubmitOutcome> {
        match result? {
            GenerateResponse::Failed { status, body } => Err(SubmitError::Server {
                status,
                detail: body,
            }),
            GenerateResponse::Succeeded { bytes } => {
                self.downloader.save(&bytes, DOWNLOAD_FILENAME)?;
                Ok(SubmitOutcome::Downloaded {
                    filename: DOWNLOAD_FILENAME.to_string(),
                    size: bytes.len(),
                })
            }
        }
    }
}
