//! POC Deck - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend that sends an Excel datasheet and a PowerPoint
//! template to the generation endpoint and downloads the updated deck.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Hero (title, description)                                  │
//! │  UploadForm ──▶ Submitter ──▶ FetchTransport (POST)         │
//! │                          └──▶ BrowserDownloader (save)      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (SubmitError, GenerateResponse, etc.)
//! - [`submission`] - Platform-free submission lifecycle
//! - [`components`] - UI components (Hero, UploadForm, Footer)
//! - [`services`] - Browser plumbing (fetch, file download)

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod submission;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Files
    SelectedFile,
    // Responses
    GenerateResponse,
    // Errors
    SubmitError, SubmitResult, TransportError, DownloadError,
};

// Submission
pub use submission::{
    Downloader, GeneratePayload, GenerateTransport, PayloadPart, SubmissionTickets,
    SubmissionView, SubmitOutcome, Submitter,
};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application
// =============================================================================

/// Root component, mounted by `main.rs`.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="POC Deck Generator"/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    view! {
        <div class="container">
            <Hero/>
            <UploadForm/>
        </div>

        <Footer/>
    }
}
