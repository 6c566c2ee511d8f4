//! # POC Deck - Excel datasheet + PowerPoint template to generated deck
//!
//! Receives an Excel workbook and a PPTX template, stages them in a
//! throwaway work directory, runs the configured generator program and
//! returns the deck it writes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Multipart  │────▶│  Validate   │────▶│  Generator  │────▶│ updated_poc │
//! │   upload    │     │ (ext, req.) │     │ (+timeout)  │     │    .pptx    │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pocdeck::{ServerConfig, server::start_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::from_env().unwrap();
//!     start_server(config).await.unwrap();
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Environment configuration
//! - [`generate`] - Input validation, work directory, generator run
//! - [`api`] - HTTP API server and logging

// Core modules
pub mod error;
pub mod config;

// Generation
pub mod generate;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConfigError,
    GenerateError,
    GeneratorError,
    RequestError,
    ServerError,
};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::{GenerationSettings, ServerConfig};

// =============================================================================
// Re-exports - Generation
// =============================================================================

pub use generate::{
    generate_deck,
    GenerationInputs,
    GeneratorCommand,
    UploadedFile,
    WorkDir,
    EXCEL_INPUT_NAME,
    OUTPUT_FILE_NAME,
    PPTX_MIME,
    TEMPLATE_INPUT_NAME,
};

// Server
pub mod server {
    pub use crate::api::server::{router, serve, start_server};
}
