//! UI Components for the POC Deck application.
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadForm`] - Excel + template pickers and the generate button

mod hero;
mod upload;
mod footer;

pub use hero::*;
pub use upload::*;
pub use footer::*;
