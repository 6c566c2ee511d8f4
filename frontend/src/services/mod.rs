//! Browser services backing the upload form.
//!
//! # Services
//!
//! - [`generate`] - multipart POST to the generation endpoint (gloo-net)
//! - [`download`] - save bytes as a file through an object URL

pub mod generate;
pub mod download;

pub use generate::*;
pub use download::*;
