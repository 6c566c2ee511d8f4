//! Application configuration.
//!
//! Centralized configuration for the POC Deck frontend.
//! Everything here is fixed at compile time; the backend owns the
//! runtime knobs (generator command, timeouts, upload limits).

/// Generation endpoint, relative to the page origin.
///
/// `trunk serve` proxies `/api` to the backend during development.
pub const GENERATE_ENDPOINT: &str = "/api/app/generate";

/// Filename the generated deck is saved under.
pub const DOWNLOAD_FILENAME: &str = "updated_poc.pptx";

/// Multipart field carrying the Excel datasheet.
pub const EXCEL_FIELD: &str = "excel";

/// Multipart field carrying the PowerPoint template.
pub const TEMPLATE_FIELD: &str = "template";

/// `accept` hint for the Excel picker. Browsers may ignore it.
pub const EXCEL_ACCEPT: &str = ".xls,.xlsx";

/// `accept` hint for the template picker.
pub const TEMPLATE_ACCEPT: &str = ".pptx";

/// Shown when submit is pressed with an empty slot.
pub const MISSING_FILES_MESSAGE: &str = "Please select both files.";

/// Shown when the server fails without a body.
pub const SERVER_ERROR_FALLBACK: &str = "Server error";

/// Shown when a transport or download failure carries no message.
pub const GENERIC_ERROR_FALLBACK: &str = "Something went wrong";

/// Submit button label while idle.
pub const SUBMIT_LABEL: &str = "Generate PPTX";

/// Submit button label while a request is in flight.
pub const SUBMITTING_LABEL: &str = "Generating…";

pub const PRIVACY_NOTICE: &str =
    "Your files are processed securely in a temporary environment. Nothing is stored after generation.";

/// Label for the submit button given the loading flag.
pub fn submit_label(loading: bool) -> &'static str {
    if loading {
        SUBMITTING_LABEL
    } else {
        SUBMIT_LABEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_label_toggles() {
        assert_eq!(submit_label(false), "Generate PPTX");
        assert_eq!(submit_label(true), "Generating…");
    }
}
