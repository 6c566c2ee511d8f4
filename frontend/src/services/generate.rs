//! HTTP transport for the generation endpoint.

use gloo_net::http::Request;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use crate::submission::{GeneratePayload, GenerateTransport};
use crate::types::{GenerateResponse, TransportError};

/// Posts the form's files to the backend with `fetch`.
#[derive(Clone, Debug)]
pub struct FetchTransport {
    endpoint: String,
}

impl FetchTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl GenerateTransport for FetchTransport {
    type File = File;

    async fn generate(
        &self,
        payload: &GeneratePayload<'_, File>,
    ) -> Result<GenerateResponse, TransportError> {
        let form_data = FormData::new().map_err(js_transport_error)?;
        for part in payload.parts() {
            form_data
                .append_with_blob_and_filename(part.name, part.file, &part.file.name())
                .map_err(js_transport_error)?;
        }

        let response = Request::post(&self.endpoint)
            .body(form_data)
            .map_err(|e| TransportError::new(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        if !response.ok() {
            let body = response
                .text()
                .await
                .map_err(|e| TransportError::new(e.to_string()))?;
            return Ok(GenerateResponse::Failed {
                status: response.status(),
                body,
            });
        }

        let bytes = response
            .binary()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;
        Ok(GenerateResponse::Succeeded { bytes })
    }
}

/// Pull `message` out of a thrown JS value, if it has one.
pub(crate) fn js_error_message(value: &JsValue) -> Option<String> {
    js_sys::Reflect::get(value, &"message".into())
        .ok()
        .and_then(|v| v.as_string())
        .or_else(|| value.as_string())
}

fn js_transport_error(value: JsValue) -> TransportError {
    TransportError { message: js_error_message(&value) }
}
