//! HTTP Server for the deck generator.
//!
//! # API Endpoints
//!
//! | Method | Path                 | Description                         |
//! |--------|----------------------|-------------------------------------|
//! | GET    | `/health`, `/api/app`| Health check                        |
//! | POST   | `/api/app/generate`  | Excel + template in, PPTX out       |
//!
//! Errors are returned as `text/plain` bodies so clients can show them as-is.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    http::{header, Method},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use super::logs::{log_error, log_info, log_warning};
use crate::config::ServerConfig;
use crate::error::{GenerateError, GenerateResult, RequestError, ServerResult};
use crate::generate::{
    generate_deck, GenerationInputs, UploadedFile, OUTPUT_FILE_NAME, PPTX_MIME,
};

/// Multipart field carrying the Excel datasheet.
pub const EXCEL_FIELD: &str = "excel";

/// Multipart field carrying the PowerPoint template.
pub const TEMPLATE_FIELD: &str = "template";

/// Shared handler state.
#[derive(Debug)]
pub struct AppState {
    pub config: ServerConfig,
}

/// Build the application router.
pub fn router(config: ServerConfig) -> Router {
    // Permissive CORS so `trunk serve` can call us from another port
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    let body_limit = config.max_upload_bytes;
    let state = Arc::new(AppState { config });

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/app", get(health).post(generate))
        .route("/api/app/generate", post(generate))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(state)
}

/// Serve on an already bound listener.
pub async fn serve(listener: TcpListener, config: ServerConfig) -> ServerResult<()> {
    axum::serve(listener, router(config)).await?;
    Ok(())
}

/// Start the HTTP server
pub async fn start_server(config: ServerConfig) -> ServerResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let generator = &config.generation.generator;

    println!("🚀 POC Deck server running on http://localhost:{}", config.port);
    println!("   POST /api/app/generate - Excel + template -> {}", OUTPUT_FILE_NAME);
    println!("   GET  /health           - Health check");
    println!();
    println!(
        "⚙️  Generator: {} {} (timeout {:?})",
        generator.program(),
        generator.args().join(" "),
        generator.timeout()
    );
    match &config.generation.default_template {
        Some(path) => println!("📄 Default template: {}", path.display()),
        None => println!("📄 No default template; uploads must include one"),
    }

    let listener = TcpListener::bind(addr).await?;
    serve(listener, config).await
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "pocdeck",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "generate": "POST /api/app/generate"
        }
    }))
}

/// Generation endpoint
async fn generate(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> GenerateResult<Response> {
    let multipart = multipart.map_err(|rejection| RequestError::Multipart {
        status: rejection.status(),
        detail: rejection.body_text(),
    })?;
    let inputs = read_inputs(multipart).await?;

    println!("\n{}", "=".repeat(70));
    println!(
        "📄 NEW GENERATION: {} + {}",
        inputs.excel().file_name,
        inputs.template().map_or("<default template>", |t| t.file_name.as_str())
    );
    println!("{}\n", "=".repeat(70));

    let deck = generate_deck(&inputs, &state.config.generation).await?;

    let disposition = format!("attachment; filename=\"{}\"", OUTPUT_FILE_NAME);
    Ok((
        [
            (header::CONTENT_TYPE, PPTX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        deck,
    )
        .into_response())
}

/// Collect the `excel` and `template` parts; other fields are ignored.
async fn read_inputs(mut multipart: Multipart) -> Result<GenerationInputs, RequestError> {
    let mut excel: Option<UploadedFile> = None;
    let mut template: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        let name = field.name().unwrap_or("").to_string();
        if name != EXCEL_FIELD && name != TEMPLATE_FIELD {
            continue;
        }

        let file_name = field.file_name().unwrap_or("").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(multipart_error)?
            .to_vec();
        log_info(format!("Received '{}': {} ({} bytes)", name, file_name, bytes.len()));

        let upload = Some(UploadedFile::new(file_name, bytes));
        if name == EXCEL_FIELD {
            excel = upload;
        } else {
            template = upload;
        }
    }

    GenerationInputs::new(excel, template)
}

/// Keep axum's status so an oversized body is a 413, not a 400.
fn multipart_error(e: MultipartError) -> RequestError {
    RequestError::Multipart {
        status: e.status(),
        detail: e.body_text(),
    }
}

impl IntoResponse for GenerateError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log_error(format!("{} {}", status, self));
        } else {
            log_warning(format!("{} {}", status, self));
        }
        (status, self.to_string()).into_response()
    }
}
