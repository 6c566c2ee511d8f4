//! End-to-end tests for the HTTP API, with `sh` standing in for the generator.

#![cfg(unix)]

use std::fs;
use std::path::Path;
use std::time::Duration;

use pocdeck::{GenerationSettings, GeneratorCommand, ServerConfig, PPTX_MIME};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use tempfile::{tempdir, TempDir};
use tokio::net::TcpListener;

const MAX_UPLOAD_BYTES: usize = 64 * 1024;

struct TestServer {
    base_url: String,
    work_root: TempDir,
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn leftover_work_dirs(&self) -> usize {
        fs::read_dir(self.work_root.path()).unwrap().count()
    }
}

async fn spawn_server(
    script: &str,
    timeout: Duration,
    default_template: Option<&Path>,
) -> TestServer {
    let work_root = tempdir().unwrap();
    let generator = GeneratorCommand::new("sh")
        .with_args(["-c", script])
        .with_timeout(timeout);

    let mut generation = GenerationSettings::new(generator).with_work_root(work_root.path());
    if let Some(path) = default_template {
        generation = generation.with_default_template(path);
    }
    let config = ServerConfig {
        port: 0,
        max_upload_bytes: MAX_UPLOAD_BYTES,
        generation,
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        pocdeck::server::serve(listener, config).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
        work_root,
    }
}

fn part(bytes: &[u8], file_name: &str) -> Part {
    Part::bytes(bytes.to_vec()).file_name(file_name.to_string())
}

fn upload_form() -> Form {
    Form::new()
        .part("excel", part(b"xlsx-bytes", "datasheet.xlsx"))
        .part("template", part(b"pptx-bytes", "template.pptx"))
}

const COPY_TEMPLATE: &str = "cp template.pptx updated_poc.pptx";

#[tokio::test]
async fn test_health() {
    let server = spawn_server(COPY_TEMPLATE, Duration::from_secs(5), None).await;

    for path in ["/health", "/api/app"] {
        let body: serde_json::Value = reqwest::get(server.url(path))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "pocdeck");
    }
}

#[tokio::test]
async fn test_generate_returns_deck() {
    let server = spawn_server(
        "cat datasheet_imarc.xlsx template.pptx > updated_poc.pptx",
        Duration::from_secs(5),
        None,
    )
    .await;

    let response = reqwest::Client::new()
        .post(server.url("/api/app/generate"))
        .multipart(upload_form())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], PPTX_MIME);
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"updated_poc.pptx\""
    );
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"xlsx-bytespptx-bytes");
    assert_eq!(server.leftover_work_dirs(), 0);
}

#[tokio::test]
async fn test_missing_excel() {
    let server = spawn_server(COPY_TEMPLATE, Duration::from_secs(5), None).await;

    let form = Form::new().part("template", part(b"pptx", "template.pptx"));
    let response = reqwest::Client::new()
        .post(server.url("/api/app/generate"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Missing file: need 'excel'");
}

#[tokio::test]
async fn test_excel_without_filename_is_missing() {
    let server = spawn_server(COPY_TEMPLATE, Duration::from_secs(5), None).await;

    let form = Form::new()
        .text("excel", "datasheet.xlsx")
        .part("template", part(b"pptx", "template.pptx"));
    let response = reqwest::Client::new()
        .post(server.url("/api/app/generate"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Missing file: need 'excel'");
    assert_eq!(server.leftover_work_dirs(), 0);
}

#[tokio::test]
async fn test_oversized_upload_is_payload_too_large() {
    let server = spawn_server(COPY_TEMPLATE, Duration::from_secs(5), None).await;

    let excel = vec![b'x'; MAX_UPLOAD_BYTES * 2];
    let form = Form::new()
        .part("excel", part(&excel, "datasheet.xlsx"))
        .part("template", part(b"pptx", "template.pptx"));
    let response = reqwest::Client::new()
        .post(server.url("/api/app/generate"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(response.text().await.unwrap().starts_with("Multipart error: "));
    assert_eq!(server.leftover_work_dirs(), 0);
}

#[tokio::test]
async fn test_non_multipart_body_rejected() {
    let server = spawn_server(COPY_TEMPLATE, Duration::from_secs(5), None).await;

    let response = reqwest::Client::new()
        .post(server.url("/api/app/generate"))
        .header("content-type", "text/plain")
        .body("not a form")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.text().await.unwrap().starts_with("Multipart error: "));
}

#[tokio::test]
async fn test_wrong_extensions() {
    let server = spawn_server(COPY_TEMPLATE, Duration::from_secs(5), None).await;
    let client = reqwest::Client::new();

    let form = Form::new()
        .part("excel", part(b"csv", "data.csv"))
        .part("template", part(b"pptx", "template.pptx"));
    let response = client.post(server.url("/api/app/generate")).multipart(form).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Excel must be .xlsx or .xls");

    let form = Form::new()
        .part("excel", part(b"xlsx", "data.xlsx"))
        .part("template", part(b"ppt", "deck.ppt"));
    let response = client.post(server.url("/api/app/generate")).multipart(form).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Template must be .pptx");
}

#[tokio::test]
async fn test_default_template_fallback() {
    let assets = tempdir().unwrap();
    let default = assets.path().join("default_template.pptx");
    fs::write(&default, b"default-deck").unwrap();
    let server = spawn_server(COPY_TEMPLATE, Duration::from_secs(5), Some(&default)).await;

    let form = Form::new().part("excel", part(b"xlsx", "data.xlsx"));
    let response = reqwest::Client::new()
        .post(server.url("/api/app"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"default-deck");
}

#[tokio::test]
async fn test_script_failure() {
    let server = spawn_server(
        "echo parsing; echo 'no Summary sheet' >&2; exit 1",
        Duration::from_secs(5),
        None,
    )
    .await;

    let response = reqwest::Client::new()
        .post(server.url("/api/app/generate"))
        .multipart(upload_form())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.text().await.unwrap(),
        "Script failed\nSTDOUT:\nparsing\n\n\nSTDERR:\nno Summary sheet\n"
    );
    assert_eq!(server.leftover_work_dirs(), 0);
}

#[tokio::test]
async fn test_missing_output() {
    let server = spawn_server("true", Duration::from_secs(5), None).await;

    let response = reqwest::Client::new()
        .post(server.url("/api/app/generate"))
        .multipart(upload_form())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.text().await.unwrap(),
        "Output PPTX not found (expected 'updated_poc.pptx')"
    );
}

#[tokio::test]
async fn test_timeout() {
    let server = spawn_server("sleep 5", Duration::from_millis(200), None).await;

    let response = reqwest::Client::new()
        .post(server.url("/api/app/generate"))
        .multipart(upload_form())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(
        response.text().await.unwrap(),
        "Generation timed out. Try a smaller file or retry."
    );
    assert_eq!(server.leftover_work_dirs(), 0);
}
