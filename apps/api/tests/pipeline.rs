use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use resume_forge::config::Config;
use resume_forge::models::{Contact, EducationEntry, ExperienceEntry, Language, StructuredCv};
use resume_forge::routes::build_router;
use resume_forge::state::AppState;
use resume_forge::templates::{self, TemplateId};
use resume_forge::{detect_language, extract_text, render, render_with_fallback, PipelineError};

const BOUNDARY: &str = "resume-forge-test-boundary";

fn sample_cv() -> StructuredCv {
    StructuredCv {
        name: "Jane Doe".into(),
        title: "Ingeniera de Software".into(),
        contact: Contact {
            email: "jane@example.com".into(),
            phone: "+34 600 000 000".into(),
            location: "Madrid".into(),
            links: None,
        },
        profile: "Ingeniera backend con diez años de experiencia en sistemas distribuidos.".into(),
        key_accomplishments: vec!["Reduje la latencia p99 un 40%".into()],
        experience: vec![ExperienceEntry {
            title: "Staff Engineer".into(),
            company: "Acme".into(),
            dates: "2019 - 2024".into(),
            description: "Plataforma de facturación basada en eventos.".into(),
        }],
        education: vec![EducationEntry {
            degree: "Ingeniería Informática".into(),
            school: "Universidad Politécnica".into(),
            dates: "2010 - 2015".into(),
        }],
        certifications: vec!["CKA".into()],
        skills: vec!["Go".into()],
        tools: vec!["Terraform".into()],
        languages: vec!["Español".into(), "Inglés".into()],
        language: None,
    }
}

fn keywords() -> Vec<String> {
    vec!["Rust".into(), "Kafka".into(), "PostgreSQL".into()]
}

fn app() -> Router {
    build_router(AppState::new(Config::default()))
}

fn multipart_body(content_type: &str, data: &[u8]) -> Body {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"cv.pdf\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    Body::from(body)
}

fn upload(content_type: &str, data: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/documents/extract")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(multipart_body(content_type, data))
        .unwrap()
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ────────────────────────────────────────────────────────────────────────────
// Library surface
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_render_then_extract_round_trip() {
    let pdf = render(&sample_cv(), &keywords(), "modern", Some(Language::Es)).unwrap();
    let text = extract_text(&pdf).unwrap();

    assert!(text.contains("Jane Doe"), "missing name in {text:?}");
    assert!(text.contains("EXPERIENCIA"), "missing heading in {text:?}");
    assert!(text.contains("jane@example.com"));
    assert_eq!(detect_language(&text), Language::Es);
}

#[test]
fn test_every_template_renders_degenerate_record() {
    for t in templates::all() {
        let pdf = render(&StructuredCv::default(), &[], t.id.as_str(), None).unwrap();
        assert!(pdf.starts_with(b"%PDF"), "{} produced no PDF", t.id);
    }
}

#[test]
fn test_unknown_template_renders_like_modern() {
    let cv = sample_cv();
    let unknown = render(&cv, &keywords(), "not-a-real-id", None).unwrap();
    let modern = render(&cv, &keywords(), "modern", None).unwrap();
    assert_eq!(unknown, modern);

    let rendered = render_with_fallback(&cv, &keywords(), "", None).unwrap();
    assert_eq!(rendered.template, TemplateId::Modern);
}

#[test]
fn test_garbage_bytes_fail_extraction() {
    let err = extract_text(b"definitely not a pdf").unwrap_err();
    assert!(matches!(err, PipelineError::ExtractionFailed(_)));
}

// ────────────────────────────────────────────────────────────────────────────
// HTTP adapter
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn test_list_templates() {
    let response = app()
        .oneshot(Request::builder().uri("/api/v1/templates").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["modern", "classic", "minimal", "professional", "creative"]);
}

#[tokio::test]
async fn test_detect_language_endpoint() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/documents/language",
            json!({ "text": "Expérience professionnelle, compétences et langues" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["language"], "fr");
}

#[tokio::test]
async fn test_render_endpoint_returns_pdf_attachment() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/documents/render",
            json!({
                "cv": sample_cv(),
                "keywords": keywords(),
                "template": "classic",
                "language": "es",
                "filename": "../Jane Doe CV.pdf",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(response.headers()["x-template-used"], "classic");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Jane Doe CV.pdf\""
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_render_endpoint_defaults() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/documents/render",
            json!({ "cv": {}, "template": "nope", "language": "xx" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-template-used"], "modern");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"optimized-cv.pdf\""
    );
}

#[tokio::test]
async fn test_extract_endpoint_round_trip() {
    let pdf = render(&sample_cv(), &keywords(), "creative", Some(Language::Es)).unwrap();
    let response = app().oneshot(upload("application/pdf", &pdf)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert!(body["text"].as_str().unwrap().contains("Jane Doe"));
    assert_eq!(body["language"], "es");
}

#[tokio::test]
async fn test_extract_accepts_pdf_type_with_parameters() {
    let pdf = render(&sample_cv(), &keywords(), "modern", None).unwrap();
    let response = app()
        .oneshot(upload("application/pdf; name=cv.pdf", &pdf))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_extract_rejects_non_pdf_content_type() {
    let response = app().oneshot(upload("text/plain", b"hello")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_extract_unreadable_pdf_is_422() {
    let response = app()
        .oneshot(upload("application/pdf", b"%PDF-1.5 truncated"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["error"]["code"], "EXTRACTION_FAILED");
}

#[tokio::test]
async fn test_extract_enforces_upload_limit() {
    let config = Config { max_upload_bytes: 100, ..Config::default() };
    let app = build_router(AppState::new(config));
    let response = app.oneshot(upload("application/pdf", &[b'x'; 1000])).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_extract_requires_file_field() {
    let body = format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nx\r\n--{BOUNDARY}--\r\n");
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/documents/extract")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
