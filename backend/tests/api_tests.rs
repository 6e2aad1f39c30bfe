//! Router tests for the freshness API
//! Drives `create_app` end to end with a stubbed classifier

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::Value;
use tower::ServiceExt;

use produce_freshness_backend::{
    config::Config,
    create_app,
    error::{AppError, AppResult},
    external::ImageClassifier,
    models::Classification,
    services::ImageTensor,
    AppState,
};

const BOUNDARY: &str = "freshness-test-boundary";

/// Classifier stub returning a fixed answer and counting calls
struct StubClassifier {
    result: Result<Classification, String>,
    calls: AtomicUsize,
}

impl StubClassifier {
    fn answering(label: &str, confidence: f32) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(Classification {
                label: label.to_string(),
                confidence,
            }),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageClassifier for StubClassifier {
    async fn classify(&self, _tensor: &ImageTensor) -> AppResult<Classification> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
            .clone()
            .map_err(AppError::ClassifierError)
    }
}

fn app_with(classifier: Arc<StubClassifier>) -> Router {
    app_with_limit(classifier, Config::default().upload.max_bytes)
}

fn app_with_limit(classifier: Arc<StubClassifier>, max_bytes: usize) -> Router {
    let mut config = Config::default();
    config.classifier.input_size = 32;
    config.upload.max_bytes = max_bytes;

    create_app(AppState {
        config: Arc::new(config),
        classifier,
    })
}

fn png_image() -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(RgbImage::from_pixel(12, 9, Rgb([180, 30, 20])))
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

fn multipart_body(field: &str, file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn predict_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    if !status.is_success() {
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json",
            "error responses must be JSON"
        );
    }
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

// =============================================================================
// Health Tests
// =============================================================================

mod health {
    use super::*;

    #[tokio::test]
    async fn health_reports_healthy() {
        let app = app_with(StubClassifier::answering("Ripe", 0.9));
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let (status, json) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({ "status": "healthy" }));
    }
}

// =============================================================================
// Predict Tests
// =============================================================================

mod predict {
    use super::*;

    #[tokio::test]
    async fn returns_report_for_valid_upload() {
        let classifier = StubClassifier::answering("Ripe", 0.9234);
        let app = app_with(classifier.clone());

        let body = multipart_body("image", "tomatoes.png", &png_image());
        let (status, json) = send(app, predict_request(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["score"], 95);
        assert_eq!(json["category"], "Ripe");
        assert_eq!(json["confidence"], 92.34);
        assert_eq!(json["shelf_life"], "5-7 days");
        assert_eq!(
            json["action"],
            "Premium market ready - excellent for immediate sale"
        );
        assert_eq!(json["pricing"], "Full market price (₦15,000-₦18,000/basket)");
        assert_eq!(json["urgency"], "low");
        assert_eq!(json["cooling_needed"], false);
        assert_eq!(classifier.calls(), 1);
    }

    #[tokio::test]
    async fn low_confidence_adds_warning() {
        let app = app_with(StubClassifier::answering("damaged", 0.4));

        let body = multipart_body("image", "batch.PNG", &png_image());
        let (status, json) = send(app, predict_request(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["score"], 12);
        assert_eq!(json["urgency"], "critical");
        assert_eq!(
            json["action"],
            "⚠️ Low confidence (40%) - Not suitable for fresh sale - process into paste/sauce - Double-check visually"
        );
    }

    #[tokio::test]
    async fn unrecognized_label_uses_fallback() {
        let app = app_with(StubClassifier::answering("Rotten", 0.95));

        let body = multipart_body("image", "batch.gif", &png_image());
        let (status, json) = send(app, predict_request(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["score"], 50);
        assert_eq!(json["category"], "Rotten");
        assert_eq!(json["shelf_life"], "Unknown");
        assert_eq!(json["urgency"], "medium");
    }

    #[tokio::test]
    async fn rejects_disallowed_extension_without_classifying() {
        let classifier = StubClassifier::answering("Ripe", 0.9);
        let app = app_with(classifier.clone());

        let body = multipart_body("image", "tomatoes.bmp", &png_image());
        let (status, json) = send(app, predict_request(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["error"],
            "Invalid file. Please upload an image file (e.g., PNG, JPEG)."
        );
        assert_eq!(json["code"], "INVALID_FILE");
        assert_eq!(classifier.calls(), 0);
    }

    #[tokio::test]
    async fn rejects_missing_image_field() {
        let classifier = StubClassifier::answering("Ripe", 0.9);
        let app = app_with(classifier.clone());

        let body = multipart_body("photo", "tomatoes.png", &png_image());
        let (status, json) = send(app, predict_request(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "MISSING_IMAGE");
        assert_eq!(classifier.calls(), 0);
    }

    #[tokio::test]
    async fn rejects_undecodable_image() {
        let classifier = StubClassifier::answering("Ripe", 0.9);
        let app = app_with(classifier.clone());

        let body = multipart_body("image", "tomatoes.jpg", b"this is not a jpeg");
        let (status, json) = send(app, predict_request(body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["code"], "IMAGE_DECODE_ERROR");
        assert_eq!(classifier.calls(), 0);
    }

    #[tokio::test]
    async fn rejects_non_multipart_body() {
        let classifier = StubClassifier::answering("Ripe", 0.9);
        let app = app_with(classifier.clone());

        let request = Request::builder()
            .method("POST")
            .uri("/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"image":"tomatoes.png"}"#))
            .unwrap();

        let (status, json) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "MALFORMED_REQUEST");
        assert!(json["error"].is_string());
        assert_eq!(classifier.calls(), 0);
    }

    #[tokio::test]
    async fn rejects_upload_over_body_limit() {
        let classifier = StubClassifier::answering("Ripe", 0.9);
        let app = app_with_limit(classifier.clone(), 1024);

        let body = multipart_body("image", "tomatoes.png", &vec![0u8; 4096]);
        let (status, json) = send(app, predict_request(body)).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json["code"], "PAYLOAD_TOO_LARGE");
        assert!(json["error"].is_string());
        assert_eq!(classifier.calls(), 0);
    }

    #[tokio::test]
    async fn reports_classifier_failure() {
        let app = app_with(StubClassifier::failing("model server unreachable"));

        let body = multipart_body("image", "tomatoes.png", &png_image());
        let (status, json) = send(app, predict_request(body)).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["code"], "CLASSIFIER_ERROR");
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("model server unreachable"));
    }
}

// =============================================================================
// Advisory Tests
// =============================================================================

mod advisory {
    use super::*;

    fn advise_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/advise")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn advise_scores_client_classification() {
        let app = app_with(StubClassifier::answering("Ripe", 0.9));
        let request = advise_request(serde_json::json!({
            "category": "  UNRIPE ",
            "confidence": 72.5
        }));

        let (status, json) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["score"], 63);
        assert_eq!(json["category"], "Unripe");
        assert_eq!(json["confidence"], 72.5);
        assert_eq!(json["urgency"], "medium");
    }

    #[tokio::test]
    async fn advise_rejects_non_numeric_confidence() {
        let app = app_with(StubClassifier::answering("Ripe", 0.9));
        let request = advise_request(serde_json::json!({
            "category": "ripe",
            "confidence": "high"
        }));

        let (status, json) = send(app, request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["code"], "INVALID_JSON");
        assert!(json["error"].as_str().unwrap().contains("confidence"));
    }

    #[tokio::test]
    async fn advise_rejects_missing_content_type() {
        let app = app_with(StubClassifier::answering("Ripe", 0.9));
        let request = Request::builder()
            .method("POST")
            .uri("/advise")
            .body(Body::from(r#"{"category":"ripe","confidence":90}"#))
            .unwrap();

        let (status, json) = send(app, request).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(json["code"], "INVALID_JSON");
    }

    #[tokio::test]
    async fn categories_lists_table() {
        let app = app_with(StubClassifier::answering("Ripe", 0.9));
        let request = Request::builder()
            .uri("/categories")
            .body(Body::empty())
            .unwrap();

        let (status, json) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);

        let categories = json["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 4);
        assert_eq!(categories[0]["category"], "ripe");
        assert_eq!(categories[0]["label"], "Ripe");
        assert_eq!(categories[0]["base_score"], 95);
        assert_eq!(categories[3]["urgency"], "critical");
        assert_eq!(json["fallback"]["shelf_life"], "Unknown");
        assert_eq!(json["fallback"]["base_score"], 50);
    }
}

// =============================================================================
// CORS Tests
// =============================================================================

mod cors {
    use super::*;

    #[tokio::test]
    async fn preflight_allows_any_origin() {
        let app = app_with(StubClassifier::answering("Ripe", 0.9));
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/predict")
            .header(header::ORIGIN, "https://market.example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }
}
