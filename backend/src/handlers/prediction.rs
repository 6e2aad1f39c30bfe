//! HTTP handlers for image freshness prediction

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    Json,
};
use axum_extra::extract::WithRejection;

use crate::error::{AppError, AppResult};
use crate::models::FreshnessReport;
use crate::services::PredictionService;
use crate::AppState;

/// Multipart field carrying the uploaded image
pub const IMAGE_FIELD: &str = "image";

/// Uploaded image pulled out of a multipart form
#[derive(Debug)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Find the `image` field in a multipart form, ignoring any other fields
pub async fn read_image_upload(multipart: &mut Multipart) -> AppResult<ImageUpload> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        return Ok(ImageUpload { file_name, bytes });
    }

    Err(AppError::MissingImage)
}

/// Classify an uploaded produce image and return its freshness report
pub async fn predict(
    State(state): State<AppState>,
    WithRejection(mut multipart, _): WithRejection<Multipart, AppError>,
) -> AppResult<Json<FreshnessReport>> {
    let upload = read_image_upload(&mut multipart).await?;
    let service = PredictionService::new(state.classifier, state.config.classifier.input_size);
    let report = service.predict(&upload.file_name, upload.bytes).await?;
    Ok(Json(report))
}
