//! Prediction service: upload in, freshness report out

use axum::body::Bytes;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::ImageClassifier;
use crate::models::FreshnessReport;
use crate::services::preprocess;
use shared::{advise, allowed_image_file, confidence_to_percent, validate_confidence_percent};

/// Runs an uploaded image through preprocessing, the classifier and the advisor
#[derive(Clone)]
pub struct PredictionService {
    classifier: Arc<dyn ImageClassifier>,
    input_size: u32,
}

impl PredictionService {
    /// Create a new PredictionService instance
    pub fn new(classifier: Arc<dyn ImageClassifier>, input_size: u32) -> Self {
        Self {
            classifier,
            input_size,
        }
    }

    /// Classify an uploaded image and build its freshness report.
    ///
    /// The file extension is checked before any decoding happens.
    #[tracing::instrument(skip(self, bytes), fields(request_id = %Uuid::new_v4(), size = bytes.len()))]
    pub async fn predict(&self, file_name: &str, bytes: Bytes) -> AppResult<FreshnessReport> {
        if !allowed_image_file(file_name) {
            return Err(AppError::InvalidFileType(file_name.to_string()));
        }

        let size = self.input_size;
        let tensor = tokio::task::spawn_blocking(move || preprocess::prepare_image(&bytes, size))
            .await
            .map_err(|e| AppError::Internal(format!("Preprocessing task failed: {}", e)))??;

        let classification = self.classifier.classify(&tensor).await?;
        tracing::debug!(
            label = %classification.label,
            raw_confidence = classification.confidence,
            "Classifier returned"
        );

        let confidence = validate_confidence_percent(confidence_to_percent(
            classification.confidence,
        ))
        .map_err(|msg| AppError::ClassifierError(msg.to_string()))?;

        let report = advise(&classification.label, confidence);
        tracing::info!(
            category = %report.category,
            confidence = report.confidence,
            score = report.score,
            urgency = %report.urgency,
            "Freshness report generated"
        );

        Ok(report)
    }
}
