//! HTTP handlers for direct advisory lookups

use axum::Json;
use axum_extra::extract::WithRejection;

use crate::error::{AppError, AppResult};
use crate::models::{AdviseInput, CategoryCatalog, FreshnessReport};
use shared::{advise, validate_confidence_percent};

/// Score a classification produced on the client
pub async fn advise_classification(
    WithRejection(Json(input), _): WithRejection<Json<AdviseInput>, AppError>,
) -> AppResult<Json<FreshnessReport>> {
    let confidence = validate_confidence_percent(input.confidence)
        .map_err(|msg| AppError::ValidationError(msg.to_string()))?;
    Ok(Json(advise(&input.category, confidence)))
}

/// List the category knowledge table
pub async fn list_categories() -> Json<CategoryCatalog> {
    Json(CategoryCatalog::current())
}
