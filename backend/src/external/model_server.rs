//! Model Server Client
//!
//! Client for a TensorFlow-Serving style REST predict endpoint hosting the
//! produce freshness model.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::config::ClassifierConfig;
use crate::error::{AppError, AppResult};
use crate::external::ImageClassifier;
use crate::models::Classification;
use crate::services::preprocess::ImageTensor;

/// Class labels in model output order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Parse a label file with one `<index> <label>` entry per line.
    ///
    /// The leading index token is optional; blank lines are skipped.
    pub fn parse(text: &str) -> Self {
        let labels = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| match line.split_once(char::is_whitespace) {
                Some((index, label)) if index.parse::<usize>().is_ok() => label.trim().to_string(),
                _ => line.to_string(),
            })
            .collect();

        Self { labels }
    }

    /// Load labels from disk
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!(
                "Failed to read labels from {}: {}",
                path.display(),
                e
            ))
        })?;

        let labels = Self::parse(&text);
        if labels.is_empty() {
            return Err(AppError::Configuration(format!(
                "Label file {} contains no labels",
                path.display()
            )));
        }
        Ok(labels)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Request body for the predict endpoint
#[derive(Debug, Serialize)]
pub struct PredictRequest<'a> {
    pub instances: [&'a ImageTensor; 1],
}

/// Response from the predict endpoint
#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    pub predictions: Vec<Vec<f32>>,
}

/// Index and value of the highest score; the first one wins on ties
pub fn top_prediction(scores: &[f32]) -> Option<(usize, f32)> {
    scores
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, p)| match best {
            _ if p.is_nan() => best,
            Some((_, bp)) if p <= bp => best,
            _ => Some((i, p)),
        })
}

/// Client for the freshness model server
#[derive(Clone)]
pub struct ModelServerClient {
    endpoint: String,
    api_key: Option<String>,
    labels: LabelSet,
    http_client: Client,
}

impl ModelServerClient {
    /// Create a new model server client
    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        labels: LabelSet,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            api_key,
            labels,
            http_client,
        })
    }

    /// Create a client from the classifier section of the configuration
    pub fn from_config(config: &ClassifierConfig) -> AppResult<Self> {
        let labels = LabelSet::from_file(&config.labels_path)?;
        tracing::info!(
            "Loaded {} labels from {}",
            labels.len(),
            config.labels_path
        );

        Self::new(
            config.endpoint.clone(),
            config.api_key.clone(),
            labels,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Send a tensor to the model server and return the raw class scores
    pub async fn predict_scores(&self, tensor: &ImageTensor) -> AppResult<Vec<f32>> {
        let mut request = self
            .http_client
            .post(&self.endpoint)
            .json(&PredictRequest { instances: [tensor] });

        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ClassifierError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ClassifierError(format!(
                "Model server returned {}: {}",
                status, body
            )));
        }

        let result: PredictResponse = response
            .json()
            .await
            .map_err(|e| AppError::ClassifierError(format!("Failed to parse response: {}", e)))?;

        result
            .predictions
            .into_iter()
            .next()
            .ok_or_else(|| AppError::ClassifierError("Model returned no predictions".to_string()))
    }

    /// Map raw class scores to the top label
    pub fn interpret(&self, scores: &[f32]) -> AppResult<Classification> {
        let (index, confidence) = top_prediction(scores)
            .ok_or_else(|| AppError::ClassifierError("Model returned empty scores".to_string()))?;

        let label = self.labels.get(index).ok_or_else(|| {
            AppError::ClassifierError(format!(
                "Predicted class {} has no label ({} labels loaded)",
                index,
                self.labels.len()
            ))
        })?;

        Ok(Classification {
            label: label.to_string(),
            confidence,
        })
    }
}

#[async_trait]
impl ImageClassifier for ModelServerClient {
    async fn classify(&self, tensor: &ImageTensor) -> AppResult<Classification> {
        let scores = self.predict_scores(tensor).await?;
        self.interpret(&scores)
    }
}
