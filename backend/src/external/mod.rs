//! External API integrations

pub mod model_server;

pub use model_server::{LabelSet, ModelServerClient};

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::Classification;
use crate::services::preprocess::ImageTensor;

/// Black-box image classifier returning the top label and its probability
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    async fn classify(&self, tensor: &ImageTensor) -> AppResult<Classification>;
}
