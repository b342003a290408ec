use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::Question;
use reqwest::Client;

use crate::json::records_into_catalog;
use crate::repository::{QuestionRecord, QuestionRepository, StorageError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct HttpSourceConfig {
    pub url: String,
    pub timeout: Duration,
}

impl HttpSourceConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Catalog fetched with a single GET returning a JSON array of records.
///
/// Failures are reported as-is; retry policy belongs to the caller.
#[derive(Clone)]
pub struct HttpQuestionRepository {
    client: Client,
    config: HttpSourceConfig,
}

impl HttpQuestionRepository {
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the HTTP client cannot be built.
    pub fn new(config: HttpSourceConfig) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &HttpSourceConfig {
        &self.config
    }
}

#[async_trait]
impl QuestionRepository for HttpQuestionRepository {
    async fn fetch_catalog(&self) -> Result<Vec<Arc<Question>>, StorageError> {
        let response = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(self.config.url.clone()));
        }
        if !status.is_success() {
            return Err(StorageError::HttpStatus(status.as_u16()));
        }

        let records: Vec<QuestionRecord> = response
            .json()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let catalog = records_into_catalog(records)?;
        log::debug!(
            "fetched {} questions from {}",
            catalog.len(),
            self.config.url
        );
        Ok(catalog)
    }
}
