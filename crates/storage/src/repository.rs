use async_trait::async_trait;
use quiz_core::model::{Question, QuestionError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::json::{BundledRepository, JsonFileRepository};
use crate::remote::{HttpQuestionRepository, HttpSourceConfig};

/// Errors surfaced by question sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("question source responded with status {0}")]
    HttpStatus(u16),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid question record #{index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: QuestionError,
    },
}

/// Wire shape of a question, as found in bundled and remote catalogs.
///
/// Field names follow the catalog JSON (`question`, `answer`) rather than the
/// domain names, so the domain layer never sees serialization concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub category: String,
    pub question: String,
    pub options: Vec<String>,
    pub answer: usize,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            category: question.category().as_str().to_owned(),
            question: question.prompt().to_owned(),
            options: question.options().to_vec(),
            answer: question.correct_index(),
        }
    }

    /// Convert the record back into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the record fails validation.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        Question::new(self.category, self.question, self.options, self.answer)
    }
}

/// Supplies the full question catalog.
///
/// Called once per session start; implementations do not retry.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Load every question the source knows about, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source cannot be read or decoded.
    async fn fetch_catalog(&self) -> Result<Vec<Arc<Question>>, StorageError>;
}

/// Fixed in-memory catalog for tests and embedding.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Vec<Arc<Question>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new(questions: impl IntoIterator<Item = Question>) -> Self {
        Self {
            questions: Arc::new(questions.into_iter().map(Arc::new).collect()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn fetch_catalog(&self) -> Result<Vec<Arc<Question>>, StorageError> {
        Ok(self.questions.as_ref().clone())
    }
}

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSource {
    Bundled,
    File(PathBuf),
    Http(String),
}

impl QuestionSource {
    /// Interpret a user-supplied source string.
    ///
    /// `bundled` (or an empty string) selects the compiled-in dataset, an
    /// `http://` or `https://` prefix selects a remote endpoint, and anything
    /// else is treated as a path to a JSON file.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("bundled") {
            Self::Bundled
        } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Http(trimmed.to_owned())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

/// Question repository behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(questions: impl IntoIterator<Item = Question>) -> Self {
        let repo: Arc<dyn QuestionRepository> = Arc::new(InMemoryRepository::new(questions));
        Self { questions: repo }
    }

    #[must_use]
    pub fn bundled() -> Self {
        let repo: Arc<dyn QuestionRepository> = Arc::new(BundledRepository::new());
        Self { questions: repo }
    }

    /// Build a `Storage` for the given source.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the HTTP client cannot be built.
    pub fn open(source: &QuestionSource) -> Result<Self, StorageError> {
        let repo: Arc<dyn QuestionRepository> = match source {
            QuestionSource::Bundled => Arc::new(BundledRepository::new()),
            QuestionSource::File(path) => Arc::new(JsonFileRepository::new(path.clone())),
            QuestionSource::Http(url) => Arc::new(HttpQuestionRepository::new(
                HttpSourceConfig::new(url.clone()),
            )?),
        };
        Ok(Self { questions: repo })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(category: &str, prompt: &str) -> Question {
        Question::new(category, prompt, vec!["a".into(), "b".into()], 0).unwrap()
    }

    #[tokio::test]
    async fn in_memory_preserves_catalog_order() {
        let repo = InMemoryRepository::new(vec![question("A", "first"), question("B", "second")]);
        let catalog = repo.fetch_catalog().await.unwrap();
        let prompts: Vec<_> = catalog.iter().map(|q| q.prompt()).collect();
        assert_eq!(prompts, vec!["first", "second"]);
    }

    #[test]
    fn record_validation_rejects_bad_answer_index() {
        let record = QuestionRecord {
            category: "A".into(),
            question: "Q".into(),
            options: vec!["x".into(), "y".into()],
            answer: 2,
        };
        assert!(record.into_question().is_err());
    }

    #[test]
    fn record_mirrors_question() {
        let q = question("A", "Q");
        let back = QuestionRecord::from_question(&q).into_question().unwrap();
        assert_eq!(back, q);
    }

    #[test]
    fn source_parsing() {
        assert_eq!(QuestionSource::parse("bundled"), QuestionSource::Bundled);
        assert_eq!(QuestionSource::parse(""), QuestionSource::Bundled);
        assert_eq!(
            QuestionSource::parse("https://example.com/quiz.json"),
            QuestionSource::Http("https://example.com/quiz.json".into())
        );
        assert_eq!(
            QuestionSource::parse("data/quiz.json"),
            QuestionSource::File(PathBuf::from("data/quiz.json"))
        );
    }

    #[test]
    fn repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InMemoryRepository>();
        assert_send_sync::<Storage>();
    }
}
