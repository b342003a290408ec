use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::Question;

use crate::repository::{QuestionRecord, QuestionRepository, StorageError};

mod bundled;

pub use bundled::BundledRepository;

/// Decode a JSON array of question records into validated questions.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the text is not a record array and
/// `StorageError::InvalidRecord` for the first record that fails validation.
pub fn decode_catalog(json: &str) -> Result<Vec<Arc<Question>>, StorageError> {
    let records: Vec<QuestionRecord> =
        serde_json::from_str(json).map_err(|e| StorageError::Serialization(e.to_string()))?;
    records_into_catalog(records)
}

pub(crate) fn records_into_catalog(
    records: Vec<QuestionRecord>,
) -> Result<Vec<Arc<Question>>, StorageError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .into_question()
                .map(Arc::new)
                .map_err(|source| StorageError::InvalidRecord { index, source })
        })
        .collect()
}

/// Catalog read from a JSON file on each fetch.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionRepository for JsonFileRepository {
    async fn fetch_catalog(&self) -> Result<Vec<Arc<Question>>, StorageError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    StorageError::NotFound(self.path.display().to_string())
                }
                _ => StorageError::Connection(e.to_string()),
            })?;
        let catalog = decode_catalog(&text)?;
        log::debug!(
            "loaded {} questions from {}",
            catalog.len(),
            self.path.display()
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_catalog_field_names() {
        let json = r#"[
            {"category": "React", "question": "Hook for state?", "options": ["useState", "useMemo"], "answer": 0}
        ]"#;
        let catalog = decode_catalog(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].category().as_str(), "React");
        assert_eq!(catalog[0].prompt(), "Hook for state?");
        assert_eq!(catalog[0].correct_option(), "useState");
    }

    #[test]
    fn reports_index_of_invalid_record() {
        let json = r#"[
            {"category": "A", "question": "ok", "options": ["x", "y"], "answer": 1},
            {"category": "A", "question": "bad", "options": ["x"], "answer": 0}
        ]"#;
        let err = decode_catalog(json).unwrap_err();
        assert!(matches!(err, StorageError::InvalidRecord { index: 1, .. }));
    }

    #[test]
    fn rejects_non_array_payload() {
        let err = decode_catalog(r#"{"category": "A"}"#).unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
