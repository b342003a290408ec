use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::Question;

use super::decode_catalog;
use crate::repository::{QuestionRepository, StorageError};

const BUNDLED_CATALOG: &str = include_str!("../../data/quiz.json");

/// Catalog compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledRepository;

impl BundledRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl QuestionRepository for BundledRepository {
    async fn fetch_catalog(&self) -> Result<Vec<Arc<Question>>, StorageError> {
        let catalog = decode_catalog(BUNDLED_CATALOG)?;
        log::debug!("loaded {} bundled questions", catalog.len());
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_is_valid() {
        let catalog = decode_catalog(BUNDLED_CATALOG).unwrap();
        assert!(!catalog.is_empty());
    }
}
