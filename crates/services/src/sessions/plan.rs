use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::sync::Arc;

use quiz_core::model::{Category, Question, SessionSpec};

/// Picks the questions for one session out of the full catalog.
///
/// Category matching is strict string equality. Randomness is supplied by the
/// caller, so a seeded generator gives reproducible selections.
pub struct SessionSelector<'a> {
    catalog: &'a [Arc<Question>],
}

impl<'a> SessionSelector<'a> {
    #[must_use]
    pub fn new(catalog: &'a [Arc<Question>]) -> Self {
        Self { catalog }
    }

    /// Build the ordered question list for `spec`.
    ///
    /// - Questions from other categories are dropped.
    /// - When `spec.max_questions > 0` and more questions match, the matches are
    ///   shuffled uniformly and the first `max_questions` are kept.
    /// - Otherwise the matches are returned in catalog order.
    ///
    /// An empty result is valid and yields an immediately complete session.
    pub fn select<R: Rng + ?Sized>(&self, spec: &SessionSpec, rng: &mut R) -> Vec<Arc<Question>> {
        let mut selected: Vec<Arc<Question>> = self
            .catalog
            .iter()
            .filter(|q| q.category() == &spec.category)
            .cloned()
            .collect();
        let matched = selected.len();

        if let Some(cap) = spec.cap() {
            if matched > cap {
                selected.as_mut_slice().shuffle(rng);
                selected.truncate(cap);
            }
        }

        log::debug!(
            "selected {} of {} questions for category {}",
            selected.len(),
            matched,
            spec.category
        );
        selected
    }

    /// Distinct categories in the order they first appear in the catalog.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        categories(self.catalog)
    }
}

/// Distinct categories in the order they first appear in `catalog`.
#[must_use]
pub fn categories(catalog: &[Arc<Question>]) -> Vec<Category> {
    let mut seen = HashSet::new();
    catalog
        .iter()
        .map(|q| q.category())
        .filter(|c| seen.insert(*c))
        .cloned()
        .collect()
}
