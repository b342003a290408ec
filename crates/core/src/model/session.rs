use std::sync::Arc;

use crate::model::{Category, Question};

/// Parameters for building one quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSpec {
    pub category: Category,
    /// Upper bound on the number of questions; `0` means no cap.
    pub max_questions: usize,
}

impl SessionSpec {
    #[must_use]
    pub fn new(category: impl Into<Category>) -> Self {
        Self {
            category: category.into(),
            max_questions: 0,
        }
    }

    #[must_use]
    pub fn with_max_questions(mut self, max_questions: usize) -> Self {
        self.max_questions = max_questions;
        self
    }

    /// Returns the cap when one is set.
    #[must_use]
    pub fn cap(&self) -> Option<usize> {
        (self.max_questions > 0).then_some(self.max_questions)
    }
}

/// Record of a single submitted answer.
///
/// Holds indices only; resolving them into option text happens when the
/// result summary is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsweredQuestion {
    question: Arc<Question>,
    chosen_index: usize,
    is_correct: bool,
}

impl AnsweredQuestion {
    /// Grades `chosen_index` against the question's correct option.
    #[must_use]
    pub fn grade(question: Arc<Question>, chosen_index: usize) -> Self {
        let is_correct = question.is_correct(chosen_index);
        Self {
            question,
            chosen_index,
            is_correct,
        }
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn chosen_index(&self) -> usize {
        self.chosen_index
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}
