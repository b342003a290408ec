use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{AnsweredQuestion, Category};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("answered {answered} of {total} questions")]
    Incomplete { answered: usize, total: usize },

    #[error("too many questions for a single session: {len}")]
    TooManyQuestions { len: usize },
}

/// Per-question line of the final report, with indices resolved to option text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownItem {
    pub prompt: String,
    pub correct_answer: String,
    pub chosen_answer: String,
    pub is_correct: bool,
}

impl BreakdownItem {
    fn from_answer(answer: &AnsweredQuestion) -> Self {
        let question = answer.question();
        Self {
            prompt: question.prompt().to_owned(),
            correct_answer: question.correct_option().to_owned(),
            chosen_answer: question
                .option(answer.chosen_index())
                .unwrap_or_default()
                .to_owned(),
            is_correct: answer.is_correct(),
        }
    }
}

/// Entry of the wrong-answer note: what was asked and what the answer was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrongAnswer {
    pub prompt: String,
    pub correct_answer: String,
}

/// Scored report for a completed quiz session.
///
/// Plain data so it can cross a navigation boundary or be stored by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub category: Category,
    pub score: u32,
    pub total: u32,
    pub percentage: u8,
    pub breakdown: Vec<BreakdownItem>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl ResultSummary {
    /// Build a summary from the full answer log of a session.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    /// Returns `SummaryError::Incomplete` if the log does not cover every question.
    /// Returns `SummaryError::TooManyQuestions` if the total cannot fit in `u32`.
    pub fn from_answers(
        category: Category,
        total: usize,
        answers: &[AnsweredQuestion],
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SummaryError> {
        if completed_at < started_at {
            return Err(SummaryError::InvalidTimeRange);
        }
        if answers.len() != total {
            return Err(SummaryError::Incomplete {
                answered: answers.len(),
                total,
            });
        }

        let total = u32::try_from(total).map_err(|_| SummaryError::TooManyQuestions { len: total })?;
        let correct = answers.iter().filter(|answer| answer.is_correct()).count();
        let score = u32::try_from(correct).map_err(|_| SummaryError::TooManyQuestions { len: correct })?;
        let breakdown = answers.iter().map(BreakdownItem::from_answer).collect();

        Ok(Self {
            category,
            score,
            total,
            percentage: percentage(score, total),
            breakdown,
            started_at,
            completed_at,
        })
    }

    /// Incorrectly answered questions, in answer order.
    #[must_use]
    pub fn wrong_answers(&self) -> Vec<WrongAnswer> {
        self.breakdown
            .iter()
            .filter(|item| !item.is_correct)
            .map(|item| WrongAnswer {
                prompt: item.prompt.clone(),
                correct_answer: item.correct_answer.clone(),
            })
            .collect()
    }
}

/// Share of correct answers as a whole percent, rounding halves up.
///
/// An empty session scores `0` rather than dividing by zero.
#[must_use]
pub fn percentage(score: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let score = u64::from(score.min(total));
    let total = u64::from(total);
    let rounded = (200 * score + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::Question;
    use crate::time::fixed_now;

    fn answered(correct: usize, chosen: usize) -> AnsweredQuestion {
        let question = Question::new(
            "A",
            format!("Q{correct}"),
            vec!["zero".into(), "one".into(), "two".into()],
            correct,
        )
        .unwrap();
        AnsweredQuestion::grade(Arc::new(question), chosen)
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(3, 8), 38);
        assert_eq!(percentage(1, 200), 1);
        assert_eq!(percentage(5, 5), 100);
    }

    #[test]
    fn percentage_of_empty_session_is_zero() {
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn summary_resolves_option_text() {
        let now = fixed_now();
        let answers = vec![answered(0, 0), answered(1, 2)];
        let summary =
            ResultSummary::from_answers(Category::new("A"), 2, &answers, now, now).unwrap();

        assert_eq!(summary.score, 1);
        assert_eq!(summary.percentage, 50);
        assert_eq!(summary.breakdown[1].correct_answer, "one");
        assert_eq!(summary.breakdown[1].chosen_answer, "two");
        assert!(!summary.breakdown[1].is_correct);
        assert_eq!(
            summary.wrong_answers(),
            vec![WrongAnswer {
                prompt: "Q1".into(),
                correct_answer: "one".into(),
            }]
        );
    }

    #[test]
    fn summary_requires_full_log() {
        let now = fixed_now();
        let err = ResultSummary::from_answers(Category::new("A"), 3, &[answered(0, 0)], now, now)
            .unwrap_err();
        assert_eq!(
            err,
            SummaryError::Incomplete {
                answered: 1,
                total: 3
            }
        );
    }

    #[test]
    fn summary_rejects_inverted_time_range() {
        let now = fixed_now();
        let earlier = now - chrono::Duration::seconds(1);
        let err =
            ResultSummary::from_answers(Category::new("A"), 0, &[], now, earlier).unwrap_err();
        assert_eq!(err, SummaryError::InvalidTimeRange);
    }

    #[test]
    fn summary_round_trips_through_json() {
        let now = fixed_now();
        let summary =
            ResultSummary::from_answers(Category::new("A"), 1, &[answered(2, 2)], now, now)
                .unwrap();
        let json = serde_json::to_string(&summary).unwrap();
        let back: ResultSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }
}
