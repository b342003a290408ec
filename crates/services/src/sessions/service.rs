use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{AnsweredQuestion, Category, Question};

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One attempt at answering an ordered list of questions from a single category.
///
/// The session is `Active` while `position < questions.len()` and `Complete`
/// once every question has an answer. The only mutation is
/// [`QuizSession::submit_answer`], which either applies fully or not at all.
///
/// Invariants:
/// - `position <= questions.len()`
/// - `log.len() == position`
/// - `score` equals the number of correct entries in `log`
pub struct QuizSession {
    category: Category,
    questions: Vec<Arc<Question>>,
    position: usize,
    score: usize,
    log: Vec<AnsweredQuestion>,
    clock: Clock,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create a session over `questions`.
    ///
    /// An empty question list is a legal session that starts out complete.
    #[must_use]
    pub fn new(category: Category, questions: Vec<Arc<Question>>, clock: Clock) -> Self {
        let started_at = clock.now();
        let completed_at = questions.is_empty().then_some(started_at);
        Self {
            category,
            questions,
            position: 0,
            score: 0,
            log: Vec::new(),
            clock,
            started_at,
            completed_at,
        }
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub fn questions(&self) -> &[Arc<Question>] {
        &self.questions
    }

    /// Index of the next question to answer.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    /// Answers submitted so far, in order.
    #[must_use]
    pub fn log(&self) -> &[AnsweredQuestion] {
        &self.log
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.questions.len().saturating_sub(self.position)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.position == self.questions.len()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.total(),
            answered: self.log.len(),
            remaining: self.remaining(),
            score: self.score,
            is_complete: self.is_complete(),
        }
    }

    /// The question awaiting an answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::PreconditionFailed` once the session is complete.
    pub fn current_question(&self) -> Result<&Arc<Question>, SessionError> {
        self.questions
            .get(self.position)
            .ok_or(SessionError::PreconditionFailed {
                operation: "current_question",
            })
    }

    /// Grade `chosen_index` against the current question, record it and advance.
    ///
    /// Returns the new log entry so the caller can show immediate feedback.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SessionAlreadyComplete` if nothing is left to answer
    /// and `SessionError::InvalidAnswerIndex` if `chosen_index` is not an option
    /// of the current question. The session is unchanged on error.
    pub fn submit_answer(&mut self, chosen_index: usize) -> Result<&AnsweredQuestion, SessionError> {
        let question = self
            .questions
            .get(self.position)
            .ok_or(SessionError::SessionAlreadyComplete)?;
        let options = question.options().len();
        if chosen_index >= options {
            return Err(SessionError::InvalidAnswerIndex {
                index: chosen_index,
                options,
            });
        }

        let answered = AnsweredQuestion::grade(Arc::clone(question), chosen_index);
        if answered.is_correct() {
            self.score += 1;
        }
        self.log.push(answered);
        self.position += 1;

        if self.is_complete() {
            self.completed_at = Some(self.clock.now());
        }

        self.log.last().ok_or(SessionError::SessionAlreadyComplete)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("category", &self.category)
            .field("questions_len", &self.questions.len())
            .field("position", &self.position)
            .field("score", &self.score)
            .field("log_len", &self.log.len())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::{fixed_clock, fixed_now};

    fn question(prompt: &str, correct: usize) -> Arc<Question> {
        Arc::new(
            Question::new(
                "A",
                prompt,
                vec!["zero".into(), "one".into(), "two".into()],
                correct,
            )
            .unwrap(),
        )
    }

    fn three_question_session() -> QuizSession {
        QuizSession::new(
            Category::new("A"),
            vec![question("q1", 0), question("q2", 1), question("q3", 2)],
            fixed_clock(),
        )
    }

    fn assert_invariants(session: &QuizSession) {
        assert!(session.position() <= session.total());
        assert_eq!(session.log().len(), session.position());
        assert_eq!(
            session.score(),
            session.log().iter().filter(|a| a.is_correct()).count()
        );
        assert_eq!(session.is_complete(), session.position() == session.total());
    }

    #[test]
    fn session_advances_and_completes() {
        let mut session = three_question_session();
        assert!(!session.is_complete());
        assert_eq!(session.current_question().unwrap().prompt(), "q1");
        assert_invariants(&session);

        for (chosen, expected) in [(0, true), (0, false), (2, true)] {
            let answered = session.submit_answer(chosen).unwrap();
            assert_eq!(answered.is_correct(), expected);
            assert_eq!(answered.chosen_index(), chosen);
            assert_invariants(&session);
        }

        assert!(session.is_complete());
        assert_eq!(session.score(), 2);
        assert_eq!(session.completed_at(), Some(fixed_now()));
        let flags: Vec<_> = session.log().iter().map(AnsweredQuestion::is_correct).collect();
        assert_eq!(flags, vec![true, false, true]);
    }

    #[test]
    fn empty_session_starts_complete() {
        let session = QuizSession::new(Category::new("none"), Vec::new(), fixed_clock());
        assert!(session.is_complete());
        assert_eq!(session.score(), 0);
        assert_eq!(session.completed_at(), Some(fixed_now()));
        assert!(matches!(
            session.current_question(),
            Err(SessionError::PreconditionFailed { .. })
        ));
    }

    #[test]
    fn out_of_range_answer_leaves_state_untouched() {
        let mut session = three_question_session();
        session.submit_answer(0).unwrap();

        let err = session.submit_answer(3).unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidAnswerIndex {
                index: 3,
                options: 3
            }
        ));
        assert_eq!(session.position(), 1);
        assert_eq!(session.score(), 1);
        assert_eq!(session.log().len(), 1);
        assert_eq!(session.current_question().unwrap().prompt(), "q2");
        assert_invariants(&session);
    }

    #[test]
    fn submitting_after_completion_fails_without_mutation() {
        let mut session = three_question_session();
        for chosen in [0, 1, 2] {
            session.submit_answer(chosen).unwrap();
        }
        let before = session.log().to_vec();

        let err = session.submit_answer(0).unwrap_err();
        assert!(matches!(err, SessionError::SessionAlreadyComplete));
        assert_eq!(session.position(), 3);
        assert_eq!(session.score(), 3);
        assert_eq!(session.log(), before.as_slice());
        assert!(matches!(
            session.current_question(),
            Err(SessionError::PreconditionFailed { .. })
        ));
    }

    #[test]
    fn progress_reflects_position() {
        let mut session = three_question_session();
        session.submit_answer(1).unwrap();
        let progress = session.progress();
        assert_eq!(progress.total, 3);
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.remaining, 2);
        assert_eq!(progress.score, 0);
        assert!(!progress.is_complete);
    }
}
