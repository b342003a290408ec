use quiz_core::model::ResultSummary;

use super::service::QuizSession;
use crate::error::SessionError;

/// Reduces a finished session's answer log into the report payload.
pub struct ResultAggregator;

impl ResultAggregator {
    /// Summarize a completed session.
    ///
    /// The percentage rounds halves up and is `0` for a session with no
    /// questions. Breakdown items follow answer order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::PreconditionFailed` if the session still has
    /// unanswered questions, and `SessionError::Summary` if the log cannot be
    /// summarized.
    pub fn summarize(session: &QuizSession) -> Result<ResultSummary, SessionError> {
        let completed_at = session
            .completed_at()
            .filter(|_| session.is_complete())
            .ok_or(SessionError::PreconditionFailed {
                operation: "summarize",
            })?;

        let summary = ResultSummary::from_answers(
            session.category().clone(),
            session.total(),
            session.log(),
            session.started_at(),
            completed_at,
        )?;
        debug_assert_eq!(summary.score as usize, session.score());
        Ok(summary)
    }
}
