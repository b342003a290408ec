use rand::Rng;
use std::sync::Arc;

use quiz_core::model::{AnsweredQuestion, Category, Question, ResultSummary, SessionSpec};
use storage::repository::QuestionRepository;

use super::aggregate::ResultAggregator;
use super::plan::{SessionSelector, categories};
use super::progress::SessionProgress;
use super::service::QuizSession;
use crate::Clock;
use crate::error::SessionError;

/// Result of answering a single question in a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionAnswerResult {
    pub answer: AnsweredQuestion,
    pub is_complete: bool,
    pub progress: SessionProgress,
}

/// Orchestrates catalog loading, session start, answering and hand-off to the
/// result aggregator.
///
/// The catalog is fetched once per call to `load_catalog`/`start_session`; a
/// failed fetch is returned to the caller without retrying.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    questions: Arc<dyn QuestionRepository>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, questions: Arc<dyn QuestionRepository>) -> Self {
        Self { clock, questions }
    }

    /// Fetch the full catalog from the repository.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Catalog` if the repository fails.
    pub async fn load_catalog(&self) -> Result<Vec<Arc<Question>>, SessionError> {
        let catalog = self.questions.fetch_catalog().await?;
        log::debug!("catalog loaded with {} questions", catalog.len());
        Ok(catalog)
    }

    /// Categories available in the catalog, in first-seen order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Catalog` if the repository fails.
    pub async fn categories(&self) -> Result<Vec<Category>, SessionError> {
        let catalog = self.load_catalog().await?;
        Ok(categories(&catalog))
    }

    /// Load the catalog and start a session, shuffling with the thread RNG.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Catalog` if the repository fails.
    pub async fn start_session(&self, spec: &SessionSpec) -> Result<QuizSession, SessionError> {
        let catalog = self.load_catalog().await?;
        Ok(self.session_from_catalog(&catalog, spec, &mut rand::rng()))
    }

    /// Load the catalog and start a session using the given random source.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Catalog` if the repository fails.
    pub async fn start_session_with_rng<R: Rng + ?Sized>(
        &self,
        spec: &SessionSpec,
        rng: &mut R,
    ) -> Result<QuizSession, SessionError> {
        let catalog = self.load_catalog().await?;
        Ok(self.session_from_catalog(&catalog, spec, rng))
    }

    /// Start a session from an already loaded catalog.
    pub fn session_from_catalog<R: Rng + ?Sized>(
        &self,
        catalog: &[Arc<Question>],
        spec: &SessionSpec,
        rng: &mut R,
    ) -> QuizSession {
        let questions = SessionSelector::new(catalog).select(spec, rng);
        if questions.is_empty() {
            log::info!("no questions match category {}", spec.category);
        } else {
            log::info!(
                "starting session for {} with {} questions",
                spec.category,
                questions.len()
            );
        }
        QuizSession::new(spec.category.clone(), questions, self.clock)
    }

    /// Answer the current question of `session`.
    ///
    /// # Errors
    ///
    /// Propagates `SessionError::InvalidAnswerIndex` and
    /// `SessionError::SessionAlreadyComplete` from the session unchanged.
    pub fn answer_current(
        &self,
        session: &mut QuizSession,
        chosen_index: usize,
    ) -> Result<SessionAnswerResult, SessionError> {
        let answer = match session.submit_answer(chosen_index) {
            Ok(answer) => answer.clone(),
            Err(err) => {
                log::warn!("rejected answer {chosen_index}: {err}");
                return Err(err);
            }
        };

        if session.is_complete() {
            log::info!(
                "session for {} complete: {}/{}",
                session.category(),
                session.score(),
                session.total()
            );
        }

        Ok(SessionAnswerResult {
            answer,
            is_complete: session.is_complete(),
            progress: session.progress(),
        })
    }

    /// Hand a completed session over to the aggregator.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::PreconditionFailed` if questions remain unanswered.
    pub fn finish(&self, session: QuizSession) -> Result<ResultSummary, SessionError> {
        ResultAggregator::summarize(&session)
    }
}
