mod aggregate;
mod plan;
mod progress;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use aggregate::ResultAggregator;
pub use plan::{SessionSelector, categories};
pub use progress::SessionProgress;
pub use service::QuizSession;
pub use workflow::{QuizLoopService, SessionAnswerResult};
