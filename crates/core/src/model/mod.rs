mod category;
mod question;
mod session;
mod summary;

pub use category::Category;
pub use question::{Question, QuestionError};
pub use session::{AnsweredQuestion, SessionSpec};
pub use summary::{BreakdownItem, ResultSummary, SummaryError, WrongAnswer, percentage};
