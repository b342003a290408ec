#![forbid(unsafe_code)]

pub mod json;
pub mod remote;
pub mod repository;

pub use repository::{QuestionRecord, QuestionRepository, QuestionSource, Storage, StorageError};
