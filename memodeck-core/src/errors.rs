use crate::CardId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("card not found: {0}")]
    NotFound(CardId),
    #[error("invalid input: {0}")]
    Invalid(&'static str),
    #[error("duplicate question: {0:?}")]
    DuplicateQuestion(String),
    #[error("storage error: {0}")]
    Storage(&'static str),
}
