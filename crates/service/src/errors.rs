use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("no record with id {0}")]
    NotFound(i64),
}
