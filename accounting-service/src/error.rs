use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccountingError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

pub type AccountingResult<T> = Result<T, AccountingError>;
