use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid record id: {0}")]
    InvalidRecordId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
