use memberscope_api::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Registry(#[from] ApiError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no class name entered")]
    NoInput,
}

pub type Result<T> = std::result::Result<T, SessionError>;
