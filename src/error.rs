use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("ticket API responded with {status}: {body}")]
    Http { status: u16, body: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("unexpected response from ticket API: {0}")]
    Decode(String),
    #[error("ticket {0} not found")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
