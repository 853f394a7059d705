use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Input too long: {len} bytes exceeds limit of {limit}")]
    InputTooLong { len: usize, limit: usize },

    #[error("Invalid local instant: {0}")]
    InvalidInstant(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::InvalidInput(format!("text is not valid UTF-8: {err}"))
    }
}
