use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("d must be a square-free integer: {d} is divisible by {factor}^2")]
    NotSquareFree { d: i64, factor: u64 },

    #[error("d = {d} does not define a quadratic field")]
    Degenerate { d: i64 },

    #[error("invalid viewport: {0}")]
    InvalidViewport(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown color: {0}")]
    UnknownColor(String),

    #[error("unknown line style: {0}")]
    UnknownLineStyle(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Json(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}
