use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown market segment: {0}")]
    UnknownSegment(String),

    #[error("Unknown timeframe: {0}")]
    UnknownTimeframe(String),
}

pub type Result<T> = std::result::Result<T, Error>;
