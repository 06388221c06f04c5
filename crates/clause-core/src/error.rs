use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),

    #[error("Risk score out of range: {0}")]
    RiskScoreOutOfRange(i64),
}

pub type Result<T> = std::result::Result<T, Error>;
