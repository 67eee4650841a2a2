use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Can't serialize statistics summary: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StatsError>;
