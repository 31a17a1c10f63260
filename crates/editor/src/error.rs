use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("section {0} does not exist")]
    MissingSection(usize),

    #[error("section {idx} has no transcription options")]
    EmptyOptions { idx: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
