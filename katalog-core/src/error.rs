use katalog_walker::WalkError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    /// The run finished without crashing but resolved zero top-level
    /// categories. Reported separately so callers never mistake an empty
    /// output file for a good one.
    #[error("nothing extracted: no top-level categories resolved")]
    NothingExtracted,

    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error("unknown site profile '{0}'")]
    UnknownProfile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
