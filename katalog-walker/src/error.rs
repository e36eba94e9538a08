use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("every selector for {target} came up empty")]
    SelectorExhausted { target: &'static str },

    #[error("candidate extraction failed: {0}")]
    CandidateFailed(String),

    #[error("navigation to {url} failed: {reason}")]
    NavigationFailed { url: String, reason: String },

    #[error("session is unusable: {0}")]
    SessionFatal(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("malformed selector '{selector}': {reason}")]
    BadSelector { selector: String, reason: String },
}

impl WalkError {
    /// Only a dead session aborts a run. Selector- and candidate-level
    /// failures are recovered where they happen.
    pub fn is_fatal(&self) -> bool {
        matches!(self, WalkError::SessionFatal(_))
    }
}

pub type Result<T> = std::result::Result<T, WalkError>;
