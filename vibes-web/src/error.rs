//! Erros do backend web

use thiserror::Error;
use vibes_core::BackendError;

pub type WebResult<T> = Result<T, WebError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WebError {
    #[error("No browser window is available")]
    NoWindow,

    #[error("navigator.vibrate is not available in this browser")]
    VibrationApiMissing,

    #[error("The browser rejected the vibration request")]
    Rejected,

    /// A Vibration API não repete padrões
    #[error("Repeating patterns are not supported by the Web Vibration API")]
    RepeatUnsupported,

    #[error("{0} is not supported by the Web Vibration API")]
    Unsupported(&'static str),
}

impl From<WebError> for BackendError {
    fn from(error: WebError) -> Self {
        match error {
            WebError::NoWindow | WebError::VibrationApiMissing => BackendError::NoVibrator,
            WebError::Unsupported(what) => BackendError::Unsupported(what.to_string()),
            other => BackendError::CallFailed(other.to_string()),
        }
    }
}
