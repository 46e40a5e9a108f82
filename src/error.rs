use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied input the API cannot accept.
    Validation,
    /// Transport failure or a non-success HTTP status.
    Request,
    /// The response (or a value inside it) was not the expected JSON.
    Decode,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("request to {url} failed with status code {status}")]
    Status { status: StatusCode, url: String },

    /// The API answered, but with an `{"error": {...}}` body.
    #[error("api error {code}: {info}")]
    Api { code: String, info: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed json: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("empty value token")]
    EmptyValue,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Status { .. } | Error::Api { .. } | Error::Transport(_) => ErrorKind::Request,
            Error::Decode(_) | Error::EmptyValue => ErrorKind::Decode,
        }
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}
