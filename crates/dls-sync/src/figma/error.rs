use thiserror::Error;

/// Errors from the Figma REST variables API.
#[derive(Debug, Error)]
pub enum FigmaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid API base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
