use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Request to e-klase failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Authentication failed with status code {status}: {body}")]
    AuthenticationFailed { status: u16, body: String },

    #[error("`{operation}` requires a {required} session, but the session is {current}")]
    InvalidState {
        operation: &'static str,
        required: &'static str,
        current: &'static str,
    },

    #[error("Profile index {index} is out of range ({available} profiles available)")]
    ProfileIndexOutOfRange { index: usize, available: usize },

    #[error("{url} answered with unexpected status code {status}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Could not find required element on the page: {0}")]
    ElementNotFound(String),

    #[error("Unexpected text format: {0}")]
    FormatError(String),

    #[error("Invalid client configuration: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, ScraperError>;
