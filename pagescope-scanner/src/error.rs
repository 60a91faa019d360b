use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Could not connect: {0}")]
    Connect(String),

    #[error("HTTP status {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Coarse grouping of [`AnalyzeError`] used by callers that only need to know
/// whether the page was unreachable, unreadable, or never requested at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidInput,
    Fetch,
    Parse,
    Internal,
}

impl AnalyzeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AnalyzeError::InvalidUrl(_) => FailureKind::InvalidInput,
            AnalyzeError::Timeout(_)
            | AnalyzeError::Connect(_)
            | AnalyzeError::HttpStatus { .. }
            | AnalyzeError::HttpError(_) => FailureKind::Fetch,
            AnalyzeError::ParseError(_) => FailureKind::Parse,
            AnalyzeError::Other(_) => FailureKind::Internal,
        }
    }

    /// Sort a transport error from the initial page fetch into the most
    /// specific variant available.
    pub fn from_fetch(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AnalyzeError::Timeout(format!("{}: {}", url, err))
        } else if err.is_connect() {
            AnalyzeError::Connect(format!("{}: {}", url, err))
        } else if err.is_builder() {
            AnalyzeError::InvalidUrl(format!("{}: {}", url, err))
        } else if let Some(status) = err.status() {
            AnalyzeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }
        } else {
            AnalyzeError::HttpError(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;
