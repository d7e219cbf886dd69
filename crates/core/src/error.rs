/// The three ways a fetch against the admin API can fail.
///
/// All of them are handled the same way by the screen controllers (log, fall back, keep
/// rendering); the distinction is kept for logging and for tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchErrorKind {
    NetworkUnavailable,
    NonSuccessStatus,
    MalformedResponseBody,
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FetchErrorKind::NetworkUnavailable => "network unavailable",
            FetchErrorKind::NonSuccessStatus => "non-success status",
            FetchErrorKind::MalformedResponseBody => "malformed response body",
        };
        f.write_str(label)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),

    #[error("request to {url} failed: {source}")]
    NetworkUnavailable {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    NonSuccessStatus { url: String, status: u16 },
    #[error("failed to read response body from {url}: {source}")]
    BodyRead {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("malformed response body from {url}: {source}")]
    MalformedResponseBody {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl AdminError {
    /// Classify this error as one of the fetch failure kinds.
    ///
    /// Returns `None` for errors that never come out of a fetch (configuration problems).
    pub fn fetch_kind(&self) -> Option<FetchErrorKind> {
        match self {
            AdminError::NetworkUnavailable { .. } | AdminError::BodyRead { .. } => {
                Some(FetchErrorKind::NetworkUnavailable)
            }
            AdminError::NonSuccessStatus { .. } => Some(FetchErrorKind::NonSuccessStatus),
            AdminError::MalformedResponseBody { .. } => Some(FetchErrorKind::MalformedResponseBody),
            AdminError::InvalidConfig(_) | AdminError::ClientBuild(_) => None,
        }
    }
}

pub type AdminResult<T> = std::result::Result<T, AdminError>;
