use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to authenticate: {0}")]
    Auth(String),
    #[error("no {kind} named '{name}' found")]
    NotFound { kind: &'static str, name: String },
    #[error("{count} folders named '{name}' found")]
    Ambiguous { name: String, count: usize },
    #[error("too many files named '{name}' found")]
    TooManyResults { name: String },
    #[error("failed to download file {id}: {reason}")]
    Download { id: String, reason: String },
    #[error("GET {url} returned status code {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub(crate) fn auth(err: impl std::fmt::Display) -> Self {
        Self::Auth(err.to_string())
    }
}
