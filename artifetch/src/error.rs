use std::fmt;
use thiserror::Error;

/// Step of a run, in execution order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    Authenticate,
    FindFolder,
    ListCandidates,
    SelectLatest,
    Download,
    Extract,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Self::Authenticate,
        Self::FindFolder,
        Self::ListCandidates,
        Self::SelectLatest,
        Self::Download,
        Self::Extract,
    ];

    /// One-based position in [`Stage::ALL`].
    pub fn number(self) -> usize {
        self as usize + 1
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let descr = match self {
            Self::Authenticate => "init google drive service",
            Self::FindFolder => "find folder",
            Self::ListCandidates => "list files",
            Self::SelectLatest => "select latest artifact",
            Self::Download => "download file",
            Self::Extract => "unzip artifact",
        };
        f.write_str(descr)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error("failed to {stage}")]
    Catalog {
        stage: Stage,
        #[source]
        source: gdrive::Error,
    },
    #[error("failed to unzip artifact")]
    Extract(#[source] unpack::Error),
}

impl Error {
    pub(crate) fn catalog(stage: Stage) -> impl FnOnce(gdrive::Error) -> Self {
        move |source| Self::Catalog { stage, source }
    }

    /// Stage that failed, `None` for invalid options.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::InvalidOptions(_) => None,
            Self::Catalog { stage, .. } => Some(*stage),
            Self::Extract(_) => Some(Stage::Extract),
        }
    }
}
