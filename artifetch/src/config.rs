use crate::Error;
use clap::Parser;
use std::path::PathBuf;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "ARTIFETCH_LOG";

pub const DEFAULT_DESTINATION: &str = "output";

/// Downloads the latest artifact of an application version from google drive
/// and unzips it.
#[derive(Parser, Debug)]
#[clap(author, about, long_about = None)]
pub struct Args {
    /// Name of the application (mandatory)
    #[clap(short = 'a', long, value_name = "NAME")]
    pub application: Option<String>,
    /// Path and name of the file with google credentials (mandatory)
    #[clap(short = 'c', long, value_name = "FILE")]
    pub credentials: Option<PathBuf>,
    /// Version of the application (mandatory)
    #[clap(short = 'v', long, value_name = "VERSION")]
    pub app_version: Option<String>,
    /// Path to the destination
    #[clap(short = 'd', long, value_name = "DIR", default_value = DEFAULT_DESTINATION)]
    pub destination: PathBuf,
}

impl Args {
    pub fn into_options(self) -> Result<Options, Error> {
        let credentials = self
            .credentials
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or_else(|| Error::InvalidOptions("missing credentials file".into()))?;
        let opts = Options {
            destination: self.destination,
            application: self.application.unwrap_or_default(),
            version: self.app_version.unwrap_or_default(),
            credentials,
        };
        opts.validate()?;
        Ok(opts)
    }
}

/// Validated settings of a run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
    pub destination: PathBuf,
    pub application: String,
    pub version: String,
    pub credentials: PathBuf,
}

impl Options {
    pub fn new(
        application: impl Into<String>,
        version: impl Into<String>,
        credentials: impl Into<PathBuf>,
    ) -> Self {
        Self {
            destination: DEFAULT_DESTINATION.into(),
            application: application.into(),
            version: version.into(),
            credentials: credentials.into(),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.application.is_empty() {
            return Err(Error::InvalidOptions("missing application name".into()));
        }
        if self.version.is_empty() {
            return Err(Error::InvalidOptions("missing version".into()));
        }
        if self.destination.as_os_str().is_empty() {
            return Err(Error::InvalidOptions("missing destination".into()));
        }
        Ok(())
    }

    /// Name of the archive holding a build of `version`.
    pub fn artifact_name(&self) -> String {
        format!("{}.zip", self.version)
    }
}
