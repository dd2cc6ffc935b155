//! Fetches the newest build artifact of an application from google drive.
use gdrive::{Api, Drive, HttpApi};
use std::path::PathBuf;

mod config;
mod error;
mod progress;
pub mod select;

pub use crate::config::{Args, Options, DEFAULT_DESTINATION, LOG_ENV};
pub use crate::error::{Error, Stage};
pub use crate::progress::Progress;

/// Authenticates with the credentials in `opts` and fetches the artifact.
///
/// Returns the directory the artifact was unpacked to.
pub fn run(opts: &Options) -> Result<PathBuf, Error> {
    opts.validate()?;
    let mut progress = Progress::new(std::env::var_os(LOG_ENV).is_some());
    let api = progress
        .stage(Stage::Authenticate, "Initializing google drive service", || {
            HttpApi::new(&opts.credentials)
        })
        .map_err(Error::catalog(Stage::Authenticate))?;
    fetch(&Drive::new(api), opts, &mut progress)
}

/// Looks up, downloads and unpacks the newest artifact for `opts`.
pub fn fetch<A: Api>(
    drive: &Drive<A>,
    opts: &Options,
    progress: &mut Progress,
) -> Result<PathBuf, Error> {
    let folder = progress
        .stage(
            Stage::FindFolder,
            format_args!("Finding folder {}", opts.application),
            || drive.find_folder(&opts.application),
        )
        .map_err(Error::catalog(Stage::FindFolder))?;

    let name = opts.artifact_name();
    let files = progress
        .stage(
            Stage::ListCandidates,
            format_args!("Finding files named {name}"),
            || drive.list_files(&name, &folder),
        )
        .map_err(Error::catalog(Stage::ListCandidates))?;

    let latest = progress
        .stage(Stage::SelectLatest, "Selecting latest artifact", || {
            select::latest(&files).ok_or_else(|| gdrive::Error::NotFound {
                kind: "file",
                name: name.clone(),
            })
        })
        .map_err(Error::catalog(Stage::SelectLatest))?;
    log::info!(
        "selected {} ({}) created at {}",
        latest.name,
        latest.id,
        latest.created_time
    );

    let bytes = progress
        .stage(Stage::Download, "Downloading latest artifact", || {
            drive.download(&latest.id)
        })
        .map_err(Error::catalog(Stage::Download))?;

    progress
        .stage(
            Stage::Extract,
            format_args!("Unzipping artifact to {}", opts.destination.display()),
            || unpack::extract(&bytes, &opts.destination),
        )
        .map_err(Error::Extract)?;

    Ok(opts.destination.clone())
}
