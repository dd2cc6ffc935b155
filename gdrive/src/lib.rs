//! Lookup and download of files stored in google drive.

mod api;
mod auth;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
pub mod query;
#[cfg(test)]
mod responder;

pub use crate::api::{Api, FileList, FileRecord, HttpApi};
pub use crate::auth::{AccessToken, AuthorizedUser, Credentials, ServiceAccount, Signer, SCOPE};
pub use crate::error::{Error, Result};
#[cfg(any(test, feature = "mock"))]
pub use crate::mock::MockApi;

const FILE_FIELDS: &str = "nextPageToken, files(id, name, createdTime)";

/// Catalog operations on top of an [`Api`].
pub struct Drive<A: Api> {
    api: A,
}

impl<A: Api> Drive<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Returns the id of the only folder named `name`.
    pub fn find_folder(&self, name: &str) -> Result<String> {
        let list = self.api.list(&query::folder(name), None)?;
        match list.files.len() {
            0 => Err(Error::NotFound {
                kind: "folder",
                name: name.into(),
            }),
            1 => {
                let folder = list.files.into_iter().next().unwrap_or_default();
                log::info!("found folder {} ({})", folder.name, folder.id);
                Ok(folder.id)
            }
            count => Err(Error::Ambiguous {
                name: name.into(),
                count,
            }),
        }
    }

    /// Lists the files named `name` inside the folder `parent`.
    ///
    /// Only a single page of results is supported.
    pub fn list_files(&self, name: &str, parent: &str) -> Result<Vec<FileRecord>> {
        let list = self
            .api
            .list(&query::files_in(name, parent), Some(FILE_FIELDS))?;
        if list
            .next_page_token
            .as_deref()
            .map_or(false, |token| !token.is_empty())
        {
            return Err(Error::TooManyResults { name: name.into() });
        }
        if list.files.is_empty() {
            return Err(Error::NotFound {
                kind: "file",
                name: name.into(),
            });
        }
        log::info!("found {} files named {}", list.files.len(), name);
        Ok(list.files)
    }

    pub fn download(&self, id: &str) -> Result<Vec<u8>> {
        self.api.download(id).map_err(|err| match err {
            err @ Error::Download { .. } => err,
            err => Error::Download {
                id: id.into(),
                reason: err.to_string(),
            },
        })
    }
}
