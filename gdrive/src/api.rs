use crate::auth::{AccessToken, Credentials};
use crate::error::{Error, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use std::path::Path;

const FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
/// Upper bound of the buffer reserved up front from `Content-Length`.
const MAX_PREALLOC: u64 = 64 << 20;

/// Metadata of a single drive entry.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created_time: String,
}

/// One page of a `files.list` response.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileList {
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

/// Transport used by [`crate::Drive`].
pub trait Api {
    /// Returns the first page of entries matching `query`.
    fn list(&self, query: &str, fields: Option<&str>) -> Result<FileList>;

    /// Returns the raw content of the entry `id`.
    fn download(&self, id: &str) -> Result<Vec<u8>>;
}

impl<A: Api + ?Sized> Api for &A {
    fn list(&self, query: &str, fields: Option<&str>) -> Result<FileList> {
        (**self).list(query, fields)
    }

    fn download(&self, id: &str) -> Result<Vec<u8>> {
        (**self).download(id)
    }
}

/// Drive v3 REST api authenticated with a bearer token.
pub struct HttpApi {
    client: Client,
    token: AccessToken,
    files_url: String,
}

impl HttpApi {
    pub fn new(credentials: &Path) -> Result<Self> {
        let credentials = Credentials::from_file(credentials)?;
        let client = Client::new();
        let token = credentials.token(&client)?;
        Ok(Self::with_token(client, token))
    }

    pub fn with_token(client: Client, token: AccessToken) -> Self {
        Self::with_files_url(client, token, FILES_URL)
    }

    pub(crate) fn with_files_url(client: Client, token: AccessToken, files_url: &str) -> Self {
        Self {
            client,
            token,
            files_url: files_url.trim_end_matches('/').into(),
        }
    }

    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Response> {
        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.token.access_token)
            .query(query)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.into(),
                status: status.as_u16(),
                body: resp.text().unwrap_or_default(),
            });
        }
        Ok(resp)
    }
}

impl Api for HttpApi {
    fn list(&self, query: &str, fields: Option<&str>) -> Result<FileList> {
        log::debug!("listing files matching {}", query);
        let mut params = vec![("q", query)];
        if let Some(fields) = fields {
            params.push(("fields", fields));
        }
        Ok(self.get(&self.files_url, &params)?.json()?)
    }

    fn download(&self, id: &str) -> Result<Vec<u8>> {
        let url = format!("{}/{}", self.files_url, id);
        let mut resp = self.get(&url, &[("alt", "media")])?;

        let pb = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stdout()).with_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {prefix:.bold} [{elapsed}] {wide_bar:.green} {bytes}/{total_bytes} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▇▆▅▄▃▂▁  "),
        );
        pb.set_prefix(id.to_string());
        pb.set_message("📥 downloading");
        let len = resp.content_length().unwrap_or_default();
        pb.set_length(len);

        let mut body = Vec::with_capacity(len.min(MAX_PREALLOC) as usize);
        resp.copy_to(&mut pb.wrap_write(&mut body))?;
        pb.finish_and_clear();
        log::info!("downloaded {} bytes of file {}", body.len(), id);
        Ok(body)
    }
}
