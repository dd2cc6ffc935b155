use crate::api::{Api, FileList, FileRecord};
use crate::error::{Error, Result};
use std::cell::RefCell;

/// In-memory [`Api`] for exercising code that talks to drive.
///
/// Responses are returned in the order they were queued.
#[derive(Default)]
pub struct MockApi {
    lists: RefCell<Vec<Result<FileList>>>,
    downloads: RefCell<Vec<Result<Vec<u8>>>>,
    queries: RefCell<Vec<String>>,
}

impl MockApi {
    pub fn push_list(&self, list: Result<FileList>) -> &Self {
        self.lists.borrow_mut().push(list);
        self
    }

    pub fn push_files(&self, files: Vec<FileRecord>) -> &Self {
        self.push_list(Ok(FileList {
            next_page_token: None,
            files,
        }))
    }

    pub fn push_download(&self, content: Result<Vec<u8>>) -> &Self {
        self.downloads.borrow_mut().push(content);
        self
    }

    /// Queries seen so far, download requests are recorded as `download <id>`.
    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }
}

impl Api for MockApi {
    fn list(&self, query: &str, _fields: Option<&str>) -> Result<FileList> {
        self.queries.borrow_mut().push(query.into());
        let mut lists = self.lists.borrow_mut();
        if lists.is_empty() {
            return Ok(FileList::default());
        }
        lists.remove(0)
    }

    fn download(&self, id: &str) -> Result<Vec<u8>> {
        self.queries.borrow_mut().push(format!("download {id}"));
        let mut downloads = self.downloads.borrow_mut();
        if downloads.is_empty() {
            return Err(Error::Download {
                id: id.into(),
                reason: "no content".into(),
            });
        }
        downloads.remove(0)
    }
}
