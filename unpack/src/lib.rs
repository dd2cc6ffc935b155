//! Safe extraction of zip archives.
use std::fs::{File, OpenOptions};
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::read::ZipFile;
use zip::result::ZipError;
use zip::ZipArchive;

mod path;

pub use crate::path::{clean, enclosed_path};

/// Mode of extracted files whose entry does not carry unix permissions.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid file path '{name}'")]
    PathTraversal { name: String },
    #[error("failed to copy content of file '{name}'")]
    Copy {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read zip archive")]
    Archive(#[from] ZipError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Extracts the zip archive in `bytes` below `dest`.
pub fn extract(bytes: &[u8], dest: &Path) -> Result<()> {
    extract_archive(Cursor::new(bytes), dest)
}

/// Extracts every entry of the archive below `dest`, in archive order.
///
/// The first failing entry aborts the extraction. Entries written before it
/// are left on disk.
pub fn extract_archive<R: Read + Seek>(reader: R, dest: &Path) -> Result<()> {
    let mut archive = ZipArchive::new(reader)?;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        extract_entry(&mut entry, dest)?;
    }
    Ok(())
}

fn extract_entry(entry: &mut ZipFile, dest: &Path) -> Result<()> {
    let name = entry.name().to_string();
    let path = enclosed_path(dest, &name).ok_or_else(|| Error::PathTraversal {
        name: name.clone(),
    })?;
    log::info!("unzipping file {}", path.display());

    if entry.is_dir() {
        return create_dir_all(&path);
    }
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mode = entry
        .unix_mode()
        .map(|mode| mode & 0o7777)
        .unwrap_or(DEFAULT_FILE_MODE);
    let mut file = create_file(&path, mode).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;
    std::io::copy(entry, &mut file).map_err(|source| Error::Copy { name, source })?;
    Ok(())
}

fn create_dir_all(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(unix)]
fn create_file(path: &Path, mode: u32) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .open(path)
}

#[cfg(not(unix))]
fn create_file(path: &Path, _mode: u32) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
