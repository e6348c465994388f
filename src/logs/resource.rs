use crate::error::{LogFileError, Result};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Content type the log file is served with
pub const LOG_FILE_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// A readable handle over a log file on disk.
///
/// Holding a resource does not keep the file open; every read opens it
/// afresh so rotated or truncated files are picked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFileResource {
    path: PathBuf,
}

impl LogFileResource {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }

    pub fn content_type(&self) -> &'static str {
        LOG_FILE_CONTENT_TYPE
    }

    /// Open the file for reading
    pub async fn open(&self) -> Result<File> {
        File::open(&self.path).await.map_err(|e| {
            LogFileError::LogFileError(format!("{}: {}", self.path.display(), e))
        })
    }

    /// Current size of the file in bytes
    pub async fn size(&self) -> Result<u64> {
        let metadata = tokio::fs::metadata(&self.path).await.map_err(|e| {
            LogFileError::LogFileError(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(metadata.len())
    }

    /// Read the whole file
    pub async fn read_to_bytes(&self) -> Result<Vec<u8>> {
        let mut file = self.open().await?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Read the whole file as UTF-8, replacing invalid sequences
    pub async fn read_to_string(&self) -> Result<String> {
        let bytes = self.read_to_bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Open the file together with its length at open time.
    ///
    /// The length comes from the opened handle, so it matches what a reader
    /// of that handle sees even if the path is rotated afterwards.
    pub async fn open_with_len(&self) -> Result<(File, u64)> {
        let file = self.open().await?;
        let len = file.metadata().await?.len();
        Ok((file, len))
    }
}
