use crate::config::{
    PropertySource, LOGGING_FILE, LOGGING_FILE_NAME, LOGGING_FILE_PATH, LOGGING_PATH,
};
use crate::logs::LogFileResource;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// File-name properties, highest priority first
const FILE_NAME_KEYS: &[&str] = &[LOGGING_FILE_NAME, LOGGING_FILE];

/// Directory properties, highest priority first
const FILE_PATH_KEYS: &[&str] = &[LOGGING_FILE_PATH, LOGGING_PATH];

/// File name used when only a log directory is configured
pub const DEFAULT_LOG_FILE_NAME: &str = "spring.log";

/// Works out which log file, if any, should be exposed.
///
/// Nothing is cached: every call to [`resolve`](Self::resolve) consults the
/// property source and the filesystem again.
pub struct LogFileResolver {
    properties: Arc<dyn PropertySource>,
    external_file: Option<PathBuf>,
}

impl LogFileResolver {
    /// Resolve from the logging properties
    pub fn new(properties: Arc<dyn PropertySource>) -> Self {
        Self {
            properties,
            external_file: None,
        }
    }

    /// Always serve `external_file`, ignoring the logging properties
    pub fn with_external_file<P: AsRef<Path>>(
        properties: Arc<dyn PropertySource>,
        external_file: P,
    ) -> Self {
        Self {
            properties,
            external_file: Some(external_file.as_ref().to_path_buf()),
        }
    }

    pub fn external_file(&self) -> Option<&Path> {
        self.external_file.as_deref()
    }

    /// Path that would be served, without checking that it exists
    pub fn configured_path(&self) -> Option<PathBuf> {
        if let Some(ref external) = self.external_file {
            return Some(external.clone());
        }

        if let Some(file) = self.first_property(FILE_NAME_KEYS) {
            return Some(PathBuf::from(file));
        }

        self.first_property(FILE_PATH_KEYS)
            .map(|dir| Path::new(&dir).join(DEFAULT_LOG_FILE_NAME))
    }

    /// Resolve the log file to serve.
    ///
    /// Returns `None` both when nothing is configured and when the configured
    /// file does not exist.
    pub fn resolve(&self) -> Option<LogFileResource> {
        let path = match self.configured_path() {
            Some(path) => path,
            None => {
                debug!("No log file configured");
                return None;
            }
        };

        if !path.is_file() {
            debug!("Configured log file {} does not exist", path.display());
            return None;
        }

        Some(LogFileResource::new(path))
    }

    fn first_property(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| {
            self.properties
                .get_property(key)
                .filter(|value| !value.trim().is_empty())
        })
    }
}
