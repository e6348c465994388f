// Logs module - Log file resolution and reading

mod reader;
mod resolver;
mod resource;

pub use reader::{read_last_lines, LogLine};
pub use resolver::{LogFileResolver, DEFAULT_LOG_FILE_NAME};
pub use resource::{LogFileResource, LOG_FILE_CONTENT_TYPE};
