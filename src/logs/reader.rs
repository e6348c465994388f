use crate::error::{LogFileError, Result};
use std::collections::VecDeque;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

/// A single line of the log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Leading bracketed timestamp, if the line has one
    pub timestamp: Option<String>,
    /// The rest of the line
    pub message: String,
}

impl LogLine {
    /// Format the line for display
    pub fn format(&self) -> String {
        match self.timestamp {
            Some(ref timestamp) => format!("[{}] {}", timestamp, self.message),
            None => self.message.clone(),
        }
    }

    /// Parse a raw line, splitting off a `[timestamp]` prefix
    fn parse(line: &str) -> Self {
        if let Some(rest) = line.strip_prefix('[') {
            if let Some(end_bracket) = rest.find(']') {
                return Self {
                    timestamp: Some(rest[..end_bracket].to_string()),
                    message: rest[end_bracket + 1..].trim_start().to_string(),
                };
            }
        }

        Self {
            timestamp: None,
            message: line.to_string(),
        }
    }
}

/// Read the last N lines from a log file
///
/// # Arguments
/// * `file_path` - Path to the log file
/// * `lines` - Number of lines to read from the end
/// * `filter` - Only keep lines containing this substring
///
/// # Returns
/// * `Ok(Vec<LogLine>)` - Lines in file order; empty if the file is missing
/// * `Err(LogFileError)` - Failed to read the log file
pub async fn read_last_lines(
    file_path: &Path,
    lines: usize,
    filter: Option<&str>,
) -> Result<Vec<LogLine>> {
    if !file_path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(file_path)
        .await
        .map_err(|e| LogFileError::LogFileError(format!("Failed to open log file: {}", e)))?;

    let mut tail: VecDeque<String> = VecDeque::with_capacity(lines.min(1024));
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|e| LogFileError::LogFileError(format!("Failed to read log line: {}", e)))?;
        if read == 0 {
            break;
        }

        // Invalid UTF-8 is replaced rather than failing the whole read
        let line = String::from_utf8_lossy(&buf)
            .trim_end_matches(['\n', '\r'])
            .to_string();

        if let Some(pattern) = filter {
            if !line.contains(pattern) {
                continue;
            }
        }

        if lines == 0 {
            continue;
        }
        if tail.len() == lines {
            tail.pop_front();
        }
        tail.push_back(line);
    }

    Ok(tail.iter().map(|line| LogLine::parse(line)).collect())
}
