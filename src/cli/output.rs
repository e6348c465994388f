// Output formatting and display for CLI

use crate::logs::LogLine;
use colored::*;
use std::path::Path;

/// Print the resolved log file
pub fn print_resolved(path: &Path, size: u64) {
    println!("{}", "✓ Log file available".green().bold());
    println!("  {}: {}", "Path".bold(), path.display().to_string().cyan());
    println!("  {}: {}", "Size".bold(), format_size(size));
}

/// Print log lines in file order
pub fn print_lines(lines: &[LogLine]) {
    if lines.is_empty() {
        println!("{}", "No matching log lines".yellow());
        return;
    }

    for line in lines {
        println!("{}", line.format());
    }
}

/// Print an error message to stderr
pub fn print_error(error: &str) {
    eprintln!("{} {}", "✗ Error:".red().bold(), error);
}

/// Format a byte count in human-readable units
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(8), "8 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }
}
