// Single byte-range parsing for the Range request header

/// Outcome of applying a `Range` header to a file of known length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRange {
    /// Inclusive byte positions within the file
    Satisfiable { start: u64, end: u64 },
    /// The range lies entirely outside the file
    Unsatisfiable,
}

/// Parse a `Range` header value against a file of `len` bytes.
///
/// Only a single `bytes=` range is supported. Returns `None` for anything
/// malformed or for multiple ranges, in which case the header is ignored and
/// the whole file is served.
pub fn parse_range(header: &str, len: u64) -> Option<ByteRange> {
    let spec = header.trim().strip_prefix("bytes=")?.trim();
    if spec.contains(',') {
        return None;
    }

    let (first, last) = spec.split_once('-')?;
    let (first, last) = (first.trim(), last.trim());

    if first.is_empty() {
        // Suffix range: the last N bytes
        let suffix: u64 = last.parse().ok()?;
        if suffix == 0 || len == 0 {
            return Some(ByteRange::Unsatisfiable);
        }
        return Some(ByteRange::Satisfiable {
            start: len.saturating_sub(suffix),
            end: len - 1,
        });
    }

    let start: u64 = first.parse().ok()?;
    let end = if last.is_empty() {
        None
    } else {
        let end: u64 = last.parse().ok()?;
        if end < start {
            return None;
        }
        Some(end)
    };

    if start >= len {
        return Some(ByteRange::Unsatisfiable);
    }

    Some(ByteRange::Satisfiable {
        start,
        end: end.map_or(len - 1, |end| end.min(len - 1)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_range() {
        assert_eq!(
            parse_range("bytes=0-3", 8),
            Some(ByteRange::Satisfiable { start: 0, end: 3 })
        );
        assert_eq!(
            parse_range("bytes=2-100", 8),
            Some(ByteRange::Satisfiable { start: 2, end: 7 })
        );
    }

    #[test]
    fn test_open_and_suffix_ranges() {
        assert_eq!(
            parse_range("bytes=5-", 8),
            Some(ByteRange::Satisfiable { start: 5, end: 7 })
        );
        assert_eq!(
            parse_range("bytes=-3", 8),
            Some(ByteRange::Satisfiable { start: 5, end: 7 })
        );
        assert_eq!(
            parse_range("bytes=-50", 8),
            Some(ByteRange::Satisfiable { start: 0, end: 7 })
        );
    }

    #[test]
    fn test_unsatisfiable_ranges() {
        assert_eq!(parse_range("bytes=8-", 8), Some(ByteRange::Unsatisfiable));
        assert_eq!(parse_range("bytes=-0", 8), Some(ByteRange::Unsatisfiable));
        assert_eq!(parse_range("bytes=0-", 0), Some(ByteRange::Unsatisfiable));
    }

    #[test]
    fn test_ignored_headers() {
        assert_eq!(parse_range("items=0-3", 8), None);
        assert_eq!(parse_range("bytes=0-1,4-5", 8), None);
        assert_eq!(parse_range("bytes=5-2", 8), None);
        assert_eq!(parse_range("bytes=abc", 8), None);
        assert_eq!(parse_range("bytes=-", 8), None);
    }
}
