use crate::error::ScanError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Accumulates counters from the lines of a log, one line at a time.
///
/// The result is only available through [`Aggregator::finish`], after every line has been
/// observed.
pub trait Aggregator {
    type Output;

    /// Classifies a single line and updates the counters it matches
    fn observe(&mut self, line: &str, line_number: usize) -> Result<(), ScanError>;

    /// Derives the final result from the accumulated counters
    fn finish(self) -> Result<Self::Output, ScanError>;
}

/// The outcome of a complete scan
#[derive(Clone, Debug)]
pub struct Scanned<T> {
    pub lines_read: usize,
    pub result: T,
}

pub fn scan_file<A: Aggregator>(
    path: &Path,
    aggregator: A,
) -> Result<Scanned<A::Output>, ScanError> {
    let file = File::open(path).map_err(|source| ScanError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("scanning `{}`", path.display());
    scan_reader(BufReader::new(file), aggregator)
}

pub fn scan_reader<R: BufRead, A: Aggregator>(
    reader: R,
    mut aggregator: A,
) -> Result<Scanned<A::Output>, ScanError> {
    let mut lines_read = 0;
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| ScanError::Read {
            line: line_number,
            source,
        })?;

        aggregator.observe(&line, line_number)?;
        lines_read = line_number;
    }

    debug!(lines_read, "reached end of log");
    let result = aggregator.finish()?;
    Ok(Scanned { lines_read, result })
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    /// Counts the lines it sees and fails on the word `boom`
    #[derive(Default)]
    struct LineCounter {
        seen: Vec<usize>,
    }

    impl Aggregator for LineCounter {
        type Output = Vec<usize>;

        fn observe(&mut self, line: &str, line_number: usize) -> Result<(), ScanError> {
            if line == "boom" {
                return Err(ScanError::TokenCount {
                    line: line_number,
                    expected: 0,
                    found: 1,
                });
            }

            self.seen.push(line_number);
            Ok(())
        }

        fn finish(self) -> Result<Self::Output, ScanError> {
            Ok(self.seen)
        }
    }

    #[test]
    fn test_every_line_is_observed_in_order() {
        let scanned = scan_reader(Cursor::new("a\nb\r\n\nc"), LineCounter::default()).unwrap();
        assert_eq!(scanned.lines_read, 4);
        assert_eq!(scanned.result, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_input() {
        let scanned = scan_reader(Cursor::new(""), LineCounter::default()).unwrap();
        assert_eq!(scanned.lines_read, 0);
        assert!(scanned.result.is_empty());
    }

    #[test]
    fn test_first_error_aborts_the_scan() {
        let err = scan_reader(Cursor::new("a\nboom\nc\nboom"), LineCounter::default()).unwrap_err();
        assert!(matches!(err, ScanError::TokenCount { line: 2, .. }));
    }

    #[test]
    fn test_invalid_utf8_is_a_read_error() {
        let err = scan_reader(Cursor::new(b"a\n\xff\xfe\n".to_vec()), LineCounter::default())
            .unwrap_err();
        assert!(matches!(err, ScanError::Read { line: 2, .. }));
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("this/log/does/not/exist.txt");
        let err = scan_file(path, LineCounter::default()).unwrap_err();
        match err {
            ScanError::Open { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
