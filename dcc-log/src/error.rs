use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a scan. Line numbers are 1-based.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to open log file `{}`", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("failed to read line {line} of the log")]
    Read { line: usize, source: io::Error },
    #[error("line {line} has {found} fields, but {expected} were expected")]
    TokenCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line} has value `{token}`, which is not a non-negative integer")]
    InvalidValue {
        line: usize,
        token: String,
        source: ParseIntError,
    },
    #[error("the `{counter}` counter overflowed at line {line}")]
    CounterOverflow { line: usize, counter: &'static str },
    #[error("cannot compute the {metric}: the `{denominator}` total is zero")]
    ZeroDenominator {
        metric: &'static str,
        denominator: &'static str,
    },
}
