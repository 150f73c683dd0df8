use crate::error::ScanError;
use serde::Serialize;

/// A named accumulator that only ever grows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Counter {
    /// Sum of the values of all matched lines
    pub total: u64,
    /// Number of lines that contributed to `total`
    pub lines: u64,
}

impl Counter {
    pub fn track(
        &mut self,
        amount: u64,
        line: usize,
        counter: &'static str,
    ) -> Result<(), ScanError> {
        self.total = self
            .total
            .checked_add(amount)
            .ok_or(ScanError::CounterOverflow { line, counter })?;
        self.lines += 1;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_track_accumulates_amount_and_lines() {
        let mut counter = Counter::default();
        counter.track(5, 1, "receive").unwrap();
        counter.track(0, 2, "receive").unwrap();
        counter.track(7, 3, "receive").unwrap();

        assert_eq!(counter.total, 12);
        assert_eq!(counter.lines, 3);
    }

    #[test]
    fn test_track_rejects_overflow() {
        let mut counter = Counter::default();
        counter.track(u64::MAX, 1, "broadcast").unwrap();

        let err = counter.track(1, 2, "broadcast").unwrap_err();
        assert!(matches!(
            err,
            ScanError::CounterOverflow {
                line: 2,
                counter: "broadcast"
            }
        ));

        // A failed update leaves the counter untouched
        assert_eq!(counter.total, u64::MAX);
        assert_eq!(counter.lines, 1);
    }
}
