use crate::error::ScanError;
use crate::line::SendCountLine;
use crate::scan::Aggregator;
use crate::stats::Counter;
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace};

pub const CAM_PATTERN: &str = "actualSendCAMCount:";
pub const CPM_PATTERN: &str = "actualSendCPMCount:";

/// Totals of the CAM and CPM send counters reported by every node
#[derive(Debug, Default)]
pub struct MessageCounts {
    cam: Counter,
    cpm: Counter,
    skipped_lines: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct MessageCountSummary {
    pub cam: Counter,
    pub cpm: Counter,
    /// Lines that did not look like send counters at all
    pub skipped_lines: u64,
}

impl Aggregator for MessageCounts {
    type Output = MessageCountSummary;

    fn observe(&mut self, line: &str, line_number: usize) -> Result<(), ScanError> {
        if !SendCountLine::is_candidate(line) {
            self.skipped_lines += 1;
            return Ok(());
        }

        let send_count = SendCountLine::parse(line, line_number)?;
        if send_count.label.contains(CAM_PATTERN) {
            let count = send_count.parse_count(line_number)?;
            trace!(line_number, node = send_count.node, count, "CAM");
            self.cam.track(count, line_number, "CAM")?;
        } else if send_count.label.contains(CPM_PATTERN) {
            let count = send_count.parse_count(line_number)?;
            trace!(line_number, node = send_count.node, count, "CPM");
            self.cpm.track(count, line_number, "CPM")?;
        }

        Ok(())
    }

    fn finish(self) -> Result<Self::Output, ScanError> {
        debug!(
            cam = self.cam.total,
            cpm = self.cpm.total,
            skipped_lines = self.skipped_lines,
            "computed message counts"
        );

        Ok(MessageCountSummary {
            cam: self.cam,
            cpm: self.cpm,
            skipped_lines: self.skipped_lines,
        })
    }
}

impl fmt::Display for MessageCountSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CAMCount: {}", self.cam.total)?;
        write!(f, "CPMCount: {}", self.cpm.total)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scan::scan_reader;
    use bon::builder;
    use std::io::Cursor;

    #[builder]
    fn send_count_line(label: &'static str, count: u64, node: Option<u32>) -> String {
        let node = node.unwrap_or(1);
        format!("{label} {count} , nodeId {node}")
    }

    fn count(text: &str) -> Result<MessageCountSummary, ScanError> {
        scan_reader(Cursor::new(text.to_string()), MessageCounts::default()).map(|s| s.result)
    }

    #[test]
    fn test_cam_and_cpm_totals() {
        let text = [
            send_count_line().label(CAM_PATTERN).count(12).call(),
            send_count_line().label(CPM_PATTERN).count(5).call(),
        ]
        .join("\n");
        let summary = count(&text).unwrap();

        assert_eq!(summary.cam, Counter { total: 12, lines: 1 });
        assert_eq!(summary.cpm, Counter { total: 5, lines: 1 });
        assert_eq!(summary.to_string(), "CAMCount: 12\nCPMCount: 5");
    }

    #[test]
    fn test_other_lines_are_skipped() {
        let text = [
            "1 Dsrc-PacketsReceived = 3 0 60 Int Node".to_string(),
            String::new(),
            send_count_line().label(CAM_PATTERN).count(4).node(1).call(),
            "  actualSendCAMCount: 100 , nodeId 9".to_string(),
            send_count_line().label(CAM_PATTERN).count(6).node(2).call(),
            send_count_line().label(CPM_PATTERN).count(1).node(2).call(),
            // Starts with `a`, has the right shape, matches nothing
            "actualSendDENMCount: 7 , nodeId 2".to_string(),
        ]
        .join("\n");
        let summary = count(&text).unwrap();

        assert_eq!(summary.cam, Counter { total: 10, lines: 2 });
        assert_eq!(summary.cpm, Counter { total: 1, lines: 1 });
        assert_eq!(summary.skipped_lines, 3);
    }

    #[test]
    fn test_empty_log_counts_zero() {
        let summary = count("").unwrap();
        assert_eq!(summary.to_string(), "CAMCount: 0\nCPMCount: 0");
    }

    #[test]
    fn test_malformed_candidate_aborts_scan() {
        let err = count("actualSendCAMCount: 4 , nodeId").unwrap_err();
        assert!(matches!(
            err,
            ScanError::TokenCount {
                line: 1,
                expected: 5,
                found: 4
            }
        ));

        let text = format!(
            "{}\nactualSendCPMCount: lots , nodeId 3",
            send_count_line().label(CAM_PATTERN).count(4).call()
        );
        let err = count(&text).unwrap_err();
        assert!(matches!(err, ScanError::InvalidValue { line: 2, .. }));
    }

    #[test]
    fn test_totals_do_not_depend_on_line_order() {
        let mut lines = vec![
            send_count_line().label(CAM_PATTERN).count(3).node(1).call(),
            send_count_line().label(CPM_PATTERN).count(8).node(1).call(),
            "1 Dsrc-PacketsReceived = 3 0 60 Int Node".to_string(),
            send_count_line().label(CAM_PATTERN).count(21).node(2).call(),
            send_count_line().label(CPM_PATTERN).count(2).node(2).call(),
        ];
        let expected = count(&lines.join("\n")).unwrap();

        for _ in 0..lines.len() {
            lines.rotate_left(1);
            let summary = count(&lines.join("\n")).unwrap();
            assert_eq!(summary.cam, expected.cam);
            assert_eq!(summary.cpm, expected.cpm);
        }
    }
}
