//! The two line shapes found in DCC result logs.

use crate::error::ScanError;

/// Number of fields in a [`StatusLine`]
pub const STATUS_LINE_FIELDS: usize = 8;
/// Number of fields in a [`SendCountLine`]
pub const SEND_COUNT_LINE_FIELDS: usize = 5;

/// A per-node statistic, e.g. `12 Dsrc-PacketsReceived = 341 0 60 Int Node`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusLine<'a> {
    pub node: &'a str,
    pub status: &'a str,
    pub value: &'a str,
    pub start: &'a str,
    pub end: &'a str,
    pub value_subtype: &'a str,
    pub descriptor: &'a str,
}

impl<'a> StatusLine<'a> {
    /// Splits a line into its eight fields. The `=` separator is not validated.
    pub fn parse(line: &'a str, line_number: usize) -> Result<Self, ScanError> {
        let [
            node,
            status,
            _equals,
            value,
            start,
            end,
            value_subtype,
            descriptor,
        ] = split_fields::<STATUS_LINE_FIELDS>(line, line_number)?;

        Ok(Self {
            node,
            status,
            value,
            start,
            end,
            value_subtype,
            descriptor,
        })
    }

    pub fn parse_value(&self, line_number: usize) -> Result<u64, ScanError> {
        parse_value(self.value, line_number)
    }
}

/// A message send counter, e.g. `actualSendCAMCount: 40 , nodeId 3`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SendCountLine<'a> {
    pub label: &'a str,
    pub count: &'a str,
    pub node_label: &'a str,
    pub node: &'a str,
}

impl<'a> SendCountLine<'a> {
    /// Whether the line should be parsed as a send counter at all. Everything else in the log
    /// (including blank lines) is ignored by the message counter.
    pub fn is_candidate(line: &str) -> bool {
        line.starts_with('a')
    }

    pub fn parse(line: &'a str, line_number: usize) -> Result<Self, ScanError> {
        let [label, count, _comma, node_label, node] =
            split_fields::<SEND_COUNT_LINE_FIELDS>(line, line_number)?;
        Ok(Self {
            label,
            count,
            node_label,
            node,
        })
    }

    pub fn parse_count(&self, line_number: usize) -> Result<u64, ScanError> {
        parse_value(self.count, line_number)
    }
}

fn split_fields<const N: usize>(line: &str, line_number: usize) -> Result<[&str; N], ScanError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let found = fields.len();
    fields.try_into().map_err(|_| ScanError::TokenCount {
        line: line_number,
        expected: N,
        found,
    })
}

fn parse_value(token: &str, line_number: usize) -> Result<u64, ScanError> {
    token.parse().map_err(|source| ScanError::InvalidValue {
        line: line_number,
        token: token.to_string(),
        source,
    })
}
