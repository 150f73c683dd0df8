//! Packet Delivery Ratio from `PacketsReceived` counters, against either the discarded packets or
//! the broadcast packets of the same run.

use crate::error::ScanError;
use crate::line::StatusLine;
use crate::scan::Aggregator;
use crate::stats::Counter;
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace};

pub const DISCARDED_PATTERN: &str = "PacketsDiscarded";
pub const RECEIVED_PATTERN: &str = "PacketsReceived";
pub const BROADCAST_PATTERN: &str = "PacketsBroadcast";

/// A delivery ratio, as a percentage
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Pdr(pub f64);

impl Pdr {
    fn from_ratio(
        numerator: u64,
        denominator: u128,
        denominator_name: &'static str,
    ) -> Result<Self, ScanError> {
        if denominator == 0 {
            return Err(ScanError::ZeroDenominator {
                metric: "packet delivery ratio",
                denominator: denominator_name,
            });
        }

        Ok(Pdr(numerator as f64 / denominator as f64 * 100.0))
    }
}

impl fmt::Display for Pdr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PDR: ")?;
        // Whole percentages keep their fractional part (`100.0`, not `100`)
        if self.0.is_finite() && self.0.fract() == 0.0 && self.0.abs() < 1e16 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Received packets against received + discarded packets
#[derive(Debug, Default)]
pub struct DiscardPdr {
    discarded: Counter,
    received: Counter,
}

#[derive(Clone, Debug, Serialize)]
pub struct DiscardPdrSummary {
    pub discarded: Counter,
    pub received: Counter,
    pub pdr: Pdr,
}

impl Aggregator for DiscardPdr {
    type Output = DiscardPdrSummary;

    fn observe(&mut self, line: &str, line_number: usize) -> Result<(), ScanError> {
        let status = StatusLine::parse(line, line_number)?;
        if status.status.contains(DISCARDED_PATTERN) {
            let value = status.parse_value(line_number)?;
            trace!(line_number, node = status.node, value, "discarded");
            self.discarded.track(value, line_number, "discard")?;
        } else if status.status.contains(RECEIVED_PATTERN) {
            let value = status.parse_value(line_number)?;
            trace!(line_number, node = status.node, value, "received");
            self.received.track(value, line_number, "receive")?;
        }

        Ok(())
    }

    fn finish(self) -> Result<Self::Output, ScanError> {
        debug!(
            discarded = self.discarded.total,
            received = self.received.total,
            "computing discard-based PDR"
        );

        let attempted = u128::from(self.received.total) + u128::from(self.discarded.total);
        let pdr = Pdr::from_ratio(self.received.total, attempted, "receive + discard")?;
        Ok(DiscardPdrSummary {
            discarded: self.discarded,
            received: self.received,
            pdr,
        })
    }
}

impl fmt::Display for DiscardPdrSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.pdr, f)
    }
}

/// Received packets against the packets each broadcast should have delivered, i.e. one copy to
/// every other node in the scenario
#[derive(Debug)]
pub struct BroadcastPdr {
    node_count: u64,
    broadcast: Counter,
    received: Counter,
}

#[derive(Clone, Debug, Serialize)]
pub struct BroadcastPdrSummary {
    pub node_count: u64,
    /// Broadcast packets, already multiplied by the number of intended receivers
    pub broadcast: Counter,
    pub received: Counter,
    pub pdr: Pdr,
}

impl BroadcastPdr {
    /// A scenario with a single node (or none) has no receivers, so its PDR is undefined
    pub fn new(node_count: u64) -> Self {
        Self {
            node_count,
            broadcast: Counter::default(),
            received: Counter::default(),
        }
    }

    fn receivers_per_broadcast(&self) -> u64 {
        self.node_count.saturating_sub(1)
    }
}

impl Aggregator for BroadcastPdr {
    type Output = BroadcastPdrSummary;

    fn observe(&mut self, line: &str, line_number: usize) -> Result<(), ScanError> {
        let status = StatusLine::parse(line, line_number)?;
        if status.status.contains(BROADCAST_PATTERN) {
            let value = status.parse_value(line_number)?;
            trace!(line_number, node = status.node, value, "broadcast");
            let expected_deliveries = value
                .checked_mul(self.receivers_per_broadcast())
                .ok_or(ScanError::CounterOverflow {
                    line: line_number,
                    counter: "broadcast",
                })?;
            self.broadcast
                .track(expected_deliveries, line_number, "broadcast")?;
        } else if status.status.contains(RECEIVED_PATTERN) {
            let value = status.parse_value(line_number)?;
            trace!(line_number, node = status.node, value, "received");
            self.received.track(value, line_number, "receive")?;
        }

        Ok(())
    }

    fn finish(self) -> Result<Self::Output, ScanError> {
        debug!(
            broadcast = self.broadcast.total,
            received = self.received.total,
            node_count = self.node_count,
            "computing broadcast-based PDR"
        );

        let pdr = Pdr::from_ratio(
            self.received.total,
            u128::from(self.broadcast.total),
            "broadcast",
        )?;
        Ok(BroadcastPdrSummary {
            node_count: self.node_count,
            broadcast: self.broadcast,
            received: self.received,
            pdr,
        })
    }
}

impl fmt::Display for BroadcastPdrSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.pdr, f)
    }
}
