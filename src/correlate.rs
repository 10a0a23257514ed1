//! Time correlation against the in-memory report log

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{LogEntry, PositionReport};

/// Find the entry closest in time to `query`.
///
/// Linear scan in log order; on equal distance the earlier entry wins.
pub fn nearest(query: f64, log: &[LogEntry]) -> Option<&LogEntry> {
    let mut best = None;
    let mut smallest = f64::INFINITY;
    for entry in log {
        let distance = (query - entry.timestamp).abs();
        if distance < smallest {
            smallest = distance;
            best = Some(entry);
        }
    }
    best
}

/// Append-only log of received position reports, in arrival order
#[derive(Debug, Clone, Default)]
pub struct AisLog {
    entries: Vec<LogEntry>,
}

/// Log shared between the single writing service loop and readers
pub type SharedLog = Arc<RwLock<AisLog>>;

impl AisLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedLog {
        Arc::new(RwLock::new(Self::new()))
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn record(&mut self, timestamp: f64, report: PositionReport) {
        self.push(LogEntry::new(timestamp, report));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn nearest(&self, query: f64) -> Option<&LogEntry> {
        nearest(query, &self.entries)
    }
}
