//! Ordered record of every invocation an orchestrator performed

use chrono::{DateTime, Utc};
use crate::BRANCH_KIND;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::time::Duration;

/// One traced invocation: an action run, a bind, a branch decision or an
/// iteration step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationRecord {
    /// Caller-supplied label, if any
    pub name: Option<String>,
    /// Action kind tag, or the control-flow kind (`"Bind"`, `"If"`)
    pub kind: String,
    /// Whether the invocation succeeded (for branches: the decision)
    pub success: bool,
    /// Time spent in the invocation
    pub elapsed: Duration,
    /// When the record was taken
    pub recorded_at: DateTime<Utc>,
}

impl InvocationRecord {
    /// Create a record stamped with the current time
    pub fn new(name: Option<&str>, kind: &str, success: bool, elapsed: Duration) -> Self {
        Self {
            name: name.map(str::to_string),
            kind: kind.to_string(),
            success,
            elapsed,
            recorded_at: Utc::now(),
        }
    }

    /// True for branch decisions, whose flag is the condition's value
    /// rather than success
    pub fn is_decision(&self) -> bool {
        self.kind == BRANCH_KIND
    }

    /// True for invocations that failed; a false branch condition is not one
    pub fn is_failure(&self) -> bool {
        !self.success && !self.is_decision()
    }
}

/// Append-only, insertion-ordered invocation log
///
/// Unbounded unless a maximum size is set, in which case the oldest records
/// are dropped first.
#[derive(Debug, Clone, Default)]
pub struct History {
    records: Vec<InvocationRecord>,
    max_size: Option<NonZeroUsize>,
}

impl History {
    /// Create an unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `max_size` records
    pub fn with_max_size(max_size: Option<NonZeroUsize>) -> Self {
        Self {
            records: Vec::new(),
            max_size,
        }
    }

    /// Append one record
    pub fn record(&mut self, record: InvocationRecord) {
        self.records.push(record);

        if let Some(max_size) = self.max_size.map(NonZeroUsize::get) {
            if self.records.len() > max_size {
                let trim_count = self.records.len() - max_size;
                tracing::debug!("Trimming {} oldest history records", trim_count);
                self.records.drain(0..trim_count);
            }
        }
    }

    /// All records, oldest first
    pub fn records(&self) -> &[InvocationRecord] {
        &self.records
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Remove and return every record, oldest first
    pub fn drain(&mut self) -> Vec<InvocationRecord> {
        std::mem::take(&mut self.records)
    }

    /// Number of failed invocations; branch decisions never count
    pub fn failure_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_failure()).count()
    }
}
