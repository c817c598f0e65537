// src/pipeline/run_log.rs
//! The append-only record of what one run did.
//!
//! Each record carries the stage it was written in, whether it reports a
//! success or a failure, and the human-readable message. Rendering the log
//! as text yields the messages in the order they were written.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Where a run is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Idle,
    Fetching,
    Assembling,
    Persisting,
    Done,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Fetching => "fetching",
            Self::Assembling => "assembling",
            Self::Persisting => "persisting",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub stage: PipelineStage,
    pub outcome: Outcome,
    pub detail: String,
    pub at: DateTime<Utc>,
}

/// Ordered status records for a single run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RunLog {
    records: Vec<LogRecord>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a success record and mirrors it to the diagnostic log.
    pub fn success(&mut self, stage: PipelineStage, detail: impl Into<String>) {
        let detail = detail.into();
        log::info!("[{}] {}", stage, detail);
        self.push(stage, Outcome::Success, detail);
    }

    /// Appends a failure record and mirrors it to the diagnostic log.
    pub fn failure(&mut self, stage: PipelineStage, detail: impl Into<String>) {
        let detail = detail.into();
        log::warn!("[{}] {}", stage, detail);
        self.push(stage, Outcome::Failure, detail);
    }

    fn push(&mut self, stage: PipelineStage, outcome: Outcome, detail: String) {
        self.records.push(LogRecord {
            stage,
            outcome,
            detail,
            at: Utc::now(),
        });
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// The messages alone, in the order they were written.
    pub fn messages(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.detail.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn failures(&self) -> impl Iterator<Item = &LogRecord> {
        self.records
            .iter()
            .filter(|r| r.outcome == Outcome::Failure)
    }
}

impl fmt::Display for RunLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", record.detail)?;
        }
        Ok(())
    }
}
