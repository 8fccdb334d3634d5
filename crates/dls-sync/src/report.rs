//! Run reports. Per-item failures accumulate here instead of aborting a run.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::store::Operation;

/// Why one variable could not be brought in line.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueReason {
    #[error("missing primitives: {}", .primitives.join(", "))]
    MissingPrimitive { primitives: Vec<String> },

    #[error("{operation} failed: {message}")]
    HostOperation {
        operation: Operation,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncIssue {
    pub name: String,
    pub reason: IssueReason,
}

impl SyncIssue {
    pub fn host(name: impl Into<String>, operation: Operation, error: impl fmt::Display) -> Self {
        Self {
            name: name.into(),
            reason: IssueReason::HostOperation {
                operation,
                message: error.to_string(),
            },
        }
    }
}

impl fmt::Display for SyncIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.reason)
    }
}

/// Result of reconciling one canonical variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created { writes: usize },
    Updated { writes: usize },
    Unchanged,
    /// Not attempted because a primitive it aliases is missing.
    Skipped,
    /// Attempted, but the host rejected the create or every write.
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhaseCounts {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl PhaseCounts {
    /// Count `outcome`, returning the mode writes it performed.
    pub fn record(&mut self, outcome: Outcome) -> usize {
        match outcome {
            Outcome::Created { writes } => {
                self.created += 1;
                writes
            }
            Outcome::Updated { writes } => {
                self.updated += 1;
                writes
            }
            Outcome::Unchanged => {
                self.unchanged += 1;
                0
            }
            Outcome::Skipped => {
                self.skipped += 1;
                0
            }
            Outcome::Failed => {
                self.failed += 1;
                0
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Deprecated entries deleted (or that would be, in a dry run).
    pub removed: usize,
    pub canonical: PhaseCounts,
    pub raw: PhaseCounts,
    /// Individual per-mode value writes.
    pub mode_writes: usize,
    pub issues: Vec<SyncIssue>,
}

impl SyncReport {
    pub fn new(dry_run: bool) -> Self {
        let now = Utc::now();
        Self {
            dry_run,
            started_at: now,
            finished_at: now,
            removed: 0,
            canonical: PhaseCounts::default(),
            raw: PhaseCounts::default(),
            mode_writes: 0,
            issues: Vec::new(),
        }
    }

    pub fn created(&self) -> usize {
        self.canonical.created + self.raw.created
    }

    pub fn updated(&self) -> usize {
        self.canonical.updated + self.raw.updated
    }

    /// True when the run wrote nothing and found nothing wrong.
    pub fn is_noop(&self) -> bool {
        self.removed == 0 && self.mode_writes == 0 && self.created() == 0 && self.issues.is_empty()
    }

    pub fn issues_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SyncIssue> + 'a {
        self.issues.iter().filter(move |i| i.name == name)
    }

    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.dry_run { "[dry run] " } else { "" };
        write!(
            f,
            "{prefix}removed {}, created {}, updated {}, unchanged {}, mode writes {}, issues {}",
            self.removed,
            self.created(),
            self.updated(),
            self.canonical.unchanged + self.raw.unchanged,
            self.mode_writes,
            self.issues.len(),
        )
    }
}

/// Which paint list a rebinding changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    Fills,
    Strokes,
    Effects,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TouchedNode {
    pub id: String,
    pub name: String,
    pub binding: BindingKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RebindReport {
    pub fills: usize,
    pub strokes: usize,
    pub effects: usize,
    pub touched: Vec<TouchedNode>,
}

impl RebindReport {
    pub fn total(&self) -> usize {
        self.fills + self.strokes + self.effects
    }
}

impl fmt::Display for RebindReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rebound {} fills, {} strokes, {} effects across {} bindings",
            self.fills,
            self.strokes,
            self.effects,
            self.touched.len()
        )
    }
}
