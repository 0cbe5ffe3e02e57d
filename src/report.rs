//! Streaming result reporting and session aggregation.

use std::io::{self, Write};

use crate::types::{PushResult, Status};

/// Running totals for one push session.
///
/// Counters only ever increase; their sum equals the number of files
/// processed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Total {
    pub updates: usize,
    pub creates: usize,
    pub failures: usize,
    pub unknown: usize,
}

impl Total {
    /// An empty total, for the start of a session.
    pub fn empty() -> Self {
        Total::default()
    }

    /// Fold one result's status into the total, returning the new total.
    pub fn fold(self, status: Status) -> Total {
        match status {
            Status::Updated => Total {
                updates: self.updates + 1,
                ..self
            },
            Status::Created => Total {
                creates: self.creates + 1,
                ..self
            },
            Status::Failed => Total {
                failures: self.failures + 1,
                ..self
            },
            Status::Unknown => Total {
                unknown: self.unknown + 1,
                ..self
            },
        }
    }

    /// Number of files processed so far.
    pub fn processed(&self) -> usize {
        self.updates + self.creates + self.failures + self.unknown
    }

    /// Process exit code: 1 if anything failed or came back unknown, else 0.
    pub fn exit_code(&self) -> u8 {
        if self.failures > 0 || self.unknown > 0 {
            1
        } else {
            0
        }
    }
}

/// Write the one-line report for a single result.
pub fn write_result(out: &mut impl Write, result: &PushResult) -> io::Result<()> {
    let tag = if result.status.is_success() {
        "SUCCESS"
    } else {
        "FAILURE"
    };
    writeln!(out, "{}: {}", tag, result.message)
}

/// Write the end-of-session summary: uploaded/failed counts and, when any
/// response defied classification, a warning line.
pub fn write_summary(out: &mut impl Write, total: &Total) -> io::Result<()> {
    writeln!(
        out,
        "TOTAL: {} schemas uploaded ({} created; {} updated)",
        total.creates + total.updates,
        total.creates,
        total.updates
    )?;
    writeln!(out, "TOTAL: {} failed", total.failures)?;
    if total.unknown > 0 {
        writeln!(out, "WARNING: {} unknown server responses", total.unknown)?;
    }
    Ok(())
}
