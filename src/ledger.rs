//! Append-only JSONL ledgers for leads and feedback.
//!
//! Each recorded event becomes one JSON line in its ledger file. Files are
//! opened in append mode for every write and never read back or truncated;
//! they exist as an audit trail for whoever reviews them.
//!
//! On hosts with an ephemeral filesystem (container platforms that reset on
//! restart) the files do not survive a restart.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::constants::{FEEDBACK_LEDGER_FILENAME, LEADS_LEDGER_FILENAME};

/// Which ledger an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerKind {
    Leads,
    Feedback,
}

impl LedgerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerKind::Leads => "leads",
            LedgerKind::Feedback => "feedback",
        }
    }

    fn filename(&self) -> &'static str {
        match self {
            LedgerKind::Leads => LEADS_LEDGER_FILENAME,
            LedgerKind::Feedback => FEEDBACK_LEDGER_FILENAME,
        }
    }
}

/// A lead captured by `record_customer_interest`.
#[derive(Debug, Clone, Serialize)]
pub struct LeadEntry {
    pub timestamp: String,
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A question captured by `record_feedback`.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackEntry {
    pub timestamp: String,
    pub question: String,
}

/// Current UTC time in ISO-8601 form, e.g. `2026-10-19T08:15:02.123456Z`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Writes ledger entries under a single directory.
///
/// Cheap to clone; holds only the directory path. No locking is done:
/// concurrent writers may interleave lines, but each line goes out in one
/// `write_all` on an append-mode handle.
#[derive(Debug, Clone)]
pub struct Ledger {
    dir: PathBuf,
}

impl Ledger {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the file backing `kind`.
    pub fn path(&self, kind: LedgerKind) -> PathBuf {
        self.dir.join(kind.filename())
    }

    /// Appends `entry` as one JSON line to the `kind` ledger.
    ///
    /// Creates the directory and file when missing.
    pub fn append<T: Serialize>(&self, kind: LedgerKind, entry: &T) -> io::Result<()> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        if !self.dir.as_os_str().is_empty() {
            fs::create_dir_all(&self.dir)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path(kind))?;
        file.write_all(line.as_bytes())?;
        file.flush()
    }
}
