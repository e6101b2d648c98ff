//! Append-only booking journal.
//!
//! Every ledger and waitlist mutation is captured as one JSONL event. On
//! startup, replaying the event stream against the session catalog rebuilds
//! the assigned-seat counters and the waitlist book, including FIFO order
//! and entry ids.
//!
//! Event semantics:
//! - `SeatReserved`/`SeatReleased` record direct bookings and refunds only.
//! - `WaitlistPromoted` implies its seat consumption; replay routes it
//!   through `WaitlistBook::promote`, so the seat is never double-counted.
//!
//! Appends are capacity-bounded and fail closed with typed errors; the
//! journal never panics on a full queue or a write failure.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use signup_core::capacity::{ReleaseResult, ReserveResult, SeatLedger, SessionConfig};
use signup_core::waitlist::{AddResult, PromoteResult, RemoveResult, WaitlistBook, WaitlistMetrics};

// ─── Events ─────────────────────────────────────────────────────────────

/// One journaled mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BookingEvent {
    SeatReserved {
        session_id: u64,
        role_id: Option<u32>,
        count: u32,
        ts_ms: u64,
    },
    SeatReleased {
        session_id: u64,
        role_id: Option<u32>,
        count: u32,
        ts_ms: u64,
    },
    WaitlistAdded {
        session_id: u64,
        role_id: Option<u32>,
        parent_id: u64,
        child_id: Option<u64>,
        added_ts_ms: u64,
    },
    WaitlistRemoved {
        entry_id: u64,
    },
    WaitlistPromoted {
        entry_id: u64,
    },
}

// ─── Append error ───────────────────────────────────────────────────────

/// Error returned when a journal append fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalAppendError {
    /// Bounded journal is full.
    QueueFull,
    /// Write failure.
    WriteFailed { reason: String },
}

impl fmt::Display for JournalAppendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueFull => write!(f, "booking journal full"),
            Self::WriteFailed { reason } => write!(f, "booking journal write failed: {reason}"),
        }
    }
}

impl std::error::Error for JournalAppendError {}

// ─── Replay ─────────────────────────────────────────────────────────────

/// Error raised when the event stream contradicts the session catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayError {
    /// Zero-based index of the offending event.
    pub event_index: usize,
    pub reason: String,
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "journal replay failed at event {}: {}",
            self.event_index, self.reason
        )
    }
}

impl std::error::Error for ReplayError {}

/// State rebuilt from a full replay.
#[derive(Debug)]
pub struct ReplayedState {
    pub ledger: SeatLedger,
    pub waitlist: WaitlistBook,
    pub events_applied: usize,
}

// ─── Metrics ────────────────────────────────────────────────────────────

/// Observability counters for the journal.
#[derive(Debug, Default)]
pub struct JournalMetrics {
    appends_total: u64,
    append_errors: u64,
}

impl JournalMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn appends_total(&self) -> u64 {
        self.appends_total
    }

    pub fn append_errors(&self) -> u64 {
        self.append_errors
    }

    fn record_append(&mut self) {
        self.appends_total += 1;
    }

    fn record_error(&mut self) {
        self.append_errors += 1;
    }
}

// ─── Journal ────────────────────────────────────────────────────────────

/// Bounded append-only event journal with optional JSONL storage.
#[derive(Debug)]
pub struct BookingJournal {
    events: Vec<BookingEvent>,
    capacity: usize,
    storage_path: Option<PathBuf>,
}

impl BookingJournal {
    /// In-memory journal with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            events: Vec::new(),
            capacity,
            storage_path: None,
        }
    }

    /// Create/load a journal backed by a JSONL file.
    pub fn with_storage_path(capacity: usize, storage_path: impl AsRef<Path>) -> io::Result<Self> {
        let path = storage_path.as_ref().to_path_buf();
        let events = read_events_from_path(&path)?;
        if events.len() > capacity {
            let reason = format!(
                "journal contains {} events but capacity is {}",
                events.len(),
                capacity
            );
            return Err(io::Error::new(io::ErrorKind::InvalidInput, reason));
        }

        Ok(Self {
            events,
            capacity,
            storage_path: Some(path),
        })
    }

    /// Storage path if this journal is durable.
    pub fn storage_path(&self) -> Option<&Path> {
        self.storage_path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append one event, persisting it first when a storage path is set.
    pub fn append(
        &mut self,
        event: BookingEvent,
        metrics: &mut JournalMetrics,
    ) -> Result<(), JournalAppendError> {
        if self.events.len() >= self.capacity {
            metrics.record_error();
            return Err(JournalAppendError::QueueFull);
        }

        if let Some(path) = &self.storage_path {
            write_event_to_path(path, &event).map_err(|reason| {
                metrics.record_error();
                JournalAppendError::WriteFailed { reason }
            })?;
        }

        self.events.push(event);
        metrics.record_append();
        Ok(())
    }

    /// Rebuild ledger and waitlist state from the full event stream.
    ///
    /// `sessions` is the seat catalog the events were recorded against; an
    /// event that the rebuilt state rejects is a replay error, not a silent
    /// skip.
    pub fn replay(&self, sessions: &[SessionConfig]) -> Result<ReplayedState, ReplayError> {
        let ledger = SeatLedger::new();
        for config in sessions {
            ledger.register_session(config).map_err(|e| ReplayError {
                event_index: 0,
                reason: format!("session catalog rejected: {e}"),
            })?;
        }

        let mut waitlist = WaitlistBook::new();
        let mut waitlist_metrics = WaitlistMetrics::new();

        for (index, event) in self.events.iter().enumerate() {
            apply_event(event, &ledger, &mut waitlist, &mut waitlist_metrics).map_err(
                |reason| ReplayError {
                    event_index: index,
                    reason,
                },
            )?;
        }

        Ok(ReplayedState {
            ledger,
            waitlist,
            events_applied: self.events.len(),
        })
    }
}

fn apply_event(
    event: &BookingEvent,
    ledger: &SeatLedger,
    waitlist: &mut WaitlistBook,
    waitlist_metrics: &mut WaitlistMetrics,
) -> Result<(), String> {
    match event {
        BookingEvent::SeatReserved {
            session_id,
            role_id,
            count,
            ..
        } => match ledger.reserve(*session_id, *role_id, *count) {
            ReserveResult::Reserved { .. } => Ok(()),
            ReserveResult::Rejected { reason } => Err(format!(
                "recorded reservation rejected on replay: session={session_id} reason={reason:?}"
            )),
        },
        BookingEvent::SeatReleased {
            session_id,
            role_id,
            count,
            ..
        } => match ledger.release(*session_id, *role_id, *count) {
            ReleaseResult::Released { .. } => Ok(()),
            ReleaseResult::Rejected { reason } => Err(format!(
                "recorded release rejected on replay: session={session_id} reason={reason:?}"
            )),
        },
        BookingEvent::WaitlistAdded {
            session_id,
            role_id,
            parent_id,
            child_id,
            added_ts_ms,
        } => match waitlist.add(
            *session_id,
            *role_id,
            *parent_id,
            *child_id,
            *added_ts_ms,
            waitlist_metrics,
        ) {
            AddResult::Added { .. } => Ok(()),
            AddResult::Rejected => Err("waitlist sequence exhausted on replay".to_string()),
        },
        BookingEvent::WaitlistRemoved { entry_id } => {
            match waitlist.remove(*entry_id, waitlist_metrics) {
                RemoveResult::Removed { .. } => Ok(()),
                other => Err(format!(
                    "recorded removal rejected on replay: entry={entry_id} result={other:?}"
                )),
            }
        }
        BookingEvent::WaitlistPromoted { entry_id } => {
            match waitlist.promote(*entry_id, ledger, waitlist_metrics) {
                PromoteResult::Promoted { .. } => Ok(()),
                other => Err(format!(
                    "recorded promotion rejected on replay: entry={entry_id} result={other:?}"
                )),
            }
        }
    }
}

fn write_event_to_path(path: &Path, event: &BookingEvent) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            format!(
                "failed to create journal parent directory {}: {e}",
                parent.display()
            )
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("failed to open journal {}: {e}", path.display()))?;
    let line = serde_json::to_string(event)
        .map_err(|e| format!("failed to encode journal event: {e}"))?;
    file.write_all(line.as_bytes())
        .map_err(|e| format!("failed to write journal event {}: {e}", path.display()))?;
    file.write_all(b"\n")
        .map_err(|e| format!("failed to write journal newline {}: {e}", path.display()))?;
    file.flush()
        .map_err(|e| format!("failed to flush journal {}: {e}", path.display()))
}

fn read_events_from_path(path: &Path) -> io::Result<Vec<BookingEvent>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)?;
    let reader = BufReader::new(file);

    let mut events = Vec::new();
    for (index, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let event: BookingEvent = serde_json::from_str(trimmed).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "invalid journal event at line {} in {}: {e}",
                    index + 1,
                    path.display()
                ),
            )
        })?;
        events.push(event);
    }

    Ok(events)
}
