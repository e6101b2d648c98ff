//! Freed-seat promotion sweep.
//!
//! The core promotes only by explicit entry id; this component supplies
//! the scheduling side of that contract. When a cancellation or capacity
//! increase frees a `(session, role)` seat, the sweep walks the Waiting
//! entries matching that seat in seq order (FIFO) and calls `promote`
//! until one entry takes the seat or the queue is exhausted. A
//! `SeatUnavailable` result means the seat was taken between listing and
//! promotion, so the sweep moves on to the next entry.

use signup_core::capacity::SeatLedger;
use signup_core::waitlist::{PromoteResult, WaitlistBook, WaitlistMetrics};

use crate::config::{ConfigParam, MissingConfigError, resolve_config_value};

// ─── Input ──────────────────────────────────────────────────────────────

/// A seat that just became free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreedSeat {
    pub session_id: u64,
    /// Role the seat belongs to; `None` for sessions without roles.
    pub role_id: Option<u32>,
}

/// Sweep configuration, resolved from `config::PromotionBatchMax`.
#[derive(Debug, Clone, Copy)]
pub struct PromoterConfig {
    /// Maximum promotion attempts per sweep.
    pub batch_max: usize,
}

impl PromoterConfig {
    /// Resolve from the operational config table; `batch_max` falls back
    /// to the built-in default when not deployed.
    pub fn from_config(batch_max: Option<f64>) -> Result<Self, MissingConfigError> {
        let resolved = resolve_config_value(ConfigParam::PromotionBatchMax, batch_max)?;
        Ok(Self {
            batch_max: resolved as usize,
        })
    }
}

impl Default for PromoterConfig {
    fn default() -> Self {
        Self { batch_max: 50 }
    }
}

// ─── Outcome ────────────────────────────────────────────────────────────

/// Result of one sweep over a freed seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOutcome {
    /// The earliest eligible entry that could take the seat was promoted.
    Promoted { entry_id: u64, attempts: u32 },
    /// Every eligible entry was attempted; none could take the seat.
    QueueExhausted { attempts: u32 },
    /// The batch cap stopped the sweep before the queue ran out.
    BatchBudgetExhausted { attempts: u32 },
    /// No Waiting entry matches the freed seat.
    NoWaitingEntries,
}

// ─── Metrics ────────────────────────────────────────────────────────────

/// Observability counters for the sweeper.
#[derive(Debug, Default)]
pub struct PromoterMetrics {
    sweep_total: u64,
    promoted_total: u64,
    exhausted_total: u64,
    attempt_total: u64,
}

impl PromoterMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sweep_total(&self) -> u64 {
        self.sweep_total
    }

    pub fn promoted_total(&self) -> u64 {
        self.promoted_total
    }

    pub fn exhausted_total(&self) -> u64 {
        self.exhausted_total
    }

    pub fn attempt_total(&self) -> u64 {
        self.attempt_total
    }

    fn record_sweep(&mut self) {
        self.sweep_total += 1;
    }

    fn record_attempt(&mut self) {
        self.attempt_total += 1;
    }

    fn record_promoted(&mut self) {
        self.promoted_total += 1;
    }

    fn record_exhausted(&mut self) {
        self.exhausted_total += 1;
    }
}

// ─── Sweep ──────────────────────────────────────────────────────────────

/// Run one promotion sweep for a freed seat.
pub fn sweep_freed_seat(
    freed: FreedSeat,
    book: &mut WaitlistBook,
    ledger: &SeatLedger,
    config: &PromoterConfig,
    waitlist_metrics: &mut WaitlistMetrics,
    metrics: &mut PromoterMetrics,
) -> SweepOutcome {
    metrics.record_sweep();

    let candidates: Vec<u64> = book
        .waiting_for_seat(freed.session_id, freed.role_id)
        .iter()
        .map(|e| e.entry_id)
        .collect();
    if candidates.is_empty() {
        return SweepOutcome::NoWaitingEntries;
    }

    let mut attempts: u32 = 0;
    for entry_id in candidates {
        if attempts as usize >= config.batch_max {
            tracing::debug!(
                "PromotionSweepBatchCap session_id={} attempts={}",
                freed.session_id,
                attempts
            );
            return SweepOutcome::BatchBudgetExhausted { attempts };
        }
        attempts += 1;
        metrics.record_attempt();

        match book.promote(entry_id, ledger, waitlist_metrics) {
            PromoteResult::Promoted { entry_id, .. } => {
                metrics.record_promoted();
                tracing::debug!(
                    "PromotionSweepPromoted session_id={} entry_id={} attempts={}",
                    freed.session_id,
                    entry_id,
                    attempts
                );
                return SweepOutcome::Promoted { entry_id, attempts };
            }
            // Seat taken between listing and promotion, or the entry was
            // settled concurrently; in both cases the next entry may still
            // fit.
            PromoteResult::SeatUnavailable { .. }
            | PromoteResult::NotFound
            | PromoteResult::InvalidState { .. } => continue,
        }
    }

    metrics.record_exhausted();
    SweepOutcome::QueueExhausted { attempts }
}
