//! Durable state for the registration engine.

pub mod journal;

pub use journal::{
    BookingEvent, BookingJournal, JournalAppendError, JournalMetrics, ReplayError, ReplayedState,
};
