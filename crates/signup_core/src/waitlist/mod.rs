//! FIFO waitlist per (session, optional role) with exactly-once promotion.

pub mod book;
pub mod entry;

pub use book::{
    AddResult, PromoteResult, RemoveResult, WaitlistBook, WaitlistMetrics,
};
pub use entry::{WaitlistEntry, WaitlistStatus};
