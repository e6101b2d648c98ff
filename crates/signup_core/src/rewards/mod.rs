//! Gamified unlock rewards: session-kind classification and threshold
//! progress.

pub mod classify;
pub mod unlock;

pub use classify::{SessionKind, classify_session_kind};
pub use unlock::{RewardCatalog, RewardThreshold, UnlockedRewards, calculate_unlocked_rewards};
