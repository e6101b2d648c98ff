//! Reward catalog loading.
//!
//! The catalog maps each session kind to its ordered reward thresholds.
//! It is loaded once at startup, either from the built-in defaults or from
//! a JSON file, and handed to the core as read-only data.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

use signup_core::rewards::{RewardCatalog, RewardThreshold};

/// One threshold entry as serialized in the catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardThresholdEntry {
    pub reward_id: String,
    pub threshold: u32,
    pub label: String,
}

/// Catalog file shape: one threshold list per session kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardCatalogFile {
    pub little_kids: Vec<RewardThresholdEntry>,
    pub big_kids: Vec<RewardThresholdEntry>,
    pub family: Vec<RewardThresholdEntry>,
}

fn to_thresholds(entries: Vec<RewardThresholdEntry>) -> Vec<RewardThreshold> {
    entries
        .into_iter()
        .map(|e| RewardThreshold {
            reward_id: e.reward_id,
            threshold: e.threshold,
            label: e.label,
        })
        .collect()
}

impl RewardCatalogFile {
    pub fn into_catalog(self) -> RewardCatalog {
        RewardCatalog::new(
            to_thresholds(self.little_kids),
            to_thresholds(self.big_kids),
            to_thresholds(self.family),
        )
    }
}

fn kid_defaults() -> Vec<RewardThresholdEntry> {
    vec![
        RewardThresholdEntry {
            reward_id: "gift".to_string(),
            threshold: 14,
            label: "Welcome gift".to_string(),
        },
        RewardThresholdEntry {
            reward_id: "upgrade".to_string(),
            threshold: 18,
            label: "Upgraded venue".to_string(),
        },
    ]
}

/// Built-in catalog used when no file is deployed.
pub fn default_reward_catalog() -> RewardCatalog {
    RewardCatalogFile {
        little_kids: kid_defaults(),
        big_kids: kid_defaults(),
        family: vec![
            RewardThresholdEntry {
                reward_id: "gift".to_string(),
                threshold: 10,
                label: "Welcome gift".to_string(),
            },
            RewardThresholdEntry {
                reward_id: "upgrade".to_string(),
                threshold: 15,
                label: "Upgraded venue".to_string(),
            },
        ],
    }
    .into_catalog()
}

/// Load a catalog from a JSON file.
pub fn load_reward_catalog(path: impl AsRef<Path>) -> io::Result<RewardCatalog> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    let file: RewardCatalogFile = serde_json::from_str(&raw).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid reward catalog {}: {e}", path.as_ref().display()),
        )
    })?;
    Ok(file.into_catalog())
}
