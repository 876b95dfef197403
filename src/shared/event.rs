//! Sync Event Types
//!
//! This module defines the marker event used to tell every open builder
//! context that a shared block changed. The marker is a pure invalidation
//! signal: it names the shared block and when it changed, and nothing else.
//! Receivers must re-fetch the block from the Remote Block Store rather than
//! read content out of the marker, which keeps a late or reordered marker
//! from ever delivering stale content.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Type tag carried by sync markers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SyncEventType {
    /// A shared block was created, renamed, edited or deleted
    #[serde(rename = "REFRESH_SHARED_BLOCKS")]
    RefreshSharedBlocks,
}

/// Short-lived marker broadcast to all open builder contexts
///
/// Written to the sync channel on a successful shared-block save and cleared
/// again after a fixed short delay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncMarker {
    /// Type of change being signalled
    #[serde(rename = "type")]
    pub event_type: SyncEventType,
    /// The shared block whose cached renderings are now stale
    #[serde(rename = "sharedBlockId")]
    pub shared_block_id: i64,
    /// When the change was saved
    pub timestamp: DateTime<Utc>,
}

impl SyncMarker {
    /// Create a refresh marker for a shared block, stamped now
    pub fn refresh(shared_block_id: i64) -> Self {
        Self {
            event_type: SyncEventType::RefreshSharedBlocks,
            shared_block_id,
            timestamp: Utc::now(),
        }
    }
}
