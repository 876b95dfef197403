//! Shared-Block Edit & Cross-Context Sync
//!
//! Keeps every rendering of a shared block consistent with the latest saved
//! content, across all zones in the current builder and across every other
//! open builder context.
//!
//! The cross-context side channel is a broadcast channel carrying a
//! short-lived [`SyncMarker`]. The marker is written on a successful save and
//! cleared again after a fixed short delay; it names the shared block and
//! nothing else. Receivers re-fetch the block from the Remote Block Store and
//! re-render their local instances, so no payload in the channel can ever go
//! stale.

use crate::api::types::SharedBlockUpdateRequest;
use crate::shared::blocks::SharedBlock;
use crate::shared::error::BuilderError;
use crate::shared::event::SyncMarker;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};

/// Phase of a shared-block editing session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    /// No editor open
    Idle,
    /// Modal open, fields populated from the Remote Block Store
    Editing,
    /// Save request in flight
    Saving,
    /// Save landed; local instances and other contexts notified
    Synced,
    /// Save failed; fields keep the draft so the user can retry
    Failed,
}

/// One shared-block editing session.
///
/// Fields are always populated from the store on open; the session never
/// trusts a locally cached copy.
#[derive(Debug, Clone)]
pub struct SharedEditSession {
    pub shared_block_id: i64,
    pub website_id: i64,
    pub draft: SharedBlockUpdateRequest,
    phase: EditPhase,
}

impl SharedEditSession {
    /// Open a session from the store's authoritative copy
    pub fn open(shared: &SharedBlock) -> Self {
        tracing::info!("[SYNC] Editing shared block {}", shared.shared_block_id);
        Self {
            shared_block_id: shared.shared_block_id,
            website_id: shared.website_id,
            draft: SharedBlockUpdateRequest {
                name: shared.name.clone(),
                description: shared.description.clone(),
                html_content: shared.html_content.clone(),
                css_content: shared.css_content.clone(),
                js_content: shared.js_content.clone(),
            },
            phase: EditPhase::Editing,
        }
    }

    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    /// Mark the save request as issued
    pub fn saving(&mut self) {
        self.phase = EditPhase::Saving;
    }

    /// Mark the save as landed
    pub fn synced(&mut self) {
        tracing::info!("[SYNC] Shared block {} synced", self.shared_block_id);
        self.phase = EditPhase::Synced;
    }

    /// Mark the save as failed; the draft is kept for a retry
    pub fn failed(&mut self) {
        self.phase = EditPhase::Failed;
    }
}

/// Broadcast channel for shared-block invalidation markers.
///
/// Models the well-known storage key of the original side channel: the
/// current marker is held in a single slot, observed by every subscriber,
/// and cleared again a short delay after each write.
#[derive(Debug, Clone)]
pub struct SyncChannel {
    tx: broadcast::Sender<SyncMarker>,
    slot: Arc<RwLock<Option<SyncMarker>>>,
    lifetime: Duration,
}

impl SyncChannel {
    pub fn new(lifetime: Duration) -> Self {
        let (tx, _) = broadcast::channel(64);
        Self {
            tx,
            slot: Arc::new(RwLock::new(None)),
            lifetime,
        }
    }

    /// Subscribe to future markers
    pub fn subscribe(&self) -> broadcast::Receiver<SyncMarker> {
        self.tx.subscribe()
    }

    /// Publish a refresh marker for a shared block.
    ///
    /// The marker lands in the slot and on the channel, and a timer clears
    /// the slot after the configured lifetime. Returns the number of
    /// subscribers that received the marker.
    pub async fn publish(&self, shared_block_id: i64) -> usize {
        let marker = SyncMarker::refresh(shared_block_id);
        *self.slot.write().await = Some(marker.clone());

        let receivers = match self.tx.send(marker.clone()) {
            Ok(count) => {
                tracing::info!(
                    "[SYNC] Marker for shared block {} delivered to {} contexts",
                    shared_block_id,
                    count
                );
                count
            }
            Err(_) => {
                // No other open contexts, that's okay
                tracing::debug!(
                    "[SYNC] No contexts subscribed for shared block {}",
                    shared_block_id
                );
                0
            }
        };

        let slot = self.slot.clone();
        let lifetime = self.lifetime;
        tokio::spawn(async move {
            tokio::time::sleep(lifetime).await;
            let mut current = slot.write().await;
            // Only clear our own marker; a newer publish keeps its slot
            if current.as_ref() == Some(&marker) {
                *current = None;
            }
        });

        receivers
    }

    /// The marker currently in the slot, if its lifetime has not elapsed
    pub async fn current_marker(&self) -> Option<SyncMarker> {
        self.slot.read().await.clone()
    }
}

/// Validate a draft before it is sent to the store
pub fn validate_draft(draft: &SharedBlockUpdateRequest) -> Result<(), BuilderError> {
    if draft.name.trim().is_empty() {
        return Err(BuilderError::MissingContext("shared block name"));
    }
    Ok(())
}
