//! Drop Coordinator
//!
//! Bridges a drag-and-drop gesture to a remote mutation and a local registry
//! update. A palette drop creates a block at the Remote Block Store before
//! the registry learns about it; a drag-end move updates the registry first
//! (optimistic) and then persists the new position.
//!
//! Failure semantics: the registry only mutates after a successful create,
//! so a failed drop cannot corrupt it. Moves are the one optimistic path:
//! the dropped position is kept on failure, but the coordinator records a
//! pending-move entry so the caller can offer a targeted revert instead of
//! silently leaving local and remote state diverged.

use crate::api::client::BlockStore;
use crate::api::types::{CreateBlockRequest, PositionUpdateRequest};
use crate::builder::registry::{BlockRegistry, MoveOutcome};
use crate::shared::blocks::{parse_shared_slug, BlockInstance, BlockType};
use crate::shared::error::BuilderError;
use std::sync::Arc;
use uuid::Uuid;

/// A card in the source palette, carrying its origin and optional template id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteCard {
    pub block_type: BlockType,
    /// Template id for template cards, shared-block id for shared cards
    pub template_id: Option<i64>,
}

impl PaletteCard {
    pub fn template(template_id: i64) -> Self {
        Self {
            block_type: BlockType::Template,
            template_id: Some(template_id),
        }
    }

    pub fn shared(shared_block_id: i64) -> Self {
        Self {
            block_type: BlockType::Shared,
            template_id: Some(shared_block_id),
        }
    }

    pub fn empty() -> Self {
        Self {
            block_type: BlockType::Empty,
            template_id: None,
        }
    }

    pub fn javascript() -> Self {
        Self {
            block_type: BlockType::JavaScript,
            template_id: None,
        }
    }

    pub fn css() -> Self {
        Self {
            block_type: BlockType::Css,
            template_id: None,
        }
    }
}

/// A palette card dropped into a zone
#[derive(Debug, Clone)]
pub struct DropEvent {
    pub card: PaletteCard,
    pub zone_id: String,
    /// Index among the zone's children after the drop
    pub index: usize,
}

/// An existing instance dragged to a new spot
#[derive(Debug, Clone)]
pub struct MoveEvent {
    pub instance_id: i64,
    pub from_zone: String,
    pub to_zone: String,
    /// Index among the destination zone's children after the drop
    pub to_index: usize,
}

/// A move whose position update failed at the store.
///
/// The registry keeps the dropped position; this entry remembers where the
/// store still thinks the block is, so the caller can offer a revert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    pub op_id: Uuid,
    pub instance_id: i64,
    pub from_zone: String,
    pub from_index: usize,
}

/// Result of a drag-end gesture
#[derive(Debug)]
pub enum MoveResult {
    /// Unchanged or unknown instance; no request was issued
    NoRequest(MoveOutcome),
    /// The new position was persisted
    Persisted(MoveOutcome),
    /// The registry kept the dropped position but the store was not updated
    Failed {
        outcome: MoveOutcome,
        op_id: Uuid,
        error: BuilderError,
    },
}

/// Coordinates palette drops and drag-end moves against the Remote Block Store
pub struct DropCoordinator {
    store: Arc<dyn BlockStore>,
    pending_moves: Vec<PendingMove>,
}

impl DropCoordinator {
    pub fn new(store: Arc<dyn BlockStore>) -> Self {
        Self {
            store,
            pending_moves: Vec::new(),
        }
    }

    /// Handle a palette card dropped into a zone.
    ///
    /// Issues the create request, then inserts the resulting instance into
    /// the registry. The registry is untouched when the request fails.
    /// Callers must have a created page; there is no valid `page_id` to pass
    /// here before that.
    pub async fn handle_drop(
        &self,
        page_id: i64,
        registry: &mut BlockRegistry,
        event: &DropEvent,
    ) -> Result<i64, BuilderError> {
        let request = match event.card.block_type {
            BlockType::Template => CreateBlockRequest {
                page_id,
                content_template_id: Some(
                    event
                        .card
                        .template_id
                        .ok_or(BuilderError::MissingContext("template id"))?,
                ),
                placeholder_id: event.zone_id.clone(),
                sort_order: event.index,
                is_empty: None,
                is_shared: None,
                block_type: None,
            },
            BlockType::Shared => CreateBlockRequest {
                page_id,
                content_template_id: Some(
                    event
                        .card
                        .template_id
                        .ok_or(BuilderError::MissingContext("shared block id"))?,
                ),
                placeholder_id: event.zone_id.clone(),
                sort_order: event.index,
                is_empty: None,
                is_shared: Some(true),
                block_type: None,
            },
            BlockType::Empty | BlockType::JavaScript | BlockType::Css => CreateBlockRequest {
                page_id,
                content_template_id: None,
                placeholder_id: event.zone_id.clone(),
                sort_order: event.index,
                is_empty: Some(true),
                is_shared: None,
                block_type: Some(event.card.block_type),
            },
        };

        let response = self.store.create_block(&request).await?;

        let shared_block_id = match event.card.block_type {
            BlockType::Shared => Some(
                response
                    .slug
                    .as_deref()
                    .and_then(parse_shared_slug)
                    .ok_or_else(|| BuilderError::InvalidSlug(response.slug.clone()))?,
            ),
            _ => None,
        };

        let (default_html, default_css, default_js) = event.card.block_type.default_content();
        let block = BlockInstance {
            instance_id: response.id,
            template_id: match event.card.block_type {
                BlockType::Template => event.card.template_id,
                _ => None,
            },
            block_type: event.card.block_type,
            shared_block_id,
            html_content: response
                .html_content
                .unwrap_or_else(|| default_html.to_string()),
            css_content: response
                .css_content
                .unwrap_or_else(|| default_css.to_string()),
            js_content: response.js_content.unwrap_or_else(|| default_js.to_string()),
            instance_name: response
                .instance_name
                .unwrap_or_else(|| event.card.block_type.fallback_name().to_string()),
        };

        tracing::info!(
            "[DROP] Created instance {} ({:?}) in zone {} at index {}",
            block.instance_id,
            block.block_type,
            event.zone_id,
            event.index
        );
        registry.place_block(&event.zone_id, block, Some(event.index));
        Ok(response.id)
    }

    /// Handle a drag-end move of an existing instance.
    ///
    /// A drop back onto the same zone and index issues no request; anything
    /// else issues exactly one position update, with the sort order
    /// re-derived from the destination zone's sequence after the move.
    pub async fn handle_move(
        &mut self,
        registry: &mut BlockRegistry,
        event: &MoveEvent,
    ) -> MoveResult {
        let prior = registry
            .find(event.instance_id)
            .map(|(zone, index, _)| (zone.to_string(), index));

        let outcome = registry.move_block(
            &event.from_zone,
            &event.to_zone,
            event.instance_id,
            event.to_index,
        );
        if !outcome.needs_persist() {
            tracing::debug!(
                "[DROP] Move of instance {} needs no position update ({:?})",
                event.instance_id,
                outcome
            );
            return MoveResult::NoRequest(outcome);
        }

        let (dest_zone, sort_order) = match registry.find(event.instance_id) {
            Some((zone, index, _)) => (zone.to_string(), index),
            None => return MoveResult::NoRequest(MoveOutcome::NotFound),
        };
        let request = PositionUpdateRequest {
            placeholder_id: dest_zone,
            sort_order,
        };

        match self.store.update_position(event.instance_id, &request).await {
            Ok(()) => {
                self.pending_moves
                    .retain(|p| p.instance_id != event.instance_id);
                tracing::info!(
                    "[DROP] Persisted position of instance {}: {} @ {}",
                    event.instance_id,
                    request.placeholder_id,
                    request.sort_order
                );
                MoveResult::Persisted(outcome)
            }
            Err(error) => {
                // Optimistic: the registry keeps the dropped position, the
                // store still has the old one.
                let (from_zone, from_index) =
                    prior.unwrap_or_else(|| (event.from_zone.clone(), 0));
                let op_id = Uuid::new_v4();
                self.pending_moves.push(PendingMove {
                    op_id,
                    instance_id: event.instance_id,
                    from_zone,
                    from_index,
                });
                tracing::warn!(
                    "[DROP] Position update for instance {} failed, move pending revert: {}",
                    event.instance_id,
                    error
                );
                MoveResult::Failed {
                    outcome,
                    op_id,
                    error,
                }
            }
        }
    }

    /// Moves whose position update failed and still await a revert or retry
    pub fn pending_moves(&self) -> &[PendingMove] {
        &self.pending_moves
    }

    /// Put a failed move's block back where the store last saw it.
    ///
    /// Purely local: the store never learned about the dropped position, so
    /// restoring the prior zone and index re-syncs without a request.
    pub fn revert_move(&mut self, registry: &mut BlockRegistry, op_id: Uuid) -> bool {
        let Some(position) = self.pending_moves.iter().position(|p| p.op_id == op_id) else {
            return false;
        };
        let pending = self.pending_moves.remove(position);
        let Some((zone, _, _)) = registry.find(pending.instance_id) else {
            // Deleted in the meantime; nothing to restore.
            return false;
        };
        let zone = zone.to_string();
        if let Some(block) = registry.remove_block(&zone, pending.instance_id) {
            registry.place_block(&pending.from_zone, block, Some(pending.from_index));
            tracing::info!(
                "[DROP] Reverted instance {} to {} @ {}",
                pending.instance_id,
                pending.from_zone,
                pending.from_index
            );
            return true;
        }
        false
    }
}
