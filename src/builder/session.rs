//! Page Builder Session
//!
//! The single owned state object for one open page builder: current page and
//! website, the block registry, the drop coordinator, the notification
//! center, the sync channel and the frame sizer all hang off it, and every
//! operation flows through it. There is no ambient global state.
//!
//! Error policy: session methods absorb failures. Every remote failure is
//! caught, logged, and surfaced as a toast exactly once; callers get an
//! outcome value, never a propagated error.

use crate::api::client::BlockStore;
use crate::api::types::BlockContentUpdateRequest;
use crate::builder::config::Config;
use crate::builder::coordinator::{DropCoordinator, DropEvent, MoveEvent, MoveResult, PendingMove};
use crate::builder::notifications::NotificationCenter;
use crate::builder::registry::BlockRegistry;
use crate::builder::render::{render_block, FrameSizer};
use crate::builder::sync::{validate_draft, EditPhase, SharedEditSession, SyncChannel};
use crate::shared::blocks::{PageRef, SharedBlock};
use crate::shared::event::SyncMarker;
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

/// One open page builder
pub struct PageBuilderSession {
    store: Arc<dyn BlockStore>,
    page: Option<PageRef>,
    website_id: Option<i64>,
    pub registry: BlockRegistry,
    coordinator: DropCoordinator,
    pub notifications: NotificationCenter,
    sync: SyncChannel,
    pub frames: FrameSizer,
    /// Palette of shared blocks available on the selected website
    shared_palette: Vec<SharedBlock>,
    edit: Option<SharedEditSession>,
}

impl PageBuilderSession {
    pub fn new(config: &Config, store: Arc<dyn BlockStore>) -> Self {
        let sync = SyncChannel::new(config.marker_lifetime());
        Self::with_sync_channel(config, store, sync)
    }

    /// Create a session attached to an existing sync channel.
    ///
    /// Builder contexts that must see each other's shared-block changes
    /// (the "open tabs" of one origin) share one channel.
    pub fn with_sync_channel(config: &Config, store: Arc<dyn BlockStore>, sync: SyncChannel) -> Self {
        Self {
            store: Arc::clone(&store),
            page: None,
            website_id: None,
            registry: BlockRegistry::new(),
            coordinator: DropCoordinator::new(store),
            notifications: NotificationCenter::new(config.notification_lifetime()),
            sync,
            frames: FrameSizer::new(),
            shared_palette: Vec::new(),
            edit: None,
        }
    }

    /// Open a page for editing; resets the registry to the page's zones
    pub fn open_page(&mut self, page: PageRef) {
        tracing::info!("[SESSION] Opening page {}", page.page_id);
        self.registry.reset(page.zones.iter().cloned());
        self.frames = FrameSizer::new();
        self.page = Some(page);
    }

    pub fn select_website(&mut self, website_id: i64) {
        self.website_id = Some(website_id);
    }

    pub fn page(&self) -> Option<&PageRef> {
        self.page.as_ref()
    }

    /// Whether palette cards may be dragged at all.
    ///
    /// Creation requests must never be sent without a page, so drag sources
    /// stay disabled until one exists.
    pub fn can_drag(&self) -> bool {
        self.page.is_some()
    }

    /// Shared blocks currently offered in the palette
    pub fn shared_palette(&self) -> &[SharedBlock] {
        &self.shared_palette
    }

    /// Pending moves awaiting a revert or retry
    pub fn pending_moves(&self) -> &[PendingMove] {
        self.coordinator.pending_moves()
    }

    /// Current shared-block editing session
    pub fn edit_session(&self) -> Option<&SharedEditSession> {
        self.edit.as_ref()
    }

    /// Mutable draft access while the editor modal is open
    pub fn edit_session_mut(&mut self) -> Option<&mut SharedEditSession> {
        self.edit.as_mut()
    }

    /// Subscribe another builder context to sync markers
    pub fn subscribe_sync(&self) -> broadcast::Receiver<SyncMarker> {
        self.sync.subscribe()
    }

    /// The sync channel shared by every context of this builder
    pub fn sync_channel(&self) -> &SyncChannel {
        &self.sync
    }

    /// Assembled isolated document for an instance, if it exists
    pub fn render(&self, instance_id: i64) -> Option<String> {
        self.registry
            .find(instance_id)
            .map(|(_, _, block)| render_block(block))
    }

    /// Handle a palette card dropped into a zone.
    ///
    /// Returns the new instance id, or `None` when the drop was aborted or
    /// failed (a toast says which).
    pub async fn drop_card(&mut self, event: DropEvent) -> Option<i64> {
        let Some(page_id) = self.page.as_ref().map(|p| p.page_id) else {
            self.notifications
                .warning("Create the page before adding content blocks");
            return None;
        };

        match self
            .coordinator
            .handle_drop(page_id, &mut self.registry, &event)
            .await
        {
            Ok(instance_id) => {
                self.frames.begin_render(instance_id);
                self.notifications.success("Content block added");
                Some(instance_id)
            }
            Err(error) => {
                tracing::error!("[SESSION] Drop failed: {}", error);
                self.notifications
                    .error(format!("Failed to add content block: {}", error));
                None
            }
        }
    }

    /// Handle a drag-end move of an existing instance.
    ///
    /// Returns the operation id of a failed (still revertible) move.
    pub async fn move_block(&mut self, event: MoveEvent) -> Option<Uuid> {
        match self.coordinator.handle_move(&mut self.registry, &event).await {
            MoveResult::NoRequest(_) | MoveResult::Persisted(_) => None,
            MoveResult::Failed { op_id, error, .. } => {
                self.notifications.error(format!(
                    "Failed to save the block's new position: {}. The block was left where you dropped it.",
                    error
                ));
                Some(op_id)
            }
        }
    }

    /// Put a failed move's block back where the store last saw it
    pub fn revert_move(&mut self, op_id: Uuid) -> bool {
        let reverted = self.coordinator.revert_move(&mut self.registry, op_id);
        if reverted {
            self.notifications.info("Block position restored");
        }
        reverted
    }

    /// Save edited block content and re-render its frame
    pub async fn save_block(&mut self, instance_id: i64, content: BlockContentUpdateRequest) -> bool {
        match self.store.update_block(instance_id, &content).await {
            Ok(()) => {
                if let Some(block) = self.registry.get_mut(instance_id) {
                    block.html_content = content.html_content;
                    block.css_content = content.css_content;
                    block.js_content = content.js_content;
                    block.instance_name = content.instance_name;
                }
                self.frames.begin_render(instance_id);
                self.notifications.success("Content block saved");
                true
            }
            Err(error) => {
                tracing::error!("[SESSION] Save failed for instance {}: {}", instance_id, error);
                self.notifications
                    .error(format!("Failed to save content block: {}", error));
                false
            }
        }
    }

    /// Delete a block instance.
    ///
    /// Destructive, so it only runs with `confirmed`; the registry removal is
    /// a no-op when the instance is already gone.
    pub async fn delete_block(&mut self, zone_id: &str, instance_id: i64, confirmed: bool) -> bool {
        if !confirmed {
            self.notifications
                .warning("Deletion needs confirmation first");
            return false;
        }
        match self.store.delete_block(instance_id).await {
            Ok(()) => {
                self.registry.remove_block(zone_id, instance_id);
                self.frames.remove(instance_id);
                self.notifications.success("Content block deleted");
                true
            }
            Err(error) => {
                tracing::error!(
                    "[SESSION] Delete failed for instance {}: {}",
                    instance_id,
                    error
                );
                self.notifications
                    .error(format!("Failed to delete content block: {}", error));
                false
            }
        }
    }

    /// Detach one instance from its shared block.
    ///
    /// Affects exactly that instance; other instances referencing the same
    /// shared block keep their link.
    pub async fn unshare_block(&mut self, instance_id: i64, confirmed: bool) -> bool {
        if !confirmed {
            self.notifications
                .warning("Unsharing needs confirmation first");
            return false;
        }
        let Some((_, _, block)) = self.registry.find(instance_id) else {
            self.notifications.warning("Block not found");
            return false;
        };
        if !block.offers_unshare() {
            self.notifications.warning("Block is not shared");
            return false;
        }

        match self.store.unshare_block(instance_id).await {
            Ok(response) => {
                if let Some(block) = self.registry.get_mut(instance_id) {
                    block.unshare(response.new_content_template_id);
                }
                self.notifications
                    .success("Block is now independent of the shared block");
                true
            }
            Err(error) => {
                tracing::error!(
                    "[SESSION] Unshare failed for instance {}: {}",
                    instance_id,
                    error
                );
                self.notifications
                    .error(format!("Failed to unshare block: {}", error));
                false
            }
        }
    }

    /// Open the shared-block editor, populated from the store's copy
    pub async fn open_shared_editor(&mut self, shared_block_id: i64) -> bool {
        match self.store.get_shared_block(shared_block_id).await {
            Ok(shared) => {
                self.edit = Some(SharedEditSession::open(&shared));
                true
            }
            Err(error) => {
                tracing::error!(
                    "[SESSION] Could not load shared block {}: {}",
                    shared_block_id,
                    error
                );
                self.notifications
                    .error(format!("Failed to load shared block: {}", error));
                false
            }
        }
    }

    /// Save the open shared-block editor.
    ///
    /// On success every local instance referencing the block re-renders with
    /// the fresh content and a sync marker goes out to all other contexts.
    pub async fn save_shared_editor(&mut self) -> bool {
        let Some(mut session) = self.edit.take() else {
            self.notifications.warning("No shared block is being edited");
            return false;
        };
        if let Err(error) = validate_draft(&session.draft) {
            self.notifications.warning(format!("{}", error));
            self.edit = Some(session);
            return false;
        }

        session.saving();
        let result = self
            .store
            .update_shared_block(session.shared_block_id, &session.draft)
            .await;

        match result {
            Ok(shared) => {
                session.synced();
                self.apply_shared_update(&shared).await;
                self.sync.publish(shared.shared_block_id).await;
                // The edited block knows its website, even when none is
                // selected in this context
                self.refresh_palette_for(session.website_id).await;
                self.notifications.success("Shared block saved");
                self.edit = Some(session);
                true
            }
            Err(error) => {
                session.failed();
                tracing::error!(
                    "[SESSION] Shared save failed for block {}: {}",
                    session.shared_block_id,
                    error
                );
                self.notifications
                    .error(format!("Failed to save shared block: {}", error));
                self.edit = Some(session);
                false
            }
        }
    }

    /// Close the shared-block editor modal
    pub fn close_shared_editor(&mut self) {
        self.edit = None;
    }

    /// React to a sync marker from another context.
    ///
    /// Never trusts any payload beyond the id: re-fetches the shared block,
    /// re-renders matching local instances and refreshes the palette. A
    /// fetch failure is treated as "the shared block was deleted elsewhere"
    /// for the palette, and local instances keep their last rendering.
    pub async fn handle_sync_marker(&mut self, marker: &SyncMarker) {
        tracing::info!(
            "[SESSION] Sync marker received for shared block {}",
            marker.shared_block_id
        );
        match self.store.get_shared_block(marker.shared_block_id).await {
            Ok(shared) => {
                self.apply_shared_update(&shared).await;
            }
            Err(error) => {
                tracing::warn!(
                    "[SESSION] Shared block {} no longer loads after sync marker: {}",
                    marker.shared_block_id,
                    error
                );
            }
        }
        self.refresh_shared_palette().await;
    }

    /// Copy fresh shared content onto every referencing instance and
    /// invalidate their frame measurements
    async fn apply_shared_update(&mut self, shared: &SharedBlock) {
        let touched = self
            .registry
            .for_each_shared_mut(shared.shared_block_id, |block| {
                block.apply_shared_content(shared);
            });
        for instance_id in &touched {
            self.frames.begin_render(*instance_id);
        }
        if !touched.is_empty() {
            tracing::info!(
                "[SESSION] Re-rendered {} instance(s) of shared block {}",
                touched.len(),
                shared.shared_block_id
            );
        }
    }

    /// Reload the shared-block palette for the selected website.
    ///
    /// Covers shared blocks renamed, created or deleted elsewhere. Without a
    /// selected website there is nothing to list.
    pub async fn refresh_shared_palette(&mut self) {
        let Some(website_id) = self.website_id else {
            return;
        };
        self.refresh_palette_for(website_id).await;
    }

    async fn refresh_palette_for(&mut self, website_id: i64) {
        match self.store.list_shared_blocks(website_id).await {
            Ok(palette) => {
                self.shared_palette = palette;
            }
            Err(error) => {
                tracing::warn!("[SESSION] Palette refresh failed: {}", error);
            }
        }
    }

    /// Whether the open editor has synced its latest save
    pub fn editor_synced(&self) -> bool {
        self.edit
            .as_ref()
            .map(|e| e.phase() == EditPhase::Synced)
            .unwrap_or(false)
    }
}
