//! Cross-context shared-block sync
//!
//! Two sessions on one sync channel model two open builder contexts of the
//! same origin. A save in one must invalidate and refresh the other.

use crate::common::{footer_shared_block, open_session_on_channel, InMemoryBlockStore};
use pagecanvas::builder::{DropEvent, PaletteCard, SyncChannel};
use pagecanvas::shared::SyncEventType;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn drop_into(card: PaletteCard, zone: &str, index: usize) -> DropEvent {
    DropEvent {
        card,
        zone_id: zone.to_string(),
        index,
    }
}

#[tokio::test]
async fn test_save_in_one_context_refreshes_the_other() {
    let store = Arc::new(InMemoryBlockStore::new().with_shared_block(footer_shared_block()));
    let channel = SyncChannel::new(Duration::from_millis(50));
    let mut editor_tab = open_session_on_channel(store.clone(), channel.clone());
    let mut viewer_tab = open_session_on_channel(store.clone(), channel);

    let viewed = viewer_tab
        .drop_card(drop_into(PaletteCard::shared(42), "zone-B", 0))
        .await
        .unwrap();
    viewer_tab.frames.content_loaded(viewed, 120);
    let mut rx = viewer_tab.subscribe_sync();

    editor_tab.open_shared_editor(42).await;
    editor_tab.edit_session_mut().unwrap().draft.html_content = "<footer>v2</footer>".to_string();
    assert!(editor_tab.save_shared_editor().await);

    // The viewer context receives the marker and refreshes from the store
    let marker = rx.recv().await.unwrap();
    assert_eq!(marker.event_type, SyncEventType::RefreshSharedBlocks);
    assert_eq!(marker.shared_block_id, 42);
    viewer_tab.handle_sync_marker(&marker).await;

    let block = viewer_tab.registry.find(viewed).unwrap().2;
    assert_eq!(block.html_content, "<footer>v2</footer>");
    assert!(viewer_tab.frames.is_pending(viewed));
    assert_eq!(viewer_tab.shared_palette().len(), 1);
    assert_eq!(
        viewer_tab.shared_palette()[0].html_content,
        "<footer>v2</footer>"
    );
}

#[tokio::test]
async fn test_marker_carries_only_the_block_id() {
    let store = Arc::new(InMemoryBlockStore::new().with_shared_block(footer_shared_block()));
    let channel = SyncChannel::new(Duration::from_millis(50));
    let mut editor_tab = open_session_on_channel(store.clone(), channel.clone());
    let mut rx = channel.subscribe();

    editor_tab.open_shared_editor(42).await;
    editor_tab.edit_session_mut().unwrap().draft.html_content = "<footer>v2</footer>".to_string();
    editor_tab.save_shared_editor().await;

    // The wire format names the block and a timestamp, never any content
    let marker = rx.recv().await.unwrap();
    let wire = serde_json::to_value(&marker).unwrap();
    assert_eq!(wire["type"], "REFRESH_SHARED_BLOCKS");
    assert_eq!(wire["sharedBlockId"], 42);
    assert!(wire.get("htmlContent").is_none());
}

#[tokio::test]
async fn test_marker_clears_shortly_after_the_save() {
    let store = Arc::new(InMemoryBlockStore::new().with_shared_block(footer_shared_block()));
    let channel = SyncChannel::new(Duration::from_millis(50));
    let mut editor_tab = open_session_on_channel(store.clone(), channel.clone());

    editor_tab.open_shared_editor(42).await;
    assert!(editor_tab.save_shared_editor().await);
    assert!(channel.current_marker().await.is_some());

    // Real sleep: the clear task runs on the configured 50ms lifetime
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(channel.current_marker().await.is_none());
}

#[tokio::test]
async fn test_marker_for_a_deleted_block_degrades_gracefully() {
    let store = Arc::new(InMemoryBlockStore::new().with_shared_block(footer_shared_block()));
    let channel = SyncChannel::new(Duration::from_millis(50));
    let mut viewer_tab = open_session_on_channel(store.clone(), channel.clone());
    let viewed = viewer_tab
        .drop_card(drop_into(PaletteCard::shared(42), "zone-A", 0))
        .await
        .unwrap();

    // The block disappeared between the marker and the re-fetch
    let empty_store = Arc::new(InMemoryBlockStore::new());
    let mut orphaned_tab = open_session_on_channel(empty_store, channel.clone());
    let before = viewer_tab.registry.find(viewed).unwrap().2.html_content.clone();

    channel.publish(42).await;
    let marker = channel.current_marker().await.unwrap();
    orphaned_tab.handle_sync_marker(&marker).await;
    viewer_tab.handle_sync_marker(&marker).await;

    // The context that can still load the block refreshes; the other keeps
    // its last rendering instead of blanking out
    assert_eq!(viewer_tab.registry.find(viewed).unwrap().2.html_content, before);
    assert!(orphaned_tab.shared_palette().is_empty());
}
