//! Session-level scenarios: content saves, unsharing, shared editor flow

use crate::common::{footer_shared_block, open_session, test_config, InMemoryBlockStore, RecordedRequest};
use pagecanvas::api::BlockContentUpdateRequest;
use pagecanvas::builder::{DropEvent, EditPhase, PageBuilderSession, PaletteCard};
use pagecanvas::shared::{BuilderError, PageRef};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn drop_into(card: PaletteCard, zone: &str, index: usize) -> DropEvent {
    DropEvent {
        card,
        zone_id: zone.to_string(),
        index,
    }
}

#[tokio::test]
async fn test_save_block_updates_registry_and_invalidates_frame() {
    let store = Arc::new(InMemoryBlockStore::new());
    let mut session = open_session(store.clone());
    let id = session
        .drop_card(drop_into(PaletteCard::template(9), "zone-A", 0))
        .await
        .unwrap();

    // The frame has been measured since the initial render
    session.frames.content_loaded(id, 320);
    assert_eq!(session.frames.height(id), Some(320));

    let saved = session
        .save_block(
            id,
            BlockContentUpdateRequest {
                html_content: "<h1>Welcome</h1>".to_string(),
                css_content: "h1 { color: teal; }".to_string(),
                js_content: String::new(),
                instance_name: "Hero".to_string(),
            },
        )
        .await;
    assert!(saved);

    let (_, _, block) = session.registry.find(id).unwrap();
    assert_eq!(block.html_content, "<h1>Welcome</h1>");
    assert_eq!(block.instance_name, "Hero");
    // New content means the old measurement no longer applies
    assert!(session.frames.is_pending(id));
    assert!(session.render(id).unwrap().contains("<h1>Welcome</h1>"));
}

#[tokio::test]
async fn test_failed_save_keeps_previous_content() {
    let store = Arc::new(InMemoryBlockStore::new());
    let mut session = open_session(store.clone());
    let id = session
        .drop_card(drop_into(PaletteCard::template(9), "zone-A", 0))
        .await
        .unwrap();
    let before = session.registry.find(id).unwrap().2.html_content.clone();

    store.fail_next_request(BuilderError::http(500, "write failed"));
    let saved = session
        .save_block(
            id,
            BlockContentUpdateRequest {
                html_content: "<h1>never lands</h1>".to_string(),
                css_content: String::new(),
                js_content: String::new(),
                instance_name: "Hero".to_string(),
            },
        )
        .await;

    assert!(!saved);
    assert_eq!(session.registry.find(id).unwrap().2.html_content, before);
    assert!(session
        .notifications
        .entries()
        .iter()
        .any(|n| n.message.contains("Failed to save content block")));
}

#[tokio::test]
async fn test_unshare_affects_only_the_chosen_instance() {
    let store = Arc::new(InMemoryBlockStore::new().with_shared_block(footer_shared_block()));
    let mut session = open_session(store.clone());
    let first = session
        .drop_card(drop_into(PaletteCard::shared(42), "zone-A", 0))
        .await
        .unwrap();
    let second = session
        .drop_card(drop_into(PaletteCard::shared(42), "zone-B", 0))
        .await
        .unwrap();

    assert!(session.unshare_block(first, true).await);

    let unshared = session.registry.find(first).unwrap().2;
    assert!(!unshared.is_shared());
    assert_eq!(unshared.shared_block_id, None);
    assert!(unshared.template_id.is_some());
    // The store assigned a fresh backing template
    assert_eq!(unshared.display_title(), "Footer");

    // The sibling instance keeps its shared link untouched
    let still_shared = session.registry.find(second).unwrap().2;
    assert!(still_shared.is_shared());
    assert_eq!(still_shared.shared_block_id, Some(42));
    assert_eq!(still_shared.display_title(), "Shared Block: Footer");
}

#[tokio::test]
async fn test_unshare_requires_confirmation_and_a_shared_block() {
    let store = Arc::new(InMemoryBlockStore::new().with_shared_block(footer_shared_block()));
    let mut session = open_session(store.clone());
    let shared = session
        .drop_card(drop_into(PaletteCard::shared(42), "zone-A", 0))
        .await
        .unwrap();
    let plain = session
        .drop_card(drop_into(PaletteCard::template(9), "zone-B", 0))
        .await
        .unwrap();

    assert!(!session.unshare_block(shared, false).await);
    assert!(!session.unshare_block(plain, true).await);
    let requests = store.requests();
    assert!(!requests.iter().any(|r| matches!(r, RecordedRequest::Unshare(_))));
    // The confirmed-but-shared case still works afterwards
    assert!(session.unshare_block(shared, true).await);
}

#[tokio::test]
async fn test_shared_editor_opens_from_store_copy() {
    let store = Arc::new(InMemoryBlockStore::new().with_shared_block(footer_shared_block()));
    let mut session = open_session(store.clone());

    assert!(session.open_shared_editor(42).await);
    let edit = session.edit_session().unwrap();
    assert_eq!(edit.phase(), EditPhase::Editing);
    assert_eq!(edit.draft.name, "Footer");
    assert_eq!(edit.draft.html_content, "<footer>v1</footer>");
}

#[tokio::test]
async fn test_shared_editor_open_fails_for_unknown_block() {
    let store = Arc::new(InMemoryBlockStore::new());
    let mut session = open_session(store.clone());

    assert!(!session.open_shared_editor(99).await);
    assert!(session.edit_session().is_none());
    assert!(session
        .notifications
        .entries()
        .iter()
        .any(|n| n.message.contains("Failed to load shared block")));
}

#[tokio::test]
async fn test_shared_save_updates_instances_and_publishes_marker() {
    let store = Arc::new(InMemoryBlockStore::new().with_shared_block(footer_shared_block()));
    let mut session = open_session(store.clone());
    let first = session
        .drop_card(drop_into(PaletteCard::shared(42), "zone-A", 0))
        .await
        .unwrap();
    let second = session
        .drop_card(drop_into(PaletteCard::shared(42), "zone-B", 0))
        .await
        .unwrap();
    session.frames.content_loaded(first, 100);
    session.frames.content_loaded(second, 100);

    session.open_shared_editor(42).await;
    session.edit_session_mut().unwrap().draft.html_content = "<footer>v2</footer>".to_string();
    let mut rx = session.subscribe_sync();

    assert!(session.save_shared_editor().await);
    assert!(session.editor_synced());

    // Both local instances re-render with the fresh content
    for id in [first, second] {
        assert_eq!(
            session.registry.find(id).unwrap().2.html_content,
            "<footer>v2</footer>"
        );
        assert!(session.frames.is_pending(id));
    }
    // The store's copy changed and the marker went out
    assert_eq!(store.shared_block(42).unwrap().html_content, "<footer>v2</footer>");
    let marker = rx.recv().await.unwrap();
    assert_eq!(marker.shared_block_id, 42);
    // The palette picked up the saved copy
    assert_eq!(session.shared_palette().len(), 1);
    assert_eq!(session.shared_palette()[0].html_content, "<footer>v2</footer>");
}

#[tokio::test]
async fn test_shared_save_refreshes_palette_for_the_blocks_website() {
    let store = Arc::new(InMemoryBlockStore::new().with_shared_block(footer_shared_block()));
    // No select_website: the editor session carries the block's website itself
    let mut session = PageBuilderSession::new(&test_config(), store.clone());
    session.open_page(PageRef::new(7, ["zone-A", "zone-B"]));
    assert!(session.shared_palette().is_empty());

    session.open_shared_editor(42).await;
    assert_eq!(session.edit_session().unwrap().website_id, 1);
    assert!(session.save_shared_editor().await);

    assert_eq!(session.shared_palette().len(), 1);
    assert_eq!(session.shared_palette()[0].name, "Footer");
}

#[tokio::test]
async fn test_failed_shared_save_keeps_draft_for_retry() {
    let store = Arc::new(InMemoryBlockStore::new().with_shared_block(footer_shared_block()));
    let mut session = open_session(store.clone());
    session.open_shared_editor(42).await;
    session.edit_session_mut().unwrap().draft.html_content = "<footer>draft</footer>".to_string();

    store.fail_next_request(BuilderError::network("connection reset"));
    assert!(!session.save_shared_editor().await);

    let edit = session.edit_session().unwrap();
    assert_eq!(edit.phase(), EditPhase::Failed);
    assert_eq!(edit.draft.html_content, "<footer>draft</footer>");
    assert!(!session.editor_synced());
    assert!(session
        .notifications
        .entries()
        .iter()
        .any(|n| n.message.contains("Failed to save shared block")));
    // Nothing was mutated on the store side
    assert_eq!(store.shared_block(42).unwrap().html_content, "<footer>v1</footer>");
}

#[tokio::test]
async fn test_blank_name_is_rejected_before_any_request() {
    let store = Arc::new(InMemoryBlockStore::new().with_shared_block(footer_shared_block()));
    let mut session = open_session(store.clone());
    session.open_shared_editor(42).await;
    session.edit_session_mut().unwrap().draft.name = "  ".to_string();
    let requests_before = store.requests().len();

    assert!(!session.save_shared_editor().await);

    assert_eq!(store.requests().len(), requests_before);
    // The editor stays open with the draft intact
    assert_eq!(session.edit_session().unwrap().draft.name, "  ");
}
