//! pagecanvas - Page Builder Core
//!
//! pagecanvas is the block-placement core of a website builder: it tracks
//! which content blocks occupy which placeholder zones on the page being
//! edited, bridges drag-and-drop gestures to the Remote Block Store, keeps
//! every rendering of a shared block consistent across all open builder
//! contexts, and assembles each block's HTML/CSS/JS into an isolated,
//! auto-sized document.
//!
//! # Module Structure
//!
//! - **`shared`** - Types used by every layer
//!   - Block, shared-block and page data model
//!   - Sync marker events, error taxonomy, configuration
//!
//! - **`api`** - Remote Block Store REST client
//!   - The `BlockStore` trait seam and its reqwest implementation
//!   - Wire request/response types
//!
//! - **`builder`** - The page-builder core
//!   - Block registry and zone ordering invariants
//!   - Drop coordinator, shared-block sync, frame renderer
//!   - Notification center and the owning `PageBuilderSession`
//!
//! # Usage
//!
//! ```rust,no_run
//! use pagecanvas::api::HttpBlockStore;
//! use pagecanvas::builder::{Config, DropEvent, PageBuilderSession, PaletteCard};
//! use pagecanvas::shared::PageRef;
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let config = Config::new();
//! let store = Arc::new(HttpBlockStore::new(config.clone()));
//! let mut session = PageBuilderSession::new(&config, store);
//!
//! session.open_page(PageRef::new(7, ["zone-A", "zone-B"]));
//! session
//!     .drop_card(DropEvent {
//!         card: PaletteCard::template(9),
//!         zone_id: "zone-A".to_string(),
//!         index: 0,
//!     })
//!     .await;
//! # }
//! ```

/// Remote Block Store API client
pub mod api;

/// Page-builder core
pub mod builder;

/// Shared types
pub mod shared;
