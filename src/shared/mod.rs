//! Shared Module
//!
//! This module contains types and data structures shared by every layer of
//! the page builder: the block data model, the sync event marker, the error
//! taxonomy and the application configuration. All types are designed for
//! serialization and transmission over HTTP.

/// Block, shared-block and page data model
pub mod blocks;

/// Sync marker event types
pub mod event;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use blocks::{parse_shared_slug, BlockInstance, BlockType, PageRef, SharedBlock};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::BuilderError;
pub use event::{SyncEventType, SyncMarker};
