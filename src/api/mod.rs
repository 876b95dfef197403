//! Remote Block Store API
//!
//! Wire types and the async client for the Remote Block Store, the external
//! source of truth for pages, block instances and shared blocks.

/// Block store client and the `BlockStore` trait seam
pub mod client;

/// Request/response wire types
pub mod types;

pub use client::{BlockStore, HttpBlockStore};
pub use types::{
    BlockContentUpdateRequest, CreateBlockRequest, CreateBlockResponse, PositionUpdateRequest,
    SharedBlockUpdateRequest, UnshareResponse,
};
