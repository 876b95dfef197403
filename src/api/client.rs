//! Remote Block Store Client
//!
//! This module provides the async client for the Remote Block Store REST
//! API. The store is the source of truth for every block instance and shared
//! block; this client never retries a failed request, it reports the failure
//! once and the operation is abandoned.
//!
//! The [`BlockStore`] trait is the seam between the coordinator and the wire:
//! production code talks to [`HttpBlockStore`], tests drive the same
//! coordinator with an in-memory store.

use crate::api::types::{
    BlockContentUpdateRequest, CreateBlockRequest, CreateBlockResponse, PositionUpdateRequest,
    SharedBlockUpdateRequest, UnshareResponse,
};
use crate::builder::config::Config;
use crate::shared::blocks::SharedBlock;
use crate::shared::error::BuilderError;
use async_trait::async_trait;
use reqwest::{Client, Response};

/// Operations the page builder needs from the Remote Block Store
#[async_trait]
pub trait BlockStore: Send + Sync {
    /// Create a block instance on a page
    async fn create_block(
        &self,
        request: &CreateBlockRequest,
    ) -> Result<CreateBlockResponse, BuilderError>;

    /// Persist a block instance's zone and sort order
    async fn update_position(
        &self,
        instance_id: i64,
        request: &PositionUpdateRequest,
    ) -> Result<(), BuilderError>;

    /// Persist a block instance's edited content
    async fn update_block(
        &self,
        instance_id: i64,
        request: &BlockContentUpdateRequest,
    ) -> Result<(), BuilderError>;

    /// Delete a block instance
    async fn delete_block(&self, instance_id: i64) -> Result<(), BuilderError>;

    /// Detach one instance from its shared block
    async fn unshare_block(&self, instance_id: i64) -> Result<UnshareResponse, BuilderError>;

    /// Fetch the authoritative copy of a shared block
    async fn get_shared_block(&self, shared_block_id: i64) -> Result<SharedBlock, BuilderError>;

    /// Save edited shared-block content
    async fn update_shared_block(
        &self,
        shared_block_id: i64,
        request: &SharedBlockUpdateRequest,
    ) -> Result<SharedBlock, BuilderError>;

    /// List the shared blocks available to a website's palette
    async fn list_shared_blocks(&self, website_id: i64) -> Result<Vec<SharedBlock>, BuilderError>;
}

/// HTTP implementation of [`BlockStore`] backed by reqwest
pub struct HttpBlockStore {
    config: Config,
    client: Client,
}

impl HttpBlockStore {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Map a non-success response to [`BuilderError::Http`] with the body text
    async fn check(response: Response) -> Result<Response, BuilderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| status.to_string());
        Err(BuilderError::http(status.as_u16(), message))
    }
}

#[async_trait]
impl BlockStore for HttpBlockStore {
    async fn create_block(
        &self,
        request: &CreateBlockRequest,
    ) -> Result<CreateBlockResponse, BuilderError> {
        let url = self.config.api_url("/api/pagecontentblocks/page");
        let response = self.client.post(&url).json(request).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json::<CreateBlockResponse>().await?)
    }

    async fn update_position(
        &self,
        instance_id: i64,
        request: &PositionUpdateRequest,
    ) -> Result<(), BuilderError> {
        let url = self
            .config
            .api_url(&format!("/api/pagecontentblocks/page/{}/position", instance_id));
        let response = self.client.put(&url).json(request).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update_block(
        &self,
        instance_id: i64,
        request: &BlockContentUpdateRequest,
    ) -> Result<(), BuilderError> {
        let url = self
            .config
            .api_url(&format!("/api/pagecontentblocks/page/{}", instance_id));
        let response = self.client.put(&url).json(request).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_block(&self, instance_id: i64) -> Result<(), BuilderError> {
        let url = self
            .config
            .api_url(&format!("/api/pagecontentblocks/page/{}", instance_id));
        let response = self.client.delete(&url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn unshare_block(&self, instance_id: i64) -> Result<UnshareResponse, BuilderError> {
        let url = self
            .config
            .api_url(&format!("/api/pagecontentblocks/unshare/{}", instance_id));
        let response = self.client.post(&url).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json::<UnshareResponse>().await?)
    }

    async fn get_shared_block(&self, shared_block_id: i64) -> Result<SharedBlock, BuilderError> {
        let url = self
            .config
            .api_url(&format!("/api/sharedcontent/{}", shared_block_id));
        let response = self.client.get(&url).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json::<SharedBlock>().await?)
    }

    async fn update_shared_block(
        &self,
        shared_block_id: i64,
        request: &SharedBlockUpdateRequest,
    ) -> Result<SharedBlock, BuilderError> {
        let url = self
            .config
            .api_url(&format!("/api/sharedcontent/{}", shared_block_id));
        let response = self.client.put(&url).json(request).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json::<SharedBlock>().await?)
    }

    async fn list_shared_blocks(&self, website_id: i64) -> Result<Vec<SharedBlock>, BuilderError> {
        let url = self
            .config
            .api_url(&format!("/api/sharedcontent?websiteId={}", website_id));
        let response = self.client.get(&url).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json::<Vec<SharedBlock>>().await?)
    }
}
