//! Remote Block Store wire types
//!
//! Request and response bodies for the page-content-block endpoints, shaped
//! exactly as the store expects them: camelCase request fields, PascalCase
//! response fields.

use crate::shared::blocks::BlockType;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/pagecontentblocks/page`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlockRequest {
    pub page_id: i64,
    /// Template or shared-block id; `null` for empty/javascript/css blocks
    pub content_template_id: Option<i64>,
    pub placeholder_id: String,
    pub sort_order: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_empty: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_shared: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_type: Option<BlockType>,
}

/// Response of `POST /api/pagecontentblocks/page`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateBlockResponse {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "InstanceName", default)]
    pub instance_name: Option<String>,
    #[serde(rename = "HtmlContent", default)]
    pub html_content: Option<String>,
    #[serde(rename = "CssContent", default)]
    pub css_content: Option<String>,
    #[serde(rename = "JsContent", default)]
    pub js_content: Option<String>,
    /// `shared-block-{id}` when the created instance references a shared block
    #[serde(rename = "Slug", default)]
    pub slug: Option<String>,
}

/// Body of `PUT /api/pagecontentblocks/page/:instanceId/position`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositionUpdateRequest {
    pub placeholder_id: String,
    pub sort_order: usize,
}

/// Body of `PUT /api/pagecontentblocks/page/:instanceId`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockContentUpdateRequest {
    pub html_content: String,
    pub css_content: String,
    pub js_content: String,
    pub instance_name: String,
}

/// Response of `POST /api/pagecontentblocks/unshare/:instanceId`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UnshareResponse {
    /// Freshly created template backing the now-independent instance
    pub new_content_template_id: i64,
}

/// Body of `PUT /api/sharedcontent/:sharedBlockId`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SharedBlockUpdateRequest {
    pub name: String,
    pub description: String,
    pub html_content: String,
    pub css_content: String,
    pub js_content: String,
}
