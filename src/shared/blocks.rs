//! Block Data Model
//!
//! Core types for the page-builder: block instances placed into placeholder
//! zones, the shared blocks they may reference, and the page that owns them.
//! These types are shared between the registry, the coordinator and the
//! Remote Block Store client, and all of them serialize for transmission
//! over HTTP.

use serde::{Deserialize, Serialize};

/// Slug prefix the Remote Block Store uses for shared-block templates
const SHARED_SLUG_PREFIX: &str = "shared-block-";

/// Title prefix shown on instances that reference a shared block
const SHARED_TITLE_PREFIX: &str = "Shared Block: ";

/// The origin of a placed content block
///
/// A closed enum instead of the wire's free-form strings; the three dispatch
/// points (create request, default-content lookup, action visibility) match
/// on it exhaustively.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Created from a content template
    Template,
    /// References a centrally-owned shared block
    Shared,
    /// Blank block the user fills in afterwards
    Empty,
    /// Script-only block
    JavaScript,
    /// Style-only block
    Css,
}

impl BlockType {
    /// Whether a palette card of this type carries a template id
    pub fn requires_template(self) -> bool {
        match self {
            BlockType::Template | BlockType::Shared => true,
            BlockType::Empty | BlockType::JavaScript | BlockType::Css => false,
        }
    }

    /// Name used when the store returns no instance name
    pub fn fallback_name(self) -> &'static str {
        match self {
            BlockType::Template => "Content Block",
            BlockType::Shared => "Shared Block",
            BlockType::Empty => "Empty Block",
            BlockType::JavaScript => "JavaScript Block",
            BlockType::Css => "CSS Block",
        }
    }

    /// Placeholder content seeded into a freshly dropped block of this type.
    ///
    /// Returns `(html, css, js)`. Template and shared blocks render the
    /// content the store returns, so their stubs are empty.
    pub fn default_content(self) -> (&'static str, &'static str, &'static str) {
        match self {
            BlockType::Template | BlockType::Shared => ("", "", ""),
            BlockType::Empty => (
                "<div class=\"empty-block\"><p>Empty block - click Edit to add content</p></div>",
                "",
                "",
            ),
            BlockType::JavaScript => (
                "",
                "",
                "// JavaScript block - click Edit to add your script\nconsole.log('JavaScript block loaded');",
            ),
            BlockType::Css => (
                "",
                "/* CSS block - click Edit to add your styles */",
                "",
            ),
        }
    }
}

/// One placed, addressable occurrence of content within a page layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockInstance {
    /// Stable identity assigned by the Remote Block Store
    pub instance_id: i64,
    /// Backing template, if any; empty/javascript/css blocks have none
    pub template_id: Option<i64>,
    /// Block origin
    pub block_type: BlockType,
    /// Referenced shared block; present only while the instance is shared
    pub shared_block_id: Option<i64>,
    /// Rendered body markup
    pub html_content: String,
    /// Stylesheet scoped to the block's isolated document
    pub css_content: String,
    /// Script executed inside the block's isolated document
    pub js_content: String,
    /// User-facing name
    pub instance_name: String,
}

impl BlockInstance {
    /// Whether this instance currently references a shared block
    pub fn is_shared(&self) -> bool {
        self.block_type == BlockType::Shared && self.shared_block_id.is_some()
    }

    /// Title shown above the rendered block
    ///
    /// Shared instances carry the "Shared Block: " prefix; it disappears the
    /// moment the instance is unshared.
    pub fn display_title(&self) -> String {
        if self.is_shared() {
            format!("{}{}", SHARED_TITLE_PREFIX, self.instance_name)
        } else {
            self.instance_name.clone()
        }
    }

    /// Whether the unshare action is offered for this instance
    pub fn offers_unshare(&self) -> bool {
        self.is_shared()
    }

    /// Copy the authoritative shared content onto this instance's render cache.
    ///
    /// The instance keeps only a rendering copy; the store's copy stays the
    /// source of truth and this is how a refresh lands locally.
    pub fn apply_shared_content(&mut self, shared: &SharedBlock) {
        self.html_content = shared.html_content.clone();
        self.css_content = shared.css_content.clone();
        self.js_content = shared.js_content.clone();
        self.instance_name = shared.name.clone();
    }

    /// Convert this instance from shared to an independent template block.
    ///
    /// Affects exactly this instance; other instances referencing the same
    /// shared block keep their link.
    pub fn unshare(&mut self, new_template_id: i64) {
        self.block_type = BlockType::Template;
        self.shared_block_id = None;
        self.template_id = Some(new_template_id);
    }
}

/// A content block whose content is centrally owned and referenced by many
/// block instances
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SharedBlock {
    pub shared_block_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub html_content: String,
    #[serde(default)]
    pub css_content: String,
    #[serde(default)]
    pub js_content: String,
    pub website_id: i64,
}

/// The page currently open in the builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    /// Page identity in the Remote Block Store
    pub page_id: i64,
    /// Placeholder zone names derived from the page's layout, in layout order
    pub zones: Vec<String>,
}

impl PageRef {
    pub fn new(page_id: i64, zones: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            page_id,
            zones: zones.into_iter().map(Into::into).collect(),
        }
    }
}

/// Extract the shared block id from a `shared-block-{id}` slug.
///
/// Anything that is not exactly the prefix followed by a decimal id yields
/// `None`.
pub fn parse_shared_slug(slug: &str) -> Option<i64> {
    slug.strip_prefix(SHARED_SLUG_PREFIX)
        .and_then(|id| id.parse::<i64>().ok())
}
