//! Frame Renderer
//!
//! Assembles a block's HTML/CSS/JS into a single isolated document string
//! (the iframe `srcdoc`) and tracks per-frame content heights so the visible
//! frame can be sized to its content.
//!
//! Two safety properties hold for every assembled document:
//! - the block script runs inside a try/catch boundary, so a broken script
//!   degrades to a console warning inside the isolated document instead of
//!   breaking the host page or other blocks
//! - any literal `</script` sequence in the script is escaped before
//!   embedding, so it cannot prematurely close the script tag when the
//!   assembled markup is parsed

use crate::shared::blocks::BlockInstance;
use std::collections::HashMap;

/// Escape every `</script` sequence (any casing) as `<\/...`.
///
/// HTML parsers close script elements case-insensitively, so `</SCRIPT` is
/// just as dangerous as the lowercase form.
pub fn escape_script_close(js: &str) -> String {
    const NEEDLE: &str = "</script";
    let mut out = String::with_capacity(js.len());
    let mut i = 0;
    while i < js.len() {
        if i + NEEDLE.len() <= js.len()
            && js.is_char_boundary(i + NEEDLE.len())
            && js[i..i + NEEDLE.len()].eq_ignore_ascii_case(NEEDLE)
        {
            out.push_str("<\\/");
            // Keep the original casing of "script"
            out.push_str(&js[i + 2..i + NEEDLE.len()]);
            i += NEEDLE.len();
            continue;
        }
        match js[i..].chars().next() {
            Some(ch) => {
                out.push(ch);
                i += ch.len_utf8();
            }
            None => break,
        }
    }
    out
}

/// Wrap a block script in the error-trapping boundary
fn with_error_boundary(js: &str) -> String {
    format!(
        "try {{\n{}\n}} catch (err) {{ console.warn('block script error:', err); }}",
        js
    )
}

/// Assemble the isolated document for a block's content.
///
/// The style block is the only stylesheet in the document, which is what
/// scopes the block's CSS.
pub fn assemble_srcdoc(html: &str, css: &str, js: &str) -> String {
    let safe_js = escape_script_close(&with_error_boundary(js));
    format!(
        "<!DOCTYPE html><html><head><style>body{{margin:0;}}{}</style></head><body>{}<script>{}</script></body></html>",
        css, html, safe_js
    )
}

/// Assemble the isolated document for a block instance
pub fn render_block(block: &BlockInstance) -> String {
    assemble_srcdoc(&block.html_content, &block.css_content, &block.js_content)
}

/// Measurement state of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameHeight {
    /// Content not loaded (or invalidated by a content update)
    Pending,
    /// Measured content height in pixels
    Measured(u32),
}

/// Tracks the measured content height of every rendered frame.
///
/// A content update invalidates the measurement, so sizing re-triggers after
/// every edit-save and not only on first render.
#[derive(Debug, Default)]
pub struct FrameSizer {
    heights: HashMap<i64, FrameHeight>,
}

impl FrameSizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A frame is about to (re-)render; its old measurement is stale
    pub fn begin_render(&mut self, instance_id: i64) {
        self.heights.insert(instance_id, FrameHeight::Pending);
    }

    /// The isolated document finished loading with the given content height
    pub fn content_loaded(&mut self, instance_id: i64, height_px: u32) {
        self.heights.insert(instance_id, FrameHeight::Measured(height_px));
    }

    /// Current visible height, `None` while a measurement is pending
    pub fn height(&self, instance_id: i64) -> Option<u32> {
        match self.heights.get(&instance_id) {
            Some(FrameHeight::Measured(height)) => Some(*height),
            Some(FrameHeight::Pending) | None => None,
        }
    }

    /// Whether a frame is waiting for its load measurement
    pub fn is_pending(&self, instance_id: i64) -> bool {
        matches!(self.heights.get(&instance_id), Some(FrameHeight::Pending))
    }

    /// Forget a deleted frame
    pub fn remove(&mut self, instance_id: i64) {
        self.heights.remove(&instance_id);
    }
}
