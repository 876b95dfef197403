//! Page Builder Core
//!
//! The in-tab half of the page builder: the block registry with its zone
//! invariants, the drop coordinator bridging drag gestures to remote
//! mutations, shared-block editing with cross-context sync, the frame
//! renderer, the notification center and the owning session object.

/// Runtime configuration
pub mod config;

/// Drop coordinator and palette/drag event types
pub mod coordinator;

/// Toast-style notifications
pub mod notifications;

/// Block registry and zone invariants
pub mod registry;

/// Isolated-document assembly and frame sizing
pub mod render;

/// The owning session object
pub mod session;

/// Shared-block edit sessions and the sync channel
pub mod sync;

pub use config::Config;
pub use coordinator::{DropCoordinator, DropEvent, MoveEvent, MoveResult, PaletteCard, PendingMove};
pub use notifications::{Notification, NotificationCenter, NotificationLevel};
pub use registry::{BlockRegistry, MoveOutcome, Zone};
pub use render::{assemble_srcdoc, escape_script_close, render_block, FrameSizer};
pub use session::PageBuilderSession;
pub use sync::{EditPhase, SharedEditSession, SyncChannel};
