//! Activity modules for the TUI.

pub mod editor;
pub mod snapshot_preview;

pub use editor::EditorActivity;
pub use editor::{Msg, UserEvent};
pub use snapshot_preview::SnapshotPreviewActivity;
