//! TUI components using tui-realm.

pub mod color_list;
pub mod help;
pub mod text_field;

pub use color_list::ColorList;
pub use help::{EDITOR_FOOTER_ACTIONS, PREVIEW_FOOTER_ACTIONS, format_footer, render_help};
pub use text_field::{FieldTarget, TextField};
