//! Form editor for named string parameters and freeform color tags.

pub mod cli;
pub mod config;
pub mod editor;
pub mod export;
pub mod host;
pub mod logging;
pub mod tui;
