//! Interactive TUI for editing parameters and colors.
//!
//! Architecture: Activity-based with tui-realm for components.
//! Each screen (activity) has its own Application instance and message types.
//! The editor state itself lives in the [`Model`], which owns the host;
//! components only report edits upward as messages.

mod activities;
mod activity;
mod components;
mod highlighting;
mod model;

use std::io::{IsTerminal, stdout};
use std::sync::LazyLock;

use color_eyre::eyre::{Result, bail};
use crossterm_actions::{
    ActionBinding, ActionConfig, AppEvent, EditingMode, TuiEvent, TuiRealmDispatcher,
    defaults, keys,
};
use ratatui::{
    Terminal,
    crossterm::ExecutableCommand,
    crossterm::terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    },
    prelude::CrosstermBackend,
};

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::host::{SnapshotSink, output_sink};

pub use components::{ColorList, FieldTarget, TextField};
pub use highlighting::{Highlighter, SYNTAX_SET};
pub use model::Model;

pub use activities::Msg;
use activity::{ActivityManager, Context};

// ============================================================================
// Event handling (shared across activities)
// ============================================================================

/// Unified application events - wraps TuiEvent + custom actions.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum AppAction {
    /// Standard TUI events (navigation, input, selection, app)
    Tui(TuiEvent),
    /// Hand the current snapshot to the sink
    Save,
    /// Switch to snapshot preview screen
    SnapshotPreview,
    /// Delete the selected color
    DeleteColor,
}

/// Global dispatcher instance - shared by all components.
pub static DISPATCHER: LazyLock<TuiRealmDispatcher<AppAction>> = LazyLock::new(|| {
    let mut config = ActionConfig::new(EditingMode::Emacs);

    // Import all standard TuiEvent bindings wrapped in AppAction::Tui
    for binding in defaults::emacs_defaults().bindings() {
        config.bind(ActionBinding {
            action: AppAction::Tui(binding.action),
            keys: binding.keys.clone(),
            description: binding.description.clone(),
        });
    }

    config.bind(
        ActionBinding::builder()
            .action(AppAction::Save)
            .key(keys::char('s'))
            .description("Save snapshot")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::SnapshotPreview)
            .key(keys::char('p'))
            .description("Preview snapshot")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::DeleteColor)
            .key(keys::char('d'))
            .description("Delete color")
            .build(),
    );

    config.compile();
    TuiRealmDispatcher::new(config)
});

/// Convenience function for components to access the dispatcher.
pub fn dispatcher() -> &'static TuiRealmDispatcher<AppAction> {
    &DISPATCHER
}

/// Handle global application events that are common across all components.
/// Returns Some(Msg) if the action was handled, None otherwise.
pub fn handle_global_app_events(action: &AppAction) -> Option<Msg> {
    match action {
        AppAction::Tui(TuiEvent::App(AppEvent::Quit)) => Some(Msg::Quit),
        AppAction::Tui(TuiEvent::App(AppEvent::Help)) => Some(Msg::ShowHelp),
        AppAction::Save => Some(Msg::Save),
        AppAction::SnapshotPreview => Some(Msg::SwitchToSnapshotPreview),
        _ => None,
    }
}

// ============================================================================
// TUI entry point
// ============================================================================

/// Run the interactive TUI using activity-based architecture.
///
/// Scripted edits from the command line are applied before the first
/// frame. After the terminal is restored, the last saved snapshot (if any)
/// goes to `-o` or stdout in the configured format.
pub fn run(config: AppConfig, cli: &Cli) -> Result<()> {
    if !stdout().is_terminal() {
        bail!("interactive mode needs a terminal on stdout");
    }

    let format = config.output.format;
    let mut model = Model::new(config);
    model.apply_edits(cli);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    tracing::info!("tui started");

    let mut manager = ActivityManager::new(Context { model });
    let result = manager.run(&mut terminal);

    // Cleanup terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result?;

    if let Some(snapshot) = manager.into_context().and_then(|c| c.model.last_saved().cloned()) {
        let mut sink = output_sink(cli.output.as_deref(), format)?;
        sink.accept(&snapshot)?;
        if let Some(ref path) = cli.output {
            eprintln!("Wrote snapshot to {}", path.display());
        }
    }

    tracing::info!("tui exited");
    Ok(())
}
