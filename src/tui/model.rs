//! Application model for the TUI.

use tuirealm::Update;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::editor::Model as Snapshot;
use crate::export::ExportFormat;
use crate::host::{Host, LogSink, MemorySink, TeeSink};

use super::activities::Msg;

/// Saved snapshots are logged and kept for printing after exit.
pub type TuiSink = TeeSink<LogSink, MemorySink>;

/// Application model containing all state.
pub struct Model {
    pub host: Host<TuiSink>,
    pub format: ExportFormat,

    // UI state
    pub quit: bool,
    pub show_help: bool,
    pub message: Option<String>,
}

impl Model {
    pub fn new(config: AppConfig) -> Self {
        let sink = TeeSink {
            first: LogSink,
            second: MemorySink::default(),
        };
        Self {
            host: Host::with_editor(config.editor.params, config.editor.model, sink),
            format: config.output.format,
            quit: false,
            show_help: false,
            message: None,
        }
    }

    /// Apply `--set`, `--add-color` and `--delete-color` before the TUI starts.
    pub fn apply_edits(&mut self, cli: &Cli) {
        if let Some(editor) = self.host.editor_mut() {
            cli.apply_edits(editor);
        }
    }

    /// Most recent snapshot handed to the sink.
    pub fn last_saved(&self) -> Option<&Snapshot> {
        self.host.sink().second.last()
    }

    fn save(&mut self) {
        self.message = match self.host.save() {
            Ok(Some(snapshot)) => Some(format!(
                "Saved {} params, {} colors",
                snapshot.param_values.len(),
                snapshot.colors.len()
            )),
            Ok(None) => Some("Nothing to save".to_string()),
            Err(e) => {
                tracing::error!("Save failed: {e:#}");
                Some(format!("Save failed: {e}"))
            }
        };
    }
}

impl Update<Msg> for Model {
    fn update(&mut self, msg: Option<Msg>) -> Option<Msg> {
        let msg = msg?;

        match msg {
            Msg::Quit => {
                self.quit = true;
                None
            }
            Msg::ShowHelp => {
                self.show_help = true;
                None
            }
            Msg::HideHelp => {
                self.show_help = false;
                None
            }

            Msg::ParamChanged(param_id, value) => {
                if let Some(editor) = self.host.editor_mut() {
                    editor.update_param_value(param_id, value);
                }
                self.message = None;
                None
            }
            Msg::NewColorNameChanged(text) => {
                if let Some(editor) = self.host.editor_mut() {
                    editor.update_new_color_name(text);
                }
                None
            }
            Msg::AddColor => {
                let added = self.host.editor_mut().and_then(|e| e.add_color());
                self.message = added.map(|id| format!("Added color #{id}"));
                Some(Msg::ColorsChanged)
            }
            Msg::DeleteColor(id) => {
                if let Some(editor) = self.host.editor_mut()
                    && editor.delete_color(id)
                {
                    self.message = Some(format!("Deleted color #{id}"));
                }
                Some(Msg::ColorsChanged)
            }

            Msg::Save => {
                self.save();
                None
            }

            // Handled by the activity
            Msg::ColorsChanged
            | Msg::FocusNext
            | Msg::FocusPrev
            | Msg::SwitchToSnapshotPreview => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn model() -> Model {
        Model::new(AppConfig::sample())
    }

    #[test]
    fn param_change_updates_editor() {
        let mut m = model();
        m.update(Some(Msg::ParamChanged(1, "вечернее".into())));
        let editor = m.host.editor().unwrap();
        assert_eq!(editor.param_value(1), Some("вечернее"));
    }

    #[test]
    fn add_color_chains_colors_changed() {
        let mut m = model();
        m.update(Some(Msg::NewColorNameChanged("  Синий ".into())));
        let next = m.update(Some(Msg::AddColor));
        assert_eq!(next, Some(Msg::ColorsChanged));

        let editor = m.host.editor().unwrap();
        assert_eq!(editor.colors().len(), 1);
        assert_eq!(editor.colors()[0].name, "Синий");
        assert_eq!(editor.new_color_name(), "");
    }

    #[test]
    fn blank_add_keeps_staging_text() {
        let mut m = model();
        m.update(Some(Msg::NewColorNameChanged("   ".into())));
        m.update(Some(Msg::AddColor));
        let editor = m.host.editor().unwrap();
        assert!(editor.colors().is_empty());
        assert_eq!(editor.new_color_name(), "   ");
        assert!(m.message.is_none());
    }

    #[test]
    fn save_keeps_last_snapshot() {
        let mut m = model();
        assert!(m.last_saved().is_none());

        m.update(Some(Msg::ParamChanged(2, "мини".into())));
        m.update(Some(Msg::Save));

        let saved = m.last_saved().unwrap();
        assert_eq!(saved.param_values[1].value, "мини");
        assert_eq!(m.message.as_deref(), Some("Saved 2 params, 0 colors"));
    }

    #[test]
    fn cli_edits_apply_before_start() {
        let cli = Cli::try_parse_from([
            "paramedit",
            "-i",
            "--set",
            "1=вечернее",
            "--add-color",
            "Синий",
        ])
        .unwrap();
        let mut m = model();
        m.apply_edits(&cli);

        let editor = m.host.editor().unwrap();
        assert_eq!(editor.param_value(1), Some("вечернее"));
        assert_eq!(editor.colors().len(), 1);
        assert_eq!(editor.colors()[0].name, "Синий");
        // Edits alone are not a save
        assert!(m.last_saved().is_none());
    }

    #[test]
    fn quit_sets_flag() {
        let mut m = model();
        assert_eq!(m.update(Some(Msg::Quit)), None);
        assert!(m.quit);
    }
}
