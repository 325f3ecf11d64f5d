//! Editor activity - the parameter and color editing screen.

use std::io::Stdout;
use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::{
    Frame, Terminal,
    crossterm::event::{self, Event, KeyCode},
    layout::{Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tuirealm::{Application, EventListenerCfg, PollStrategy, State, StateValue, Update};

use crate::editor::Editor;
use crate::tui::Model;
use crate::tui::activity::{Activity, Context, ExitReason};
use crate::tui::components::{
    ColorList, EDITOR_FOOTER_ACTIONS, FieldTarget, TextField, format_footer, render_help,
};

/// Heading of the parameters section.
const PARAMS_TITLE: &str = " Редактор параметров ";
/// Heading of the colors section.
const COLORS_TITLE: &str = " Цвета ";
/// Placeholder of the staging input.
const NEW_COLOR_PLACEHOLDER: &str = "Добавить цвет";

// ============================================================================
// Component identifiers (scoped to EditorActivity)
// ============================================================================

/// Unique identifiers for all components in EditorActivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    /// Text field for the parameter with this id
    Param(u32),
    Colors,
    NewColor,
}

// ============================================================================
// Messages (scoped to EditorActivity)
// ============================================================================

/// All possible messages that can be sent in EditorActivity.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    // Application control
    Quit,
    ShowHelp,
    HideHelp,

    // Focus/Navigation
    FocusNext,
    FocusPrev,

    // Editor operations
    ParamChanged(u32, String),
    NewColorNameChanged(String),
    AddColor,
    DeleteColor(u64),

    // Color list or staging text changed (chained after add/delete)
    ColorsChanged,

    // Hand the snapshot to the sink
    Save,

    // Activity transition
    SwitchToSnapshotPreview,
}

// ============================================================================
// User events (required by tui-realm, currently unused)
// ============================================================================

/// Custom user events (currently unused, but required by tui-realm).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

// ============================================================================
// Focus management (scoped to EditorActivity)
// ============================================================================

/// Manages focus state for Tab navigation in EditorActivity.
///
/// Focus order is one field per param in declaration order, then the color
/// list, then the staging field.
#[derive(Default)]
pub struct FocusManager {
    order: Vec<Id>,
    current_idx: usize,
}

impl FocusManager {
    pub fn for_editor(editor: &Editor) -> Self {
        let mut order: Vec<Id> = editor.params().iter().map(|p| Id::Param(p.id)).collect();
        order.push(Id::Colors);
        order.push(Id::NewColor);
        Self {
            order,
            current_idx: 0,
        }
    }

    /// Get the current focus component ID.
    pub fn current_focus(&self) -> Id {
        self.order
            .get(self.current_idx)
            .copied()
            .unwrap_or(Id::NewColor)
    }

    /// Move focus to next component and return its ID.
    pub fn focus_next(&mut self) -> Id {
        if !self.order.is_empty() {
            self.current_idx = (self.current_idx + 1) % self.order.len();
        }
        self.current_focus()
    }

    /// Move focus to previous component and return its ID.
    pub fn focus_prev(&mut self) -> Id {
        if !self.order.is_empty() {
            self.current_idx = (self.current_idx + self.order.len() - 1) % self.order.len();
        }
        self.current_focus()
    }
}

/// Rows needed for the params block: one per param plus borders.
fn params_block_height(param_count: usize) -> u16 {
    u16::try_from(param_count)
        .unwrap_or(u16::MAX)
        .saturating_add(2)
}

// ============================================================================
// EditorActivity
// ============================================================================

/// The parameter and color editing activity.
#[derive(Default)]
pub struct EditorActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    focus: FocusManager,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
}

impl EditorActivity {
    /// Create and configure the tui-realm application.
    fn create_application() -> Application<Id, Msg, UserEvent> {
        Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        )
    }

    fn mount_color_components(
        app: &mut Application<Id, Msg, UserEvent>,
        editor: &Editor,
        selected: usize,
    ) -> Result<()> {
        let colors = ColorList::new(editor.colors().to_vec(), selected);
        app.mount(Id::Colors, Box::new(colors), vec![])?;

        let staging = TextField::new("+", editor.new_color_name(), FieldTarget::NewColor)
            .with_placeholder(NEW_COLOR_PLACEHOLDER);
        app.mount(Id::NewColor, Box::new(staging), vec![])?;
        Ok(())
    }

    /// Mount all initial components.
    fn mount_components(app: &mut Application<Id, Msg, UserEvent>, editor: &Editor) -> Result<()> {
        for param in editor.params() {
            let value = editor.param_value(param.id).unwrap_or_default();
            let field = TextField::new(param.name.clone(), value, FieldTarget::Param(param.id));
            app.mount(Id::Param(param.id), Box::new(field), vec![])?;
        }

        Self::mount_color_components(app, editor, 0)?;
        Ok(())
    }

    /// Remount the color list and staging field from the editor state.
    fn sync_color_components(app: &mut Application<Id, Msg, UserEvent>, editor: &Editor) {
        let selected = match app.state(&Id::Colors) {
            Ok(State::One(StateValue::Usize(i))) => i,
            _ => 0,
        };

        let _ = app.umount(&Id::Colors);
        let _ = app.umount(&Id::NewColor);
        if let Err(e) = Self::mount_color_components(app, editor, selected) {
            tracing::error!("Failed to remount color components: {}", e);
        }
    }

    fn draw(app: &mut Application<Id, Msg, UserEvent>, model: &Model, frame: &mut Frame) {
        let area = frame.area();

        let main_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(6),    // Content
                Constraint::Length(1), // Status
            ])
            .split(area);

        let title = Paragraph::new(" paramedit ").style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(title, main_rows[0]);

        match model.host.editor() {
            Some(editor) => Self::draw_editor(app, editor, frame, main_rows[1]),
            None => {
                let empty = Paragraph::new("No editor mounted")
                    .style(Style::default().add_modifier(Modifier::DIM));
                frame.render_widget(empty, main_rows[1]);
            }
        }

        let status = model.message.clone().unwrap_or_else(|| {
            format_footer(EDITOR_FOOTER_ACTIONS, &[("edit", "Enter"), ("add", "Enter")])
        });
        let status_widget =
            Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(status_widget, main_rows[2]);

        if model.show_help {
            render_help(frame);
        }
    }

    fn draw_editor(
        app: &mut Application<Id, Msg, UserEvent>,
        editor: &Editor,
        frame: &mut Frame,
        area: Rect,
    ) {
        let params_height = params_block_height(editor.params().len());

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(params_height), Constraint::Min(4)])
            .split(area);

        // Parameters: one row per param in declaration order
        let params_block = Block::default().title(PARAMS_TITLE).borders(Borders::ALL);
        let params_inner = params_block.inner(sections[0]);
        frame.render_widget(params_block, sections[0]);

        let param_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(1); editor.params().len()])
            .split(params_inner);
        for (param, row) in editor.params().iter().zip(param_rows.iter()) {
            app.view(&Id::Param(param.id), frame, *row);
        }

        // Colors: list, then the staging field
        let colors_block = Block::default().title(COLORS_TITLE).borders(Borders::ALL);
        let colors_inner = colors_block.inner(sections[1]);
        frame.render_widget(colors_block, sections[1]);

        let color_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Staging field
            ])
            .split(colors_inner);
        app.view(&Id::Colors, frame, color_rows[0]);
        app.view(&Id::NewColor, frame, color_rows[2]);
    }
}

impl Activity for EditorActivity {
    fn on_create(&mut self, context: Context) {
        let mut app = Self::create_application();

        if let Some(editor) = context.model.host.editor() {
            self.focus = FocusManager::for_editor(editor);
            if let Err(e) = Self::mount_components(&mut app, editor) {
                tracing::error!("Failed to mount components: {}", e);
            }
            let _ = app.active(&self.focus.current_focus());
        }

        self.context = Some(context);
        self.app = Some(app);
    }

    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let (Some(app), Some(context)) = (self.app.as_mut(), self.context.as_mut()) else {
            self.exit_reason = Some(ExitReason::Quit);
            return Ok(());
        };
        let model = &mut context.model;

        terminal.draw(|frame| Self::draw(app, model, frame))?;

        // Help modal intercepts all input while visible
        if model.show_help {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
                        model.update(Some(Msg::HideHelp));
                    }
                    _ => {}
                }
            }
            return Ok(());
        }

        // Timeouts are expected; just draw again
        let Ok(messages) = app.tick(PollStrategy::Once) else {
            return Ok(());
        };

        let mut needs_sync = false;

        for msg in messages {
            match &msg {
                Msg::FocusNext => {
                    let next = self.focus.focus_next();
                    let _ = app.active(&next);
                }
                Msg::FocusPrev => {
                    let prev = self.focus.focus_prev();
                    let _ = app.active(&prev);
                }
                Msg::SwitchToSnapshotPreview => {
                    self.exit_reason = Some(ExitReason::SwitchToSnapshotPreview);
                    return Ok(());
                }
                Msg::Quit => {
                    self.exit_reason = Some(ExitReason::Quit);
                    return Ok(());
                }
                _ => {}
            }

            // Process through model, handle chained messages
            let mut current = Some(msg);
            while let Some(m) = current {
                if matches!(m, Msg::ColorsChanged) {
                    needs_sync = true;
                }
                current = model.update(Some(m));
            }
        }

        if needs_sync && let Some(editor) = model.host.editor() {
            Self::sync_color_components(app, editor);
            let _ = app.active(&self.focus.current_focus());
        }

        Ok(())
    }

    fn will_umount(&self) -> Option<&ExitReason> {
        self.exit_reason.as_ref()
    }

    fn on_destroy(&mut self) -> Option<Context> {
        self.app = None;
        self.context.take()
    }
}
