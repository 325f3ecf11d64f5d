//! Snapshot preview activity - shows the current snapshot as it would be saved.

use std::io::Stdout;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm_actions::{NavigationEvent, SelectionEvent, TuiEvent};
use ratatui::{
    Terminal,
    layout::{Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use tuirealm::{
    Application, Component, Event, EventListenerCfg, MockComponent, PollStrategy, State,
    StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection},
    props::{AttrValue, Attribute, Props},
};

use crate::export::{ExportFormat, render};
use crate::tui::activity::{Activity, Context, ExitReason};
use crate::tui::components::{PREVIEW_FOOTER_ACTIONS, format_footer};
use crate::tui::highlighting::Highlighter;
use crate::tui::{AppAction, dispatcher, handle_global_app_events};

// ============================================================================
// Component identifiers (scoped to SnapshotPreviewActivity)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    SnapshotView,
}

// ============================================================================
// Messages (scoped to SnapshotPreviewActivity)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Quit,
    Back,
    NextFormat,
    PrevFormat,
    ScrollUp,
    ScrollDown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

// ============================================================================
// SnapshotView Component
// ============================================================================

/// Colors for the snapshot view from the highlighting theme.
pub struct SnapshotViewColors {
    pub background: Color,
    pub gutter_fg: Color,
}

/// Scrollable, line-numbered view of rendered snapshot text.
pub struct SnapshotView {
    props: Props,
    lines: Vec<Line<'static>>,
    scroll: usize,
    visible_height: usize,
    colors: SnapshotViewColors,
}

impl SnapshotView {
    pub fn new(colors: SnapshotViewColors, lines: Vec<Line<'static>>) -> Self {
        Self {
            props: Props::default(),
            lines,
            scroll: 0,
            visible_height: 20,
            colors,
        }
    }

    fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn scroll_down(&mut self) {
        let max_scroll = self.lines.len().saturating_sub(self.visible_height);
        self.scroll = (self.scroll + 1).min(max_scroll);
    }
}

impl MockComponent for SnapshotView {
    fn view(&mut self, frame: &mut ratatui::Frame, area: Rect) {
        let bg_style = Style::default().bg(self.colors.background);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(bg_style.fg(self.colors.gutter_fg))
            .style(bg_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.visible_height = inner.height as usize;

        let gutter_style = Style::default()
            .fg(self.colors.gutter_fg)
            .bg(self.colors.background);
        let visible_lines: Vec<Line> = self
            .lines
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(inner.height as usize)
            .map(|(i, line)| {
                let mut spans = vec![Span::styled(format!("{:4} ", i + 1), gutter_style)];
                spans.extend(line.spans.clone());
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(visible_lines).style(bg_style), inner);

        if self.lines.len() > inner.height as usize {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
            let mut scrollbar_state = ScrollbarState::new(self.lines.len()).position(self.scroll);
            frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
        }
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::Usize(self.scroll))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Scroll(CmdDirection::Up) => {
                self.scroll_up();
                CmdResult::Changed(self.state())
            }
            Cmd::Scroll(CmdDirection::Down) => {
                self.scroll_down();
                CmdResult::Changed(self.state())
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for SnapshotView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        // Esc is not mapped in the dispatcher
        if key_event.code == tuirealm::event::Key::Esc {
            return Some(Msg::Back);
        }

        let action = dispatcher().dispatch(&key_event)?;

        if let Some(msg) = handle_global_app_events(&action) {
            return match msg {
                crate::tui::activities::Msg::Quit => Some(Msg::Quit),
                crate::tui::activities::Msg::SwitchToSnapshotPreview => Some(Msg::Back),
                _ => None,
            };
        }

        match action {
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => {
                self.perform(Cmd::Scroll(CmdDirection::Up));
                Some(Msg::ScrollUp)
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => {
                self.perform(Cmd::Scroll(CmdDirection::Down));
                Some(Msg::ScrollDown)
            }

            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)) => Some(Msg::NextFormat),
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)) => Some(Msg::PrevFormat),

            _ => None,
        }
    }
}

// ============================================================================
// SnapshotPreviewActivity
// ============================================================================

#[derive(Default)]
pub struct SnapshotPreviewActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
    highlighter: Highlighter,
    format: ExportFormat,
    needs_clear: bool,
}

impl SnapshotPreviewActivity {
    fn create_application() -> Application<Id, Msg, UserEvent> {
        Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        )
    }

    fn view_colors(&self) -> SnapshotViewColors {
        SnapshotViewColors {
            background: self.highlighter.background_color(),
            gutter_fg: self.highlighter.gutter_color(),
        }
    }

    /// Render and highlight the editor's current snapshot in the active format.
    fn snapshot_lines(&self) -> Vec<Line<'static>> {
        let Some(editor) = self
            .context
            .as_ref()
            .and_then(|ctx| ctx.model.host.editor())
        else {
            return vec![Line::from("No editor mounted")];
        };

        match render(&editor.snapshot(), self.format) {
            Ok(text) => self.highlighter.highlight(&text, self.format.extension()),
            Err(e) => {
                tracing::error!("Failed to render snapshot: {e:#}");
                vec![Line::from(format!("Failed to render snapshot: {e}"))]
            }
        }
    }

    fn cycle_format(&mut self, forward: bool) {
        self.format = if forward {
            self.format.next()
        } else {
            self.format.prev()
        };
        self.needs_clear = true;
        self.remount_view();
    }

    fn remount_view(&mut self) {
        let view = SnapshotView::new(self.view_colors(), self.snapshot_lines());
        if let Some(ref mut app) = self.app {
            let _ = app.umount(&Id::SnapshotView);
            let _ = app.mount(Id::SnapshotView, Box::new(view), vec![]);
            let _ = app.active(&Id::SnapshotView);
        }
    }
}

impl Activity for SnapshotPreviewActivity {
    fn on_create(&mut self, context: Context) {
        self.format = context.model.format;
        self.context = Some(context);
        self.app = Some(Self::create_application());
        self.remount_view();
    }

    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        // Force full redraw when switching formats to prevent ghost text
        if self.needs_clear {
            terminal.clear()?;
            self.needs_clear = false;
        }

        let format = self.format;
        let Some(app) = self.app.as_mut() else {
            self.exit_reason = Some(ExitReason::SwitchToEditor);
            return Ok(());
        };

        terminal.draw(|frame| {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Title
                    Constraint::Min(5),    // Snapshot
                    Constraint::Length(1), // Status
                ])
                .split(frame.area());

            let title = format!(" Snapshot Preview - [{}]", format.display_name());
            let title_widget =
                Paragraph::new(title).style(Style::default().add_modifier(Modifier::BOLD));
            frame.render_widget(title_widget, rows[0]);

            app.view(&Id::SnapshotView, frame, rows[1]);

            let status = format_footer(PREVIEW_FOOTER_ACTIONS, &[("back", "Esc")]);
            let status_widget =
                Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
            frame.render_widget(status_widget, rows[2]);
        })?;

        let Ok(messages) = app.tick(PollStrategy::Once) else {
            return Ok(());
        };

        for msg in messages {
            match msg {
                Msg::Quit => {
                    self.exit_reason = Some(ExitReason::Quit);
                    return Ok(());
                }
                Msg::Back => {
                    self.exit_reason = Some(ExitReason::SwitchToEditor);
                    return Ok(());
                }
                Msg::NextFormat => self.cycle_format(true),
                Msg::PrevFormat => self.cycle_format(false),
                // Already handled in component
                Msg::ScrollUp | Msg::ScrollDown => {}
            }
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
