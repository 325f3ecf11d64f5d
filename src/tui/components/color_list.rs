//! Color list Component with per-row delete.

use crossterm_actions::{NavigationEvent, SelectionEvent, TuiEvent};
use ratatui::Frame;
use ratatui::{
    layout::Rect,
    style::{Color as TermColor, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection},
    event::Key,
    props::{AttrValue, Attribute, Props},
};

use crate::editor::Color;
use crate::tui::activities::{Msg, UserEvent};
use crate::tui::{AppAction, dispatcher, handle_global_app_events};

/// Label of the delete control shown next to the selected color.
pub const DELETE_LABEL: &str = "Удалить";

/// Swatch color for names that parse as CSS colors ("red", "#3366ff", ...).
fn swatch(name: &str) -> Option<TermColor> {
    let parsed = name.parse::<csscolorparser::Color>().ok()?;
    let [r, g, b, _] = parsed.to_rgba8();
    Some(TermColor::Rgb(r, g, b))
}

/// Colors in display order; the selected row can be deleted.
pub struct ColorList {
    props: Props,
    colors: Vec<Color>,
    selected: usize,
}

impl ColorList {
    pub fn new(colors: Vec<Color>, selected: usize) -> Self {
        let selected = selected.min(colors.len().saturating_sub(1));
        Self {
            props: Props::default(),
            colors,
            selected,
        }
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.colors.get(self.selected).map(|c| c.id)
    }

    fn focused(&self) -> bool {
        self.props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag()
    }

    fn delete_selected(&self) -> Option<Msg> {
        self.selected_id().map(Msg::DeleteColor)
    }
}

impl MockComponent for ColorList {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self.focused();

        if self.colors.is_empty() {
            let empty = Paragraph::new("—").style(Style::default().fg(TermColor::DarkGray));
            frame.render_widget(empty, area);
            return;
        }

        // Keep the selected row visible
        let height = area.height.max(1) as usize;
        let offset = (self.selected + 1).saturating_sub(height);

        let lines: Vec<Line> = self
            .colors
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(i, color)| {
                let selected = focused && i == self.selected;
                let name_style = if selected {
                    Style::default()
                        .fg(TermColor::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };

                let mut spans = vec![match swatch(&color.name) {
                    Some(c) => Span::styled("■ ", Style::default().fg(c)),
                    None => Span::raw("  "),
                }];
                spans.push(Span::styled(color.name.clone(), name_style));
                if selected {
                    spans.push(Span::styled(
                        format!("  [{DELETE_LABEL}: d]"),
                        Style::default().fg(TermColor::DarkGray),
                    ));
                }
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::Usize(self.selected))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Move(CmdDirection::Up) => {
                self.selected = self.selected.saturating_sub(1);
                CmdResult::Changed(self.state())
            }
            Cmd::Move(CmdDirection::Down) => {
                if self.selected + 1 < self.colors.len() {
                    self.selected += 1;
                }
                CmdResult::Changed(self.state())
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for ColorList {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        if !self.focused() {
            return None;
        }

        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        if key_event.code == Key::Delete {
            return self.delete_selected();
        }

        let action = dispatcher().dispatch(&key_event)?;

        if let Some(msg) = handle_global_app_events(&action) {
            return Some(msg);
        }

        match action {
            AppAction::DeleteColor => self.delete_selected(),

            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)) => Some(Msg::FocusNext),
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)) => Some(Msg::FocusPrev),

            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => {
                self.perform(Cmd::Move(CmdDirection::Up));
                None
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => {
                self.perform(Cmd::Move(CmdDirection::Down));
                None
            }

            _ => None,
        }
    }
}
