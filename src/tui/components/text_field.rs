//! Single-line text input Component.
//!
//! Enter starts editing; while editing every keystroke is reported upward so
//! the model always mirrors what is on screen.

use crossterm_actions::{InputEvent, SelectionEvent, TuiEvent};
use ratatui::Frame;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection, Position},
    event::{Key, KeyModifiers},
    props::{AttrValue, Attribute, Props},
};

use crate::tui::activities::{Msg, UserEvent};
use crate::tui::{AppAction, dispatcher, handle_global_app_events};

/// Width of the label column, in cells.
pub const LABEL_WIDTH: u16 = 16;

/// What an edit in the field updates (determines which Msg to send).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    /// Value of the parameter with this id
    Param(u32),
    /// Staging text for the next color
    NewColor,
}

/// Labelled text input bound to a parameter value or the color staging text.
pub struct TextField {
    props: Props,
    label: String,
    value: String,
    placeholder: String,
    target: FieldTarget,
    editing: bool,
    /// Cursor position in chars, not bytes
    cursor: usize,
    /// Value when editing started, restored on Esc
    original: String,
}

impl TextField {
    pub fn new(label: impl Into<String>, value: impl Into<String>, target: FieldTarget) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self {
            props: Props::default(),
            label: label.into(),
            value,
            placeholder: String::new(),
            target,
            editing: false,
            cursor,
            original: String::new(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    fn focused(&self) -> bool {
        self.props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn start_editing(&mut self) {
        self.editing = true;
        self.original = self.value.clone();
        self.cursor = self.value.chars().count();
    }

    fn stop_editing(&mut self) {
        self.editing = false;
        self.original.clear();
    }

    /// Restore the value from before editing. Returns true if it changed.
    fn cancel_editing(&mut self) -> bool {
        let changed = self.value != self.original;
        self.value = std::mem::take(&mut self.original);
        self.cursor = self.value.chars().count();
        self.editing = false;
        changed
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    fn delete_before(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    fn delete_at(&mut self) -> bool {
        if self.cursor >= self.value.chars().count() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    fn msg_for_change(&self) -> Msg {
        match self.target {
            FieldTarget::Param(id) => Msg::ParamChanged(id, self.value.clone()),
            FieldTarget::NewColor => Msg::NewColorNameChanged(self.value.clone()),
        }
    }

    fn changed_msg(&mut self, cmd: Cmd) -> Option<Msg> {
        match self.perform(cmd) {
            CmdResult::Changed(_) => Some(self.msg_for_change()),
            _ => None,
        }
    }

    /// Raw key handling while editing. Bypasses the dispatcher so that
    /// bound letters like `q` or `s` are typed instead of triggering actions.
    fn on_editing_key(&mut self, code: Key, modifiers: KeyModifiers) -> Option<Msg> {
        match code {
            Key::Enter => {
                self.stop_editing();
                match self.target {
                    FieldTarget::NewColor => Some(Msg::AddColor),
                    FieldTarget::Param(_) => None,
                }
            }
            Key::Esc => {
                if self.cancel_editing() {
                    Some(self.msg_for_change())
                } else {
                    None
                }
            }
            Key::Tab => {
                self.stop_editing();
                Some(Msg::FocusNext)
            }
            Key::BackTab => {
                self.stop_editing();
                Some(Msg::FocusPrev)
            }
            Key::Backspace => self.changed_msg(Cmd::Delete),
            Key::Delete => self.changed_msg(Cmd::Cancel),
            Key::Left => {
                self.perform(Cmd::Move(CmdDirection::Left));
                None
            }
            Key::Right => {
                self.perform(Cmd::Move(CmdDirection::Right));
                None
            }
            Key::Home => {
                self.perform(Cmd::GoTo(Position::Begin));
                None
            }
            Key::End => {
                self.perform(Cmd::GoTo(Position::End));
                None
            }
            Key::Char(c)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.changed_msg(Cmd::Type(c))
            }
            _ => None,
        }
    }
}

impl MockComponent for TextField {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self.focused();

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(LABEL_WIDTH), Constraint::Min(10)])
            .split(area);

        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let label = match self.target {
            FieldTarget::Param(_) => format!("{}:", self.label),
            FieldTarget::NewColor => self.label.clone(),
        };
        frame.render_widget(Paragraph::new(label).style(label_style), cols[0]);

        let line = if self.editing {
            let at = self.byte_index(self.cursor);
            let (before, rest) = self.value.split_at(at);
            let mut chars = rest.chars();
            let under = chars.next().map_or(" ".to_string(), String::from);
            let after: String = chars.collect();
            let edit_style = Style::default().fg(Color::White).bg(Color::DarkGray);
            Line::from(vec![
                Span::styled(before.to_string(), edit_style),
                Span::styled(under, edit_style.add_modifier(Modifier::REVERSED)),
                Span::styled(after, edit_style),
            ])
        } else if self.value.is_empty() {
            Line::from(Span::styled(
                self.placeholder.clone(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            let style = if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            Line::from(Span::styled(self.value.clone(), style))
        };

        frame.render_widget(Paragraph::new(line), cols[1]);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::String(self.value.clone()))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Type(c) => {
                self.insert_char(c);
                CmdResult::Changed(self.state())
            }
            Cmd::Delete => {
                if self.delete_before() {
                    CmdResult::Changed(self.state())
                } else {
                    CmdResult::None
                }
            }
            Cmd::Cancel => {
                if self.delete_at() {
                    CmdResult::Changed(self.state())
                } else {
                    CmdResult::None
                }
            }
            Cmd::Move(CmdDirection::Left) => {
                self.cursor = self.cursor.saturating_sub(1);
                CmdResult::None
            }
            Cmd::Move(CmdDirection::Right) => {
                self.cursor = (self.cursor + 1).min(self.value.chars().count());
                CmdResult::None
            }
            Cmd::GoTo(Position::Begin) => {
                self.cursor = 0;
                CmdResult::None
            }
            Cmd::GoTo(Position::End) => {
                self.cursor = self.value.chars().count();
                CmdResult::None
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for TextField {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        if !self.focused() {
            return None;
        }

        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        if self.editing {
            return self.on_editing_key(key_event.code, key_event.modifiers);
        }

        let action = dispatcher().dispatch(&key_event)?;

        if let Some(msg) = handle_global_app_events(&action) {
            return Some(msg);
        }

        match action {
            AppAction::Tui(TuiEvent::Input(InputEvent::Confirm)) => {
                self.start_editing();
                None
            }
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)) => Some(Msg::FocusNext),
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)) => Some(Msg::FocusPrev),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tuirealm::event::KeyEvent;

    fn key(code: Key) -> Event<UserEvent> {
        Event::Keyboard(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn focused_field(value: &str, target: FieldTarget) -> TextField {
        let mut field = TextField::new("Длина", value, target);
        field.attr(Attribute::Focus, AttrValue::Flag(true));
        field.start_editing();
        field
    }

    #[test]
    fn every_keystroke_reports_value() {
        let mut field = focused_field("мак", FieldTarget::Param(2));
        assert_eq!(
            field.on(key(Key::Char('с'))),
            Some(Msg::ParamChanged(2, "макс".into()))
        );
        assert_eq!(
            field.on(key(Key::Char('и'))),
            Some(Msg::ParamChanged(2, "макси".into()))
        );
        assert_eq!(
            field.on(key(Key::Backspace)),
            Some(Msg::ParamChanged(2, "макс".into()))
        );
    }

    #[test]
    fn bound_letters_are_typed_while_editing() {
        let mut field = focused_field("", FieldTarget::NewColor);
        assert_eq!(
            field.on(key(Key::Char('q'))),
            Some(Msg::NewColorNameChanged("q".into()))
        );
        assert!(field.is_editing());
    }

    #[test]
    fn cursor_moves_over_multibyte_chars() {
        let mut field = focused_field("ab", FieldTarget::Param(1));
        field.on(key(Key::Left));
        field.on(key(Key::Char('я')));
        assert_eq!(field.value(), "aяb");
        field.on(key(Key::Home));
        field.on(key(Key::Delete));
        assert_eq!(field.value(), "яb");
    }

    #[test]
    fn escape_restores_original() {
        let mut field = focused_field("old", FieldTarget::Param(1));
        field.on(key(Key::Char('!')));
        assert_eq!(
            field.on(key(Key::Esc)),
            Some(Msg::ParamChanged(1, "old".into()))
        );
        assert!(!field.is_editing());
        assert_eq!(field.value(), "old");
    }

    #[test]
    fn enter_in_staging_field_adds_color() {
        let mut field = focused_field("Red", FieldTarget::NewColor);
        assert_eq!(field.on(key(Key::Enter)), Some(Msg::AddColor));
        assert!(!field.is_editing());
    }

    #[test]
    fn enter_in_param_field_only_stops_editing() {
        let mut field = focused_field("x", FieldTarget::Param(1));
        assert_eq!(field.on(key(Key::Enter)), None);
        assert!(!field.is_editing());
    }

    #[test]
    fn unfocused_field_ignores_keys() {
        let mut field = TextField::new("Длина", "", FieldTarget::Param(1));
        assert_eq!(field.on(key(Key::Char('x'))), None);
        assert_eq!(field.value(), "");
    }
}
