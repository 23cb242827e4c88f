//! Single-line text input component, used as the select field's search box

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_select_core::{Component, EventKind};
use unicode_width::UnicodeWidthStr;

/// Props for TextInput component
pub struct TextInputProps<'a, A> {
    /// Current input value
    pub value: &'a str,
    /// Placeholder text when empty
    pub placeholder: &'a str,
    /// Whether this component has focus
    pub is_focused: bool,
    /// Whether to draw a border
    pub show_border: bool,
    /// Callback when value changes
    pub on_change: fn(String) -> A,
}

/// A single-line text input with cursor
///
/// Handles typing, backspace, delete, cursor movement and the Ctrl+A/E/U
/// shortcuts. Emits `on_change` for every edit.
#[derive(Debug, Default)]
pub struct TextInput {
    /// Cursor position (byte index)
    cursor: usize,
}

impl TextInput {
    /// Create a new TextInput
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor position as a byte index into the value
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Place the cursor after the last character
    pub fn move_to_end(&mut self, value: &str) {
        self.cursor = value.len();
    }

    /// Display column of the cursor, clamped to `value`
    pub fn cursor_column(&self, value: &str) -> u16 {
        let end = self.cursor.min(value.len());
        let end = (0..=end).rev().find(|&i| value.is_char_boundary(i)).unwrap_or(0);
        u16::try_from(value[..end].width()).unwrap_or(u16::MAX)
    }

    /// The line shown for `value`: the text, or a dim placeholder when empty
    pub fn line(value: &str, placeholder: &str) -> Line<'static> {
        if value.is_empty() {
            Line::from(Span::styled(
                placeholder.to_string(),
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(value.to_string())
        }
    }

    /// Clamp cursor to valid range for the given value
    fn clamp_cursor(&mut self, value: &str) {
        self.cursor = self.cursor.min(value.len());
        while self.cursor > 0 && !value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    /// Move cursor left by one character
    fn move_cursor_left(&mut self, value: &str) {
        if let Some((i, _)) = value[..self.cursor].char_indices().last() {
            self.cursor = i;
        }
    }

    /// Move cursor right by one character
    fn move_cursor_right(&mut self, value: &str) {
        if let Some(c) = value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Insert character at cursor position
    fn insert_char(&mut self, value: &str, c: char) -> String {
        let mut new_value = String::with_capacity(value.len() + c.len_utf8());
        new_value.push_str(&value[..self.cursor]);
        new_value.push(c);
        new_value.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        new_value
    }

    /// Delete character before cursor (backspace)
    fn delete_char_before(&mut self, value: &str) -> Option<String> {
        let (char_start, _) = value[..self.cursor].char_indices().last()?;
        let mut new_value = String::with_capacity(value.len());
        new_value.push_str(&value[..char_start]);
        new_value.push_str(&value[self.cursor..]);
        self.cursor = char_start;
        Some(new_value)
    }

    /// Delete character at cursor (delete key)
    fn delete_char_at(&self, value: &str) -> Option<String> {
        let c = value[self.cursor..].chars().next()?;
        let mut new_value = String::with_capacity(value.len());
        new_value.push_str(&value[..self.cursor]);
        new_value.push_str(&value[self.cursor + c.len_utf8()..]);
        Some(new_value)
    }
}

impl<A> Component<A> for TextInput {
    type Props<'a> = TextInputProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused {
            return None;
        }

        self.clamp_cursor(props.value);

        let EventKind::Key(key) = event else {
            return None;
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                // Ctrl+A: move to start
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                // Ctrl+E: move to end
                KeyCode::Char('e') => {
                    self.cursor = props.value.len();
                    None
                }
                // Ctrl+U: clear line
                KeyCode::Char('u') if !props.value.is_empty() => {
                    self.cursor = 0;
                    Some((props.on_change)(String::new()))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                let new_value = self.insert_char(props.value, c);
                Some((props.on_change)(new_value))
            }
            KeyCode::Backspace => self
                .delete_char_before(props.value)
                .map(|v| (props.on_change)(v)),
            KeyCode::Delete => self
                .delete_char_at(props.value)
                .map(|v| (props.on_change)(v)),
            KeyCode::Left => {
                self.move_cursor_left(props.value);
                None
            }
            KeyCode::Right => {
                self.move_cursor_right(props.value);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = props.value.len();
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.clamp_cursor(props.value);

        let mut paragraph = Paragraph::new(Self::line(props.value, props.placeholder));
        if props.show_border {
            paragraph = paragraph.block(Block::default().borders(Borders::ALL).border_style(
                if props.is_focused {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                },
            ));
        }
        frame.render_widget(paragraph, area);

        if props.is_focused {
            let border_offset = u16::from(props.show_border);
            let cursor_x = area.x + border_offset + self.cursor_column(props.value);
            let cursor_y = area.y + border_offset;
            let max_x = area.right().saturating_sub(border_offset);
            if cursor_x < max_x && cursor_y < area.bottom() {
                frame.set_cursor_position((cursor_x, cursor_y));
            }
        }
    }
}
