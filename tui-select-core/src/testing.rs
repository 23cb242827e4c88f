//! Test utilities for components and hosts
//!
//! - [`key`], [`char_key`], [`ctrl_key`], [`type_text`]: keyboard input
//! - [`click`], [`scroll`]: mouse input at a cell
//! - [`RenderHarness`]: render into an in-memory terminal and read it back
//! - [`TestHarness`]: state plus an action channel for host-level tests
//! - Assertion macros for verifying emitted actions
//!
//! # Example
//!
//! ```ignore
//! use tui_select::testing::{click, RenderHarness};
//!
//! let mut render = RenderHarness::new(40, 12);
//! render.render(|frame| field.render(frame, frame.area(), props()));
//!
//! // Click the control, which was drawn on the first rows
//! let actions: Vec<_> = field.handle_event(&click(2, 1), props()).into_iter().collect();
//! assert!(actions.is_empty());
//! assert!(field.is_open());
//! ```

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Frame, Terminal};
use tokio::sync::mpsc;

use crate::event::EventKind;
use crate::Action;

/// Parse a key description like `"ctrl+u"`, `"backspace"` or `"a"`
fn parse_key(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim().to_lowercase();
    if key_str.is_empty() {
        return None;
    }

    let parts: Vec<&str> = key_str.split('+').collect();
    let mut modifiers = KeyModifiers::empty();
    let key_part = parts.last()?.trim();

    for part in &parts[..parts.len() - 1] {
        match part.trim() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => {}
        }
    }

    let code = match key_part {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "space" => KeyCode::Char(' '),
        c if c.chars().count() == 1 => KeyCode::Char(c.chars().next()?),
        _ => return None,
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// Create a key [`EventKind`] from a key string.
///
/// Key strings are case-insensitive; use [`char_key`] or [`type_text`] for
/// upper-case input.
///
/// # Examples
///
/// ```
/// use tui_select_core::testing::key;
/// use tui_select_core::EventKind;
/// use crossterm::event::{KeyCode, KeyModifiers};
///
/// let EventKind::Key(k) = key("ctrl+u") else { unreachable!() };
/// assert_eq!(k.code, KeyCode::Char('u'));
/// assert!(k.modifiers.contains(KeyModifiers::CONTROL));
/// ```
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> EventKind {
    EventKind::Key(parse_key(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s)))
}

/// Create a key event for a character with no modifiers.
pub fn char_key(c: char) -> EventKind {
    EventKind::Key(KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// Create a key event for a character with Ctrl modifier.
pub fn ctrl_key(c: char) -> EventKind {
    EventKind::Key(KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// One [`char_key`] event per character of `text`.
pub fn type_text(text: &str) -> Vec<EventKind> {
    text.chars().map(char_key).collect()
}

/// A left-button press at `(column, row)`.
pub fn click(column: u16, row: u16) -> EventKind {
    EventKind::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// A wheel event at `(column, row)`; positive `delta` scrolls down.
pub fn scroll(column: u16, row: u16, delta: isize) -> EventKind {
    EventKind::Scroll { column, row, delta }
}

/// Render components into an in-memory terminal.
///
/// ```
/// use ratatui::widgets::Paragraph;
/// use tui_select_core::testing::RenderHarness;
///
/// let mut render = RenderHarness::new(20, 2);
/// let output = render.render_to_string_plain(|frame| {
///     frame.render_widget(Paragraph::new("Select..."), frame.area());
/// });
/// assert_eq!(output.lines().next(), Some("Select..."));
/// ```
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with the given terminal size.
    ///
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("failed to create test terminal: {e}"));
        Self { terminal }
    }

    /// Render one frame and return a copy of the resulting buffer.
    ///
    /// # Panics
    ///
    /// Panics if drawing to the test backend fails.
    pub fn render<F>(&mut self, render: F) -> Buffer
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal
            .draw(render)
            .unwrap_or_else(|e| panic!("failed to draw test frame: {e}"));
        self.terminal.backend().buffer().clone()
    }

    /// Render one frame and return its text, one line per row.
    pub fn render_to_string_plain<F>(&mut self, render: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        let buffer = self.render(render);
        buffer_to_string_plain(&buffer)
    }
}

/// Buffer text, one line per row, trailing spaces trimmed.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    buffer_rect_to_string_plain(buffer, buffer.area)
}

/// Text of `rect` within `buffer`, one line per row, trailing spaces trimmed.
pub fn buffer_rect_to_string_plain(buffer: &Buffer, rect: Rect) -> String {
    let rect = rect.intersection(buffer.area);
    (rect.y..rect.bottom())
        .map(|y| {
            let line: String = (rect.x..rect.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generic test harness for hosts.
///
/// Holds a piece of host state and an action channel. Feed it whatever a
/// component's `handle_event` returned, then drain and assert.
///
/// ```ignore
/// let mut harness = TestHarness::<FormState, FormAction>::new(FormState::default());
/// harness.emit_all(field.handle_event(&click(2, 1), props));
/// let actions = harness.drain_emitted();
/// assert_emitted!(actions, FormAction::FruitChanged(_));
/// ```
pub struct TestHarness<S, A: Action> {
    /// The host state under test
    pub state: S,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action> TestHarness<S, A> {
    /// Create a new test harness with the given initial state.
    pub fn new(state: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    /// Emit a single action.
    pub fn emit(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// Emit everything a component returned from `handle_event`.
    pub fn emit_all(&self, actions: impl IntoIterator<Item = A>) {
        for action in actions {
            self.emit(action);
        }
    }

    /// Drain all emitted actions from the channel.
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Drain emitted actions and reduce each into the harness state.
    ///
    /// Returns the drained actions.
    pub fn reduce_emitted(&mut self, reducer: crate::Reducer<S, A>) -> Vec<A> {
        let actions = self.drain_emitted();
        for action in &actions {
            reducer(&mut self.state, action.clone());
        }
        actions
    }
}

impl<S: Default, A: Action> Default for TestHarness<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// Assert that a specific action was emitted.
///
/// # Example
///
/// ```ignore
/// let actions = harness.drain_emitted();
/// assert_emitted!(actions, FormAction::FruitChanged(Selection::Single(Some(_))));
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that a specific action was NOT emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Count how many actions match a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}
