//! Event types and hit-testing context

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::collections::HashMap;

/// Unique identifier for a hosted component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(pub u32);

/// The event payload delivered to components
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse click/drag/move event
    Mouse(MouseEvent),
    /// Scroll event with position and delta
    Scroll { column: u16, row: u16, delta: isize },
    /// Terminal resize
    Resize(u16, u16),
    /// Periodic tick, drives deferred work
    Tick,
    /// The terminal window gained focus
    FocusGained,
    /// The terminal window lost focus
    FocusLost,
}

impl EventKind {
    /// Position of a left-button press, if this is one
    pub fn left_click(&self) -> Option<Position> {
        match self {
            EventKind::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Some(Position::new(*column, *row)),
            _ => None,
        }
    }

    /// Check if this is Ctrl+C, which hosts treat as an unconditional quit
    pub fn is_interrupt(&self) -> bool {
        match self {
            EventKind::Key(key) => {
                key.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(key.code, KeyCode::Char('c'))
            }
            _ => false,
        }
    }
}

/// Host-side context for focus and hit-testing
///
/// Hosts record the area each component was rendered into, then use it to move
/// focus on clicks.
#[derive(Debug, Clone, Default)]
pub struct EventContext {
    /// Currently focused component
    pub focused_component: Option<ComponentId>,
    /// Last known mouse position
    pub mouse_position: Option<(u16, u16)>,
    /// Component areas for hit-testing
    pub component_areas: HashMap<ComponentId, Rect>,
}

impl EventContext {
    /// Create a new event context
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a component is focused
    pub fn is_focused(&self, component: ComponentId) -> bool {
        self.focused_component == Some(component)
    }

    /// Check if a point is within a component's area
    pub fn point_in_component(&self, component: ComponentId, x: u16, y: u16) -> bool {
        self.component_areas
            .get(&component)
            .is_some_and(|area| area.contains(Position::new(x, y)))
    }

    /// Get the component at a given point
    pub fn component_at(&self, x: u16, y: u16) -> Option<ComponentId> {
        self.component_areas
            .iter()
            .find(|(_, area)| area.contains(Position::new(x, y)))
            .map(|(&id, _)| id)
    }

    /// Update the area for a component
    pub fn set_component_area(&mut self, component: ComponentId, area: Rect) {
        self.component_areas.insert(component, area);
    }

    /// Set the focused component
    pub fn set_focus(&mut self, component: Option<ComponentId>) {
        self.focused_component = component;
    }

    /// Update the focus from a click position
    ///
    /// Returns the newly focused component, if the click hit one.
    pub fn focus_at(&mut self, x: u16, y: u16) -> Option<ComponentId> {
        self.mouse_position = Some((x, y));
        let hit = self.component_at(x, y);
        self.focused_component = hit;
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> EventKind {
        EventKind::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_left_click_position() {
        let event = mouse(MouseEventKind::Down(MouseButton::Left), 4, 7);
        assert_eq!(event.left_click(), Some(Position::new(4, 7)));

        let event = mouse(MouseEventKind::Down(MouseButton::Right), 4, 7);
        assert_eq!(event.left_click(), None);

        let event = mouse(MouseEventKind::Moved, 4, 7);
        assert_eq!(event.left_click(), None);
        assert_eq!(EventKind::Tick.left_click(), None);
    }

    #[test]
    fn test_interrupt() {
        let ctrl_c = EventKind::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        });
        assert!(ctrl_c.is_interrupt());

        let plain_c = EventKind::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));
        assert!(!plain_c.is_interrupt());
    }

    #[test]
    fn test_focus_at() {
        let mut ctx = EventContext::new();
        let first = ComponentId(1);
        let second = ComponentId(2);
        ctx.set_component_area(first, Rect::new(0, 0, 10, 3));
        ctx.set_component_area(second, Rect::new(0, 5, 10, 3));

        assert_eq!(ctx.focus_at(2, 6), Some(second));
        assert!(ctx.is_focused(second));
        assert!(ctx.point_in_component(second, 9, 7));
        assert!(!ctx.point_in_component(second, 10, 7));

        assert_eq!(ctx.focus_at(30, 30), None);
        assert_eq!(ctx.focused_component, None);
        assert_eq!(ctx.mouse_position, Some((30, 30)));
    }
}
