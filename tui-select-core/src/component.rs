//! Component trait for UI elements driven by props

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI component that renders from props and emits actions
///
/// Components follow these rules:
/// 1. Props contain ALL caller-owned data needed for rendering
/// 2. `handle_event` returns actions, never mutates caller-owned state
/// 3. `render` is a function of props plus internal UI state
///
/// Internal UI state (open/closed, search text, scroll offset, hit areas of the
/// last render) lives in `&mut self`. Anything the caller owns, such as the
/// current selection, only changes through returned actions.
///
/// # Example
///
/// ```ignore
/// use tui_select::{Component, EventKind, Frame, Rect};
///
/// struct Checkbox;
///
/// struct CheckboxProps {
///     checked: bool,
///     on_toggle: fn(bool) -> AppAction,
/// }
///
/// impl Component<AppAction> for Checkbox {
///     type Props<'a> = CheckboxProps;
///
///     fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> impl IntoIterator<Item = AppAction> {
///         event.left_click().map(|_| (props.on_toggle)(!props.checked))
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         let mark = if props.checked { "[x]" } else { "[ ]" };
///         frame.render_widget(Paragraph::new(mark), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Data required to render the component
    type Props<'a>
    where
        Self: 'a;

    /// Handle an event and return actions to dispatch
    ///
    /// Returns any type implementing `IntoIterator<Item = A>`:
    /// - `None` - no actions (most common)
    /// - `Some(action)` - single action
    /// - `vec![...]` - multiple actions
    ///
    /// Default implementation returns no actions (render-only components).
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
