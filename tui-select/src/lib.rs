//! tui-select: searchable single and multi select fields for ratatui apps
//!
//! The field renders the caller's current selection, opens a menu of options
//! on click, filters them as you type and reports every change as a complete
//! new [`Selection`] through an action the host dispatches. Menus can render
//! inline or through a [`LayerStack`] so they are not clipped by the area the
//! field was given.
//!
//! # Example
//! ```ignore
//! use tui_select::prelude::*;
//!
//! #[derive(Clone, Debug)]
//! enum FormAction {
//!     FruitChanged(Selection<SelectOption<u32>>),
//! }
//!
//! terminal.draw(|frame| {
//!     let mut layers = LayerStack::new();
//!     field.render(
//!         frame,
//!         area,
//!         SelectFieldProps::new(&fruit, &state.fruit, FormAction::FruitChanged)
//!             .searchable(true)
//!             .use_portal(true)
//!             .portal(&mut layers),
//!     );
//!     layers.flush(frame);
//! })?;
//! ```

// Re-export everything from core
pub use tui_select_core::*;

// Re-export the components
pub use tui_select_components::*;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use tui_select_core::{Action, Component};

    // Event system
    pub use tui_select_core::{
        process_raw_event, spawn_event_poller, ComponentId, EventContext, EventKind, RawEvent,
    };

    // Store
    pub use tui_select_core::{
        LoggingMiddleware, Middleware, Reducer, Store, StoreWithMiddleware,
    };

    // Layers, toggles and timers
    pub use tui_select_core::{anchored_rect, Deferred, FeatureToggles, LayerStack, Portal};

    // Components
    pub use tui_select_components::{
        EffectiveConfig, OptionItem, SelectField, SelectFieldProps, SelectOption, Selection,
        TextInput, TextInputProps,
    };

    // Ratatui re-exports
    pub use tui_select_core::{Color, Frame, Line, Modifier, Rect, Span, Style, Text};
}
