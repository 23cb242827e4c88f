//! Core traits and types for tui-select
//!
//! The pieces a select field needs from its host, kept independent of the
//! component itself:
//!
//! - **Component**: UI elements that render from props and return actions
//! - **Action / Store**: the host keeps caller-owned state (the selection)
//!   and reduces the component's actions into it
//! - **EventKind / EventContext**: input events and hit-testing
//! - **FeatureToggles**: per-instance runtime overrides
//! - **Deferred**: component-owned delayed work (the blur close)
//! - **LayerStack / Portal**: top-level layers for menus that must not be
//!   clipped
//!
//! # Host loop
//!
//! ```ignore
//! use tui_select_core::prelude::*;
//!
//! let mut store = Store::new(FormState::default(), reducer);
//! loop {
//!     terminal.draw(|frame| {
//!         let mut layers = LayerStack::new();
//!         field.render(frame, area, props(store.state()).portal(&mut layers));
//!         layers.flush(frame);
//!     })?;
//!
//!     let event = process_raw_event(event_rx.recv().await?);
//!     for action in field.handle_event(&event, props(store.state())) {
//!         store.dispatch(action);
//!     }
//! }
//! ```

pub mod action;
pub mod bus;
pub mod component;
pub mod deferred;
pub mod event;
pub mod features;
pub mod layer;
pub mod store;
pub mod testing;

// Core trait exports
pub use action::Action;
pub use component::Component;
pub use deferred::Deferred;
pub use features::FeatureToggles;
pub use layer::{anchored_rect, LayerContent, LayerStack, Portal};

// Event system exports
pub use bus::{process_raw_event, spawn_event_poller, RawEvent};
pub use event::{ComponentId, EventContext, EventKind};

// Store exports
pub use store::{LoggingMiddleware, Middleware, Reducer, Store, StoreWithMiddleware};

// Re-export ratatui types for convenience
pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

// Testing exports
pub use testing::{
    buffer_rect_to_string_plain, buffer_to_string_plain, char_key, click, ctrl_key, key, scroll,
    type_text, RenderHarness, TestHarness,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::bus::{process_raw_event, spawn_event_poller, RawEvent};
    pub use crate::component::Component;
    pub use crate::deferred::Deferred;
    pub use crate::event::{ComponentId, EventContext, EventKind};
    pub use crate::features::FeatureToggles;
    pub use crate::layer::{anchored_rect, LayerContent, LayerStack, Portal};
    pub use crate::store::{
        LoggingMiddleware, Middleware, Reducer, Store, StoreWithMiddleware,
    };

    // Re-export ratatui types
    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
