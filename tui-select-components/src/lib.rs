//! Select field components for tui-select
//!
//! Components implement the `Component<A>` trait and emit actions via callback
//! functions passed through Props.
//!
//! # Components
//!
//! - [`SelectField`] - Dropdown select with search, multi-select chips and
//!   portal-rendered menus
//! - [`TextInput`] - Single-line text input with cursor (the search box)
//!
//! # Example
//!
//! ```ignore
//! use tui_select_components::{SelectField, SelectFieldProps, Selection};
//!
//! let mut field = SelectField::new();
//! field.render(
//!     frame,
//!     area,
//!     SelectFieldProps::new(&state.fruit, &state.picked, Action::Picked)
//!         .multiple(true)
//!         .searchable(true)
//!         .focused(state.focus == Focus::Fruit),
//! );
//! ```

pub mod config;
mod control;
mod filter;
mod highlight;
mod menu;
mod option;
mod select_field;
mod text_input;

pub use config::{toggle, EffectiveConfig, DEFAULT_PLACEHOLDER, DEFAULT_Z_INDEX};
pub use control::{layout_chips, ChipSlot, CHIP_REMOVE};
pub use filter::{filter_indices, label_matches};
pub use highlight::{Highlighter, Segment};
pub use menu::{EMPTY_TEXT, MAX_VISIBLE_OPTIONS, SEARCH_PLACEHOLDER};
pub use option::{OptionItem, SelectOption, Selection};
pub use select_field::{SelectField, SelectFieldProps, BLUR_CLOSE_DELAY};
pub use text_input::{TextInput, TextInputProps};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        OptionItem, SelectField, SelectFieldProps, SelectOption, Selection, TextInput,
        TextInputProps,
    };
}
