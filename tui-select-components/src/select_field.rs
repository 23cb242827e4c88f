//! Select field with optional search, multi-select chips and portal menus

use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

use ratatui::{
    layout::{Position, Rect},
    Frame,
};
use tokio::time::Instant;
use tracing::{debug, warn};
use tui_select_core::{anchored_rect, Component, Deferred, EventKind, FeatureToggles, Portal};

use crate::config::{EffectiveConfig, DEFAULT_PLACEHOLDER, DEFAULT_Z_INDEX};
use crate::control::{self, ControlContent, ControlView};
use crate::filter::filter_indices;
use crate::highlight::Highlighter;
use crate::menu::{self, MenuView, SEARCH_PLACEHOLDER};
use crate::option::{OptionItem, Selection};
use crate::text_input::{TextInput, TextInputProps};

/// Delay between focus leaving the field and the menu closing
pub const BLUR_CLOSE_DELAY: Duration = Duration::from_millis(150);

/// Props for [`SelectField`]
pub struct SelectFieldProps<'a, T, A> {
    /// Full candidate list
    pub options: &'a [T],
    /// Current selection, owned by the caller
    pub value: &'a Selection<T>,
    /// Builds the action carrying the new selection
    pub on_change: fn(Selection<T>) -> A,
    pub multiple: bool,
    pub searchable: bool,
    pub use_portal: bool,
    /// Label override; defaults to [`OptionItem::label`]
    pub render_option: Option<&'a dyn Fn(&T) -> String>,
    /// Search predicate override; defaults to a case-insensitive label match
    pub filter_function: Option<&'a dyn Fn(&T, &str) -> bool>,
    /// Stacking order of the portal layer
    pub z_index: u16,
    /// Per-instance overrides of `searchable`, `use_portal` and `multiple`
    pub feature_toggles: Option<&'a FeatureToggles>,
    pub placeholder: &'a str,
    pub is_focused: bool,
    /// Top-level layer host, only read while rendering
    pub portal: Option<&'a mut dyn Portal>,
}

impl<'a, T, A> SelectFieldProps<'a, T, A> {
    pub fn new(
        options: &'a [T],
        value: &'a Selection<T>,
        on_change: fn(Selection<T>) -> A,
    ) -> Self {
        Self {
            options,
            value,
            on_change,
            multiple: false,
            searchable: false,
            use_portal: false,
            render_option: None,
            filter_function: None,
            z_index: DEFAULT_Z_INDEX,
            feature_toggles: None,
            placeholder: DEFAULT_PLACEHOLDER,
            is_focused: false,
            portal: None,
        }
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn use_portal(mut self, use_portal: bool) -> Self {
        self.use_portal = use_portal;
        self
    }

    pub fn render_option(mut self, render: &'a dyn Fn(&T) -> String) -> Self {
        self.render_option = Some(render);
        self
    }

    pub fn filter_function(mut self, filter: &'a dyn Fn(&T, &str) -> bool) -> Self {
        self.filter_function = Some(filter);
        self
    }

    pub fn z_index(mut self, z_index: u16) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn feature_toggles(mut self, toggles: &'a FeatureToggles) -> Self {
        self.feature_toggles = Some(toggles);
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, is_focused: bool) -> Self {
        self.is_focused = is_focused;
        self
    }

    pub fn portal(mut self, portal: &'a mut dyn Portal) -> Self {
        self.portal = Some(portal);
        self
    }

    /// Settings after applying the feature toggles
    pub fn config(&self) -> EffectiveConfig<'a> {
        EffectiveConfig::resolve(
            self.searchable,
            self.use_portal,
            self.multiple,
            self.z_index,
            self.placeholder,
            self.feature_toggles,
        )
    }
}

impl<T: OptionItem, A> SelectFieldProps<'_, T, A> {
    /// Text shown for `option`
    pub fn option_label(&self, option: &T) -> String {
        match self.render_option {
            Some(render) => render(option),
            None => option.label().into_owned(),
        }
    }

    /// Indices into `options` visible for `search`
    pub fn visible_indices(&self, config: &EffectiveConfig<'_>, search: &str) -> Vec<usize> {
        if !config.searchable {
            return (0..self.options.len()).collect();
        }
        match self.filter_function {
            Some(filter) => filter_indices(self.options, search, |opt, s| filter(opt, s)),
            None => {
                let matcher = Highlighter::new(search);
                filter_indices(self.options, search, |opt, _| {
                    matcher
                        .as_ref()
                        .is_none_or(|m| m.is_match(&self.option_label(opt)))
                })
            }
        }
    }

    fn control_content(&self, config: &EffectiveConfig<'_>) -> ControlContent {
        if config.multiple {
            let items = self.value.multiple();
            if items.is_empty() {
                ControlContent::Placeholder(config.placeholder.to_string())
            } else {
                ControlContent::Chips(items.iter().map(|v| self.option_label(v)).collect())
            }
        } else {
            match self.value.single() {
                Some(v) => ControlContent::Label(self.option_label(v)),
                None => ControlContent::Placeholder(config.placeholder.to_string()),
            }
        }
    }
}

/// Click targets from the last render
#[derive(Debug, Default)]
struct HitAreas {
    control: Rect,
    menu: Option<Rect>,
    /// Option row → index into `options`
    options: Vec<(Rect, usize)>,
    /// Chip `×` → index into the selection
    chip_removes: Vec<(Rect, usize)>,
    /// Option rows the menu had room for
    option_rows: usize,
}

/// A dropdown select field
///
/// The selection lives with the caller: every change is reported through
/// `on_change` with the complete new [`Selection`], and the next render must
/// pass it back in. The field itself only keeps UI state: whether the menu is
/// open, the search text, scroll position and the pending blur close.
///
/// Click targets are taken from the previous render, so hosts render before
/// feeding mouse events (as any draw-then-poll loop does).
pub struct SelectField<T> {
    open: bool,
    search: String,
    search_input: TextInput,
    blur_close: Deferred,
    was_focused: bool,
    scroll_offset: usize,
    hits: HitAreas,
    _option: PhantomData<fn() -> T>,
}

impl<T> Default for SelectField<T> {
    fn default() -> Self {
        Self {
            open: false,
            search: String::new(),
            search_input: TextInput::new(),
            blur_close: Deferred::new(),
            was_focused: false,
            scroll_offset: 0,
            hits: HitAreas::default(),
            _option: PhantomData,
        }
    }
}

impl<T> fmt::Debug for SelectField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectField")
            .field("open", &self.open)
            .field("search", &self.search)
            .field("blur_close", &self.blur_close)
            .field("scroll_offset", &self.scroll_offset)
            .finish_non_exhaustive()
    }
}

impl<T> SelectField<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current search text, kept across close and reopen
    pub fn search_text(&self) -> &str {
        &self.search
    }

    /// Whether a blur close is waiting for its deadline
    pub fn is_close_pending(&self) -> bool {
        self.blur_close.is_pending()
    }

    /// Whether `pos` hit the control or the open menu in the last render
    ///
    /// Portal menus lie outside the field's area; hosts that move focus by
    /// hit-testing should ask the field first.
    pub fn contains(&self, pos: Position) -> bool {
        self.hits.control.contains(pos) || self.menu_contains(pos)
    }

    /// Whether `pos` hit the open menu in the last render
    ///
    /// A portal menu is drawn above everything else, so a click here belongs
    /// to this field even where the menu covers another component.
    pub fn menu_contains(&self, pos: Position) -> bool {
        self.open && self.hits.menu.is_some_and(|menu| menu.contains(pos))
    }

    fn set_open(&mut self, open: bool) {
        if self.open != open {
            debug!(open, "select menu toggled");
        }
        self.open = open;
        self.blur_close.cancel();
        if open {
            self.search_input.move_to_end(&self.search);
        } else {
            self.hits.menu = None;
            self.hits.options.clear();
        }
    }

    fn schedule_close(&mut self, reason: &'static str) {
        if self.open && !self.blur_close.is_pending() {
            debug!(reason, "select menu close scheduled");
            self.blur_close.schedule(BLUR_CLOSE_DELAY);
        }
    }

    fn track_focus(&mut self, is_focused: bool) {
        if self.was_focused && !is_focused {
            self.schedule_close("focus moved");
        }
        self.was_focused = is_focused;
    }

    fn poll_close(&mut self) {
        if self.blur_close.fire_if_due(Instant::now()) {
            self.set_open(false);
        }
    }

    fn scroll_by(&mut self, delta: isize, total: usize) {
        let max = total.saturating_sub(self.hits.option_rows);
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta).min(max);
    }
}

impl<T: OptionItem> SelectField<T> {
    /// Rows the control needs at `width`, growing with wrapped chips
    pub fn control_height<A>(&self, props: &SelectFieldProps<'_, T, A>, width: u16) -> u16 {
        let config = props.config();
        control::control_height(&props.control_content(&config), width)
    }

    /// Rows the field needs at `width`, including an open inline menu
    pub fn height<A>(&self, props: &SelectFieldProps<'_, T, A>, width: u16) -> u16 {
        let config = props.config();
        let control = control::control_height(&props.control_content(&config), width);
        if !self.open || config.use_portal {
            return control;
        }
        let count = props.visible_indices(&config, &self.search).len();
        control + menu::menu_height(config.searchable, count)
    }

    fn handle_click<A>(
        &mut self,
        pos: Position,
        config: &EffectiveConfig<'_>,
        props: &SelectFieldProps<'_, T, A>,
    ) -> Option<A> {
        if config.multiple {
            let chip = self.hits.chip_removes.iter().find(|(r, _)| r.contains(pos));
            if let Some(&(_, index)) = chip {
                self.blur_close.cancel();
                let item = props.value.multiple().get(index)?;
                debug!(index, "select chip removed");
                return Some((props.on_change)(Selection::Multiple(props.value.without(item))));
            }
        }

        if self.open {
            if let Some(&(_, index)) = self.hits.options.iter().find(|(r, _)| r.contains(pos)) {
                self.blur_close.cancel();
                let option = props.options.get(index)?;
                return Some(self.select(option, config, props));
            }
            if self.menu_contains(pos) {
                self.blur_close.cancel();
                return None;
            }
        }

        if self.hits.control.contains(pos) {
            self.set_open(!self.open);
            return None;
        }

        self.schedule_close("click outside");
        None
    }

    fn select<A>(
        &mut self,
        option: &T,
        config: &EffectiveConfig<'_>,
        props: &SelectFieldProps<'_, T, A>,
    ) -> A {
        if config.multiple {
            (props.on_change)(Selection::Multiple(props.value.toggled(option)))
        } else {
            self.set_open(false);
            (props.on_change)(Selection::Single(Some(option.clone())))
        }
    }

    fn edit_search(&mut self, event: &EventKind) {
        let edited = Component::<String>::handle_event(
            &mut self.search_input,
            event,
            TextInputProps {
                value: &self.search,
                placeholder: SEARCH_PLACEHOLDER,
                is_focused: true,
                show_border: false,
                on_change: std::convert::identity,
            },
        )
        .into_iter()
        .next();

        if let Some(search) = edited {
            debug!(%search, "select search changed");
            self.search = search;
            self.scroll_offset = 0;
        }
    }
}

impl<T: OptionItem, A> Component<A> for SelectField<T> {
    type Props<'a>
        = SelectFieldProps<'a, T, A>
    where
        Self: 'a;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        let config = props.config();
        self.track_focus(props.is_focused);
        self.poll_close();

        match event {
            EventKind::Mouse(_) => match event.left_click() {
                Some(pos) => self.handle_click(pos, &config, &props),
                None => None,
            },
            EventKind::Scroll { column, row, delta } => {
                let over_menu = self
                    .hits
                    .menu
                    .is_some_and(|menu| menu.contains(Position::new(*column, *row)));
                if self.open && over_menu {
                    let total = props.visible_indices(&config, &self.search).len();
                    self.scroll_by(*delta, total);
                }
                None
            }
            EventKind::FocusLost => {
                self.schedule_close("terminal focus lost");
                None
            }
            EventKind::Key(_) if self.open && config.searchable && props.is_focused => {
                self.edit_search(event);
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, mut props: Self::Props<'_>) {
        let config = props.config();
        self.track_focus(props.is_focused);
        self.poll_close();
        self.hits = HitAreas::default();
        if area.is_empty() {
            return;
        }

        let content = props.control_content(&config);
        let control_rect = Rect {
            height: control::control_height(&content, area.width).min(area.height),
            ..area
        };
        if let ControlContent::Chips(labels) = &content {
            let inner = control::control_inner(control_rect);
            self.hits.chip_removes = control::layout_chips(labels, inner)
                .into_iter()
                .filter(|slot| slot.remove.y < inner.bottom())
                .map(|slot| (slot.remove, slot.index))
                .collect();
        }
        self.hits.control = control_rect;
        frame.render_widget(
            ControlView {
                content,
                focused: props.is_focused,
                open: self.open,
            },
            control_rect,
        );

        if !self.open {
            return;
        }

        let visible = props.visible_indices(&config, &self.search);
        let menu_height = menu::menu_height(config.searchable, visible.len());

        let portal = if config.use_portal {
            let portal = props.portal.take();
            if portal.is_none() {
                warn!("select field wants a portal but none was given, rendering inline");
            }
            portal
        } else {
            None
        };

        let menu_rect = match portal {
            Some(_) => anchored_rect(control_rect, menu_height, frame.area()),
            None => Rect::new(area.x, control_rect.bottom(), area.width, menu_height)
                .intersection(area),
        };
        if menu_rect.is_empty() {
            return;
        }

        let inner = menu::menu_inner(menu_rect);
        let search_rows = u16::from(config.searchable);
        let option_rows = usize::from(inner.height.saturating_sub(search_rows));
        self.scroll_offset = self
            .scroll_offset
            .min(visible.len().saturating_sub(option_rows));

        let highlighter = if config.searchable {
            Highlighter::new(&self.search)
        } else {
            None
        };

        let mut rows = Vec::with_capacity(option_rows);
        let window = visible
            .iter()
            .skip(self.scroll_offset)
            .take(option_rows)
            .filter_map(|&i| props.options.get(i).map(|opt| (i, opt)));
        for (row, (index, option)) in window.enumerate() {
            let label = props.option_label(option);
            let selected = if config.multiple {
                props.value.multiple().contains(option)
            } else {
                props.value.single() == Some(option)
            };
            rows.push(menu::option_line(
                &label,
                selected,
                config.multiple,
                highlighter.as_ref(),
            ));
            let y = inner.y + search_rows + row as u16;
            self.hits
                .options
                .push((Rect::new(inner.x, y, inner.width, 1), index));
        }
        self.hits.menu = Some(menu_rect);
        self.hits.option_rows = option_rows;

        let view = MenuView {
            search: config.searchable.then(|| self.search.clone()),
            rows,
            focused: props.is_focused,
        };
        match portal {
            Some(portal) => portal.mount(config.z_index, menu_rect, Box::new(view)),
            None => frame.render_widget(view, menu_rect),
        }

        if config.searchable && props.is_focused && !inner.is_empty() {
            let x = inner.x + self.search_input.cursor_column(&self.search);
            if x < inner.right() {
                frame.set_cursor_position((x, inner.y));
            }
        }
    }
}
