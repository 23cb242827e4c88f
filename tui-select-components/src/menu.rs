//! The dropdown part of a select field

use ratatui::{
    buffer::Buffer,
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::highlight::Highlighter;
use crate::text_input::TextInput;

/// Most option rows a menu shows at once; the rest scroll
pub const MAX_VISIBLE_OPTIONS: usize = 8;

/// Placeholder of the search row
pub const SEARCH_PLACEHOLDER: &str = "Search...";

/// Text shown when no option survives filtering
pub const EMPTY_TEXT: &str = "No options";

/// Rows of a menu listing `option_count` options
pub(crate) fn menu_height(searchable: bool, option_count: usize) -> u16 {
    let rows = option_count.clamp(1, MAX_VISIBLE_OPTIONS) as u16;
    2 + u16::from(searchable) + rows
}

/// Area inside the menu border
pub(crate) fn menu_inner(menu: Rect) -> Rect {
    menu.inner(Margin::new(1, 1))
}

/// Line for one option row
///
/// Multi-select rows carry a check mark column. The search keyword is marked
/// wherever it occurs in the label.
pub(crate) fn option_line(
    label: &str,
    selected: bool,
    multiple: bool,
    highlighter: Option<&Highlighter>,
) -> Line<'static> {
    let base = if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let mark = Style::default().fg(Color::Black).bg(Color::Green);

    let mut line = match highlighter {
        Some(h) => h.line(label, base, mark),
        None => Line::from(Span::styled(label.to_string(), base)),
    };
    if multiple {
        let check = if selected { "✓ " } else { "  " };
        line.spans.insert(0, Span::styled(check, base));
    }
    line
}

/// Owned menu widget, drawn inline or through a portal
pub(crate) struct MenuView {
    /// Current search text; `None` when the field isn't searchable
    pub search: Option<String>,
    /// One line per visible option, already scrolled
    pub rows: Vec<Line<'static>>,
    pub focused: bool,
}

impl Widget for MenuView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .render(area, buf);

        let inner = menu_inner(area);
        if inner.is_empty() {
            return;
        }

        let mut y = inner.y;
        if let Some(search) = &self.search {
            TextInput::line(search, SEARCH_PLACEHOLDER).render(Rect { y, height: 1, ..inner }, buf);
            y += 1;
        }

        if self.rows.is_empty() {
            if y < inner.bottom() {
                Span::styled(EMPTY_TEXT, Style::default().fg(Color::DarkGray))
                    .render(Rect { y, height: 1, ..inner }, buf);
            }
            return;
        }

        for line in self.rows {
            if y >= inner.bottom() {
                break;
            }
            line.render(Rect { y, height: 1, ..inner }, buf);
            y += 1;
        }
    }
}
