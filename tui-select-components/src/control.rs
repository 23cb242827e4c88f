//! The always-visible part of a select field: value, placeholder or chips

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Glyph of a chip's remove control
pub const CHIP_REMOVE: &str = "×";

/// Columns a chip adds around its label: `" {label} × "`
const CHIP_CHROME: u16 = 4;

/// Columns reserved at the right edge for the open/closed indicator
const INDICATOR_WIDTH: u16 = 2;

/// Where one chip landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipSlot {
    /// Index into the selection
    pub index: usize,
    /// Whole chip
    pub area: Rect,
    /// The `×` cell
    pub remove: Rect,
    /// Label columns available after truncation
    pub label_width: u16,
}

/// What the control shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ControlContent {
    Placeholder(String),
    Label(String),
    Chips(Vec<String>),
}

/// Content area of a control drawn into `area`
pub(crate) fn control_inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2 + INDICATOR_WIDTH),
        height: area.height.saturating_sub(2),
    }
}

/// Lay chips out left to right, wrapping onto new rows inside `inner`
///
/// Chips are separated by one column. A chip wider than the whole row has its
/// label truncated so the remove control stays visible. Chips on rows below
/// `inner` are still placed; callers clip by `inner.height`.
pub fn layout_chips(labels: &[String], inner: Rect) -> Vec<ChipSlot> {
    let mut slots = Vec::with_capacity(labels.len());
    let max_label = inner.width.saturating_sub(CHIP_CHROME);
    let (mut col, mut row) = (0u16, 0u16);

    for (index, label) in labels.iter().enumerate() {
        let label_width = u16::try_from(label.width())
            .unwrap_or(u16::MAX)
            .min(max_label);
        let chip_width = label_width + CHIP_CHROME;

        if col > 0 && col + chip_width > inner.width {
            col = 0;
            row += 1;
        }

        let x = inner.x + col;
        let y = inner.y + row;
        slots.push(ChipSlot {
            index,
            area: Rect::new(x, y, chip_width, 1),
            remove: Rect::new(x + label_width + 2, y, 1, 1),
            label_width,
        });
        col += chip_width + 1;
    }
    slots
}

/// Rows the chips need at `inner_width`, at least one
pub(crate) fn chip_rows(labels: &[String], inner_width: u16) -> u16 {
    layout_chips(labels, Rect::new(0, 0, inner_width, u16::MAX))
        .last()
        .map_or(1, |slot| slot.area.y + 1)
}

/// Height of a control `width` columns wide showing `content`
pub(crate) fn control_height(content: &ControlContent, width: u16) -> u16 {
    let rows = match content {
        ControlContent::Chips(labels) => {
            chip_rows(labels, width.saturating_sub(2 + INDICATOR_WIDTH))
        }
        _ => 1,
    };
    rows + 2
}

/// Cut `text` to `width` display columns, marking the cut with `…`
pub(crate) fn truncate_to_width(text: &str, width: u16) -> String {
    let width = usize::from(width);
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Owned control widget
pub(crate) struct ControlView {
    pub content: ControlContent,
    pub focused: bool,
    pub open: bool,
}

impl ControlView {
    fn chip_style() -> Style {
        Style::default().fg(Color::White).bg(Color::Rgb(60, 60, 72))
    }
}

impl Widget for ControlView {
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

        let inner = control_inner(area);
        if inner.is_empty() {
            return;
        }

        match self.content {
            ControlContent::Placeholder(text) => {
                Paragraph::new(Span::styled(
                    truncate_to_width(&text, inner.width),
                    Style::default().fg(Color::DarkGray),
                ))
                .render(inner, buf);
            }
            ControlContent::Label(text) => {
                Paragraph::new(truncate_to_width(&text, inner.width)).render(inner, buf);
            }
            ControlContent::Chips(labels) => {
                for slot in layout_chips(&labels, inner) {
                    if slot.area.y >= inner.bottom() {
                        break;
                    }
                    let line = Line::from(vec![
                        Span::styled(" ", Self::chip_style()),
                        Span::styled(
                            truncate_to_width(&labels[slot.index], slot.label_width),
                            Self::chip_style(),
                        ),
                        Span::styled(" ", Self::chip_style()),
                        Span::styled(
                            CHIP_REMOVE,
                            Self::chip_style()
                                .fg(Color::Gray)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(" ", Self::chip_style()),
                    ]);
                    line.render(slot.area.intersection(inner), buf);
                }
            }
        }

        let indicator = if self.open { "▴" } else { "▾" };
        let x = area.right().saturating_sub(INDICATOR_WIDTH);
        if x > inner.x && area.height > 2 {
            buf.set_string(x, area.y + 1, indicator, border);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_chips_flow_left_to_right() {
        let slots = layout_chips(&labels(&["Apple", "Fig"]), Rect::new(1, 1, 30, 1));

        assert_eq!(slots[0].area, Rect::new(1, 1, 9, 1));
        assert_eq!(slots[0].remove, Rect::new(8, 1, 1, 1));
        // One column gap, then the next chip
        assert_eq!(slots[1].area, Rect::new(11, 1, 7, 1));
        assert_eq!(slots[1].remove, Rect::new(16, 1, 1, 1));
    }

    #[test]
    fn test_chips_wrap_to_next_row() {
        let slots = layout_chips(&labels(&["Apple", "Banana"]), Rect::new(0, 0, 14, 3));

        assert_eq!(slots[0].area.y, 0);
        assert_eq!(slots[1].area, Rect::new(0, 1, 10, 1));
        assert_eq!(chip_rows(&labels(&["Apple", "Banana"]), 14), 2);
    }

    #[test]
    fn test_long_chip_keeps_remove_visible() {
        let slots = layout_chips(&labels(&["A very long label"]), Rect::new(0, 0, 10, 1));

        assert_eq!(slots[0].label_width, 6);
        assert!(slots[0].remove.right() <= 10);
    }

    #[test]
    fn test_control_height_grows_with_chips() {
        let one_row = ControlContent::Chips(labels(&["A", "B"]));
        assert_eq!(control_height(&one_row, 40), 3);

        let wrapped = ControlContent::Chips(labels(&["Apple", "Banana", "Cherry"]));
        assert_eq!(control_height(&wrapped, 18), 5);

        assert_eq!(control_height(&ControlContent::Placeholder("x".into()), 5), 3);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Banana", 10), "Banana");
        assert_eq!(truncate_to_width("Banana", 4), "Ban…");
        assert_eq!(truncate_to_width("日本語", 4), "日…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
