//! Top-level layers rendered above the regular UI
//!
//! A component that wants to escape the area its parent gave it (a dropdown
//! menu that must not be clipped, for instance) mounts its content through the
//! [`Portal`] capability. The host owns a [`LayerStack`], passes it to the
//! components while rendering the base UI, then flushes it on top:
//!
//! ```ignore
//! terminal.draw(|frame| {
//!     let mut layers = LayerStack::new();
//!     field.render(frame, area, props.portal(&mut layers));
//!     layers.flush(frame);
//! })?;
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Clear, Widget},
    Frame,
};

/// Owned content that can be drawn into a layer
///
/// Implemented for every ratatui [`Widget`].
pub trait LayerContent {
    /// Draw into `area` of `buf`
    fn render_layer(self: Box<Self>, area: Rect, buf: &mut Buffer);
}

impl<W: Widget> LayerContent for W {
    fn render_layer(self: Box<Self>, area: Rect, buf: &mut Buffer) {
        (*self).render(area, buf);
    }
}

/// Capability to render content into a detached top-level layer
pub trait Portal {
    /// Mount `content` at `area` (frame coordinates), stacked by `z_index`
    fn mount(&mut self, z_index: u16, area: Rect, content: Box<dyn LayerContent>);
}

struct Layer {
    z_index: u16,
    area: Rect,
    content: Box<dyn LayerContent>,
}

/// Collects mounted layers during a frame and draws them last
#[derive(Default)]
pub struct LayerStack {
    layers: Vec<Layer>,
}

impl std::fmt::Debug for LayerStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerStack")
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl LayerStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mounted layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether nothing is mounted
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Mounted `(z_index, area)` pairs in mount order
    pub fn areas(&self) -> impl Iterator<Item = (u16, Rect)> + '_ {
        self.layers.iter().map(|l| (l.z_index, l.area))
    }

    /// Render every mounted layer in ascending z order and empty the stack
    ///
    /// Layers with the same z index keep their mount order. Each layer's area
    /// is clamped to the frame and cleared before its content is drawn.
    pub fn flush(&mut self, frame: &mut Frame) {
        let bounds = frame.area();
        self.flush_into(bounds, frame.buffer_mut());
    }

    /// [`flush`](Self::flush) against a raw buffer
    pub fn flush_into(&mut self, bounds: Rect, buf: &mut Buffer) {
        let mut layers = std::mem::take(&mut self.layers);
        layers.sort_by_key(|l| l.z_index);
        for layer in layers {
            let area = layer.area.intersection(bounds);
            if area.is_empty() {
                continue;
            }
            Clear.render(area, buf);
            layer.content.render_layer(area, buf);
        }
    }
}

impl Portal for LayerStack {
    fn mount(&mut self, z_index: u16, area: Rect, content: Box<dyn LayerContent>) {
        tracing::trace!(z_index, ?area, "layer mounted");
        self.layers.push(Layer {
            z_index,
            area,
            content,
        });
    }
}

/// Position a `height`-row box under `anchor`, or above it when there is no room
///
/// The box has the anchor's width and is clamped to `bounds`. If it fits on
/// neither side it goes below and is truncated.
pub fn anchored_rect(anchor: Rect, height: u16, bounds: Rect) -> Rect {
    let width = anchor.width.min(bounds.width);
    let x = anchor
        .x
        .min(bounds.right().saturating_sub(width))
        .max(bounds.x);

    let room_below = bounds.bottom().saturating_sub(anchor.bottom());
    let room_above = anchor.y.saturating_sub(bounds.y);

    let rect = if height <= room_below {
        Rect::new(x, anchor.bottom(), width, height)
    } else if height <= room_above {
        Rect::new(x, anchor.y - height, width, height)
    } else {
        Rect::new(x, anchor.bottom(), width, room_below)
    };
    rect.intersection(bounds)
}
