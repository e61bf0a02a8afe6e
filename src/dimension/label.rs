use crate::math::{Point2, Rect};

use super::DimContext;

/// Measures label text in screen pixels.
pub trait LabelMetrics {
    /// Width and height of `text` in pixels.
    fn text_size(&self, text: &str) -> (f64, f64);
}

/// Fixed-pitch text measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub char_width: f64,
    pub line_height: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            line_height: 14.0,
        }
    }
}

impl LabelMetrics for MonospaceMetrics {
    fn text_size(&self, text: &str) -> (f64, f64) {
        #[allow(clippy::cast_precision_loss)]
        let chars = text.chars().count() as f64;
        (chars * self.char_width, self.line_height)
    }
}

/// A dimension's text, centered on its anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct DimLabel {
    text: String,
    pos: Point2,
    rect: Rect,
}

impl DimLabel {
    /// Lays out `text` centered on `pos`.
    ///
    /// The bounding rectangle is the text extent padded by 5 % of its
    /// width on every side, converted to scene units.
    #[must_use]
    pub fn new(text: String, pos: Point2, ctx: &DimContext<'_>) -> Self {
        let (w, h) = label_extent(&text, ctx);
        let rect = Rect::from_center(pos, w, h);
        Self { text, pos, rect }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn pos(&self) -> Point2 {
        self.pos
    }

    /// Bounding rectangle in scene units.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }
}

/// Scene width and height of the bounding rectangle of a label showing
/// `text`.
#[must_use]
pub fn label_extent(text: &str, ctx: &DimContext<'_>) -> (f64, f64) {
    let (w, h) = ctx.metrics().text_size(text);
    let pad = w * 0.05;
    (
        ctx.pixels_to_scene(w + 2.0 * pad),
        ctx.pixels_to_scene(h + 2.0 * pad),
    )
}
