//! A canvas that records draw calls instead of producing pixels.

use crate::geometry::{Offset, Region, Size};
use crate::render::Canvas;

/// One recorded drawing primitive invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawOp {
    Rect { region: Region, color: String, line_width: i32, filled: bool },
    Line { from: Offset, to: Offset, color: String, line_width: i32 },
    Text { pos: Offset, text: String, color: String },
}

/// Records every draw call for later assertions. Text metrics use a
/// fixed monospace cell (8x16 pixels per character) so measurements
/// are deterministic.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

/// Fixed glyph cell used by [`RecordingCanvas::text_extent`].
pub const CELL: Size = Size { width: 8, height: 16 };

impl RecordingCanvas {
    /// Create an empty recording canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded text operations, in call order.
    pub fn texts(&self) -> Vec<&DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Text { .. })).collect()
    }

    /// The recorded rectangle operations, in call order.
    pub fn rects(&self) -> Vec<&DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Rect { .. })).collect()
    }
}

impl Canvas for RecordingCanvas {
    fn draw_rect(&mut self, region: Region, color: &str, line_width: i32, filled: bool) {
        self.ops.push(DrawOp::Rect { region, color: color.to_owned(), line_width, filled });
    }

    fn draw_line(&mut self, from: Offset, to: Offset, color: &str, line_width: i32) {
        self.ops.push(DrawOp::Line { from, to, color: color.to_owned(), line_width });
    }

    fn draw_text(&mut self, pos: Offset, text: &str, color: &str) {
        self.ops.push(DrawOp::Text { pos, text: text.to_owned(), color: color.to_owned() });
    }

    fn text_extent(&self, text: &str) -> Size {
        Size::new(text.chars().count() as i32 * CELL.width, CELL.height)
    }
}
