//! The drawing seam: primitives the engine invokes but never implements.

use crate::geometry::{Offset, Region, Size};

/// Drawing primitives supplied by the host renderer.
///
/// The engine treats these as opaque: it only calls them from
/// commit-phase post-draw hooks, plus [`Canvas::text_extent`] from
/// pre-draw hooks (measurement has no visible effect). Pixel formats,
/// color parsing, and font handling are entirely the host's concern;
/// colors are passed through as the strings rule scripts wrote.
pub trait Canvas {
    /// Draw a rectangle outline (or a filled one).
    fn draw_rect(&mut self, region: Region, color: &str, line_width: i32, filled: bool);

    /// Draw a straight line.
    fn draw_line(&mut self, from: Offset, to: Offset, color: &str, line_width: i32);

    /// Draw a text run with its top-left corner at `pos`.
    fn draw_text(&mut self, pos: Offset, text: &str, color: &str);

    /// Measure the extent a text run would occupy.
    fn text_extent(&self, text: &str) -> Size;
}
