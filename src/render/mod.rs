//! Rendering seam: the Canvas trait and the two-phase draw driver.

pub mod canvas;
pub mod draw;

pub use canvas::Canvas;
pub use draw::{draw_element, draw_subtree, DrawContext};
