//! Document model: slotmap-backed element arena with deck/slide structure.

pub mod element;
pub mod tree;

pub use element::{ElementData, ElementId};
pub use tree::Document;
