//! # easel
//!
//! A selector-driven theme engine for slide presentations.
//!
//! easel styles a deck of slides through theme packages: directories
//! holding a small rule script that matches elements by path patterns
//! and attaches properties and draw-time hooks. Themes compose by
//! inclusion (a `red` theme layering over a shared `base`), lengths are
//! written in a fixed 120x90 logical space and normalized to the output
//! size, and drawing happens behind an opaque [`render::Canvas`] seam
//! via a simulate-then-commit hook protocol.
//!
//! ## Core Systems
//!
//! - **[`geometry`]** — Offset, Size, Region, Spacing primitives and
//!   logical-unit normalization with ceiling rounding
//! - **[`doc`]** — Slotmap-backed element arena with tree operations
//! - **[`select`]** — Matchers, matched-set containers, and the
//!   memoizing path-pattern match engine
//! - **[`hook`]** — Named two-phase draw hooks and composite builders
//!   (indent, frame, mark, numbering)
//! - **[`render`]** — The Canvas trait and the simulate/commit driver
//! - **[`theme`]** — Theme discovery, the rule-script DSL (logos
//!   tokenizer + recursive-descent parser), and the cascading applier
//! - **[`testing`]** — RecordingCanvas test double

// Foundation
pub mod geometry;

// Core systems
pub mod doc;
pub mod hook;
pub mod select;

// Rendering
pub mod render;

// Themes
pub mod theme;

// Test support
pub mod testing;
