//! Selector engine: matchers, matched-set containers, and the memoizing
//! match engine.

pub mod container;
pub mod engine;
pub mod matcher;

pub use container::ElementContainer;
pub use engine::MatchEngine;
pub use matcher::{Matcher, MatcherKey, Segment, SegmentKey};
