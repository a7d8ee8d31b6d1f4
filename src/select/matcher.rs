//! Matcher abstraction: the acceptance test one path segment applies to
//! an element.
//!
//! The match engine depends only on [`Matcher::accepts`] and the cache
//! key projection, not on the concrete matcher kinds.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use regex::Regex;

use crate::doc::ElementData;

/// Monotonic source for predicate identity keys.
static NEXT_PREDICATE_KEY: AtomicU64 = AtomicU64::new(1);

/// A single acceptance test for elements.
#[derive(Clone)]
pub enum Matcher {
    /// Matches elements whose author-assigned `name` equals the value.
    ExactValue(String),
    /// Matches elements whose type tag equals the value.
    TypeTag(String),
    /// Matches elements whose type tag matches the pattern.
    Regex(Regex),
    /// Matches elements accepted by an arbitrary predicate.
    ///
    /// Predicates are keyed by a process-unique id so the identity-based
    /// match cache can distinguish them.
    Predicate {
        key: u64,
        f: Rc<dyn Fn(&ElementData) -> bool>,
    },
}

impl Matcher {
    /// Build an exact-value matcher.
    pub fn exact(value: impl Into<String>) -> Self {
        Matcher::ExactValue(value.into())
    }

    /// Build a type-tag matcher.
    pub fn type_tag(tag: impl Into<String>) -> Self {
        Matcher::TypeTag(tag.into())
    }

    /// Build a regex matcher against the element type tag.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Matcher::Regex(Regex::new(pattern)?))
    }

    /// Build a predicate matcher with a fresh identity key.
    pub fn predicate(f: impl Fn(&ElementData) -> bool + 'static) -> Self {
        Matcher::Predicate {
            key: NEXT_PREDICATE_KEY.fetch_add(1, Ordering::Relaxed),
            f: Rc::new(f),
        }
    }

    /// Whether this matcher accepts the given element.
    pub fn accepts(&self, data: &ElementData) -> bool {
        match self {
            Matcher::ExactValue(value) => data.name.as_deref() == Some(value.as_str()),
            Matcher::TypeTag(tag) => data.element_type == *tag,
            Matcher::Regex(re) => re.is_match(&data.element_type),
            Matcher::Predicate { f, .. } => f(data),
        }
    }

    /// Hashable projection used as part of the match-cache key.
    pub fn cache_key(&self) -> MatcherKey {
        match self {
            Matcher::ExactValue(value) => MatcherKey::ExactValue(value.clone()),
            Matcher::TypeTag(tag) => MatcherKey::TypeTag(tag.clone()),
            Matcher::Regex(re) => MatcherKey::Regex(re.as_str().to_owned()),
            Matcher::Predicate { key, .. } => MatcherKey::Predicate(*key),
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::ExactValue(value) => f.debug_tuple("ExactValue").field(value).finish(),
            Matcher::TypeTag(tag) => f.debug_tuple("TypeTag").field(tag).finish(),
            Matcher::Regex(re) => f.debug_tuple("Regex").field(&re.as_str()).finish(),
            Matcher::Predicate { key, .. } => f.debug_tuple("Predicate").field(key).finish(),
        }
    }
}

/// Hashable stand-in for a [`Matcher`] in cache keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MatcherKey {
    ExactValue(String),
    TypeTag(String),
    Regex(String),
    Predicate(u64),
}

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

/// One step of a selector pattern, evaluated left to right.
#[derive(Clone, Debug)]
pub enum Segment {
    /// Reset the working set to the full top-level slide sequence,
    /// regardless of prior state.
    Reset,
    /// Pass the working set through unchanged ("all direct items at
    /// this level").
    Any,
    /// Expand to each item plus all of its reachable descendants,
    /// deduplicated.
    Descendants,
    /// Filter the working set with a matcher.
    Is(Matcher),
}

impl Segment {
    /// Hashable projection used as part of the match-cache key.
    pub fn cache_key(&self) -> SegmentKey {
        match self {
            Segment::Reset => SegmentKey::Reset,
            Segment::Any => SegmentKey::Any,
            Segment::Descendants => SegmentKey::Descendants,
            Segment::Is(m) => SegmentKey::Is(m.cache_key()),
        }
    }
}

/// Hashable stand-in for a [`Segment`] in cache keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKey {
    Reset,
    Any,
    Descendants,
    Is(MatcherKey),
}
