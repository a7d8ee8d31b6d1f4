//! The match engine: evaluates selector patterns against a document and
//! memoizes per-segment results.
//!
//! A pattern is a sequence of [`Segment`]s evaluated left to right, each
//! producing a new working set from the previous one. After every
//! non-final segment the engine descends one level: items with children
//! are replaced by their children, childless items are kept as-is, and
//! duplicates keep their first position. This
//! is what makes `Slide / Title` mean "Title elements inside Slide
//! elements" rather than two independent queries.
//!
//! Results are memoized per (working-set identity, segment, is-final)
//! within one engine session. A hit short-circuits the whole step,
//! including the descend. The cache is never invalidated mid-session;
//! callers that swap documents must call [`MatchEngine::reset`].

use std::collections::{HashMap, HashSet};

use log::debug;

use super::container::ElementContainer;
use super::matcher::{Segment, SegmentKey};
use crate::doc::{Document, ElementId};

type CacheKey = (u64, SegmentKey, bool);

/// Per-session selector evaluator with memoized prefix results.
#[derive(Default)]
pub struct MatchEngine {
    cache: HashMap<CacheKey, ElementContainer>,
    root_set: Option<ElementContainer>,
}

impl MatchEngine {
    /// Create an engine with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The working set every pattern starts from: the full top-level
    /// slide sequence. Created once per session so repeated `match`
    /// calls share prefix identity.
    fn root_set(&mut self, doc: &Document) -> ElementContainer {
        self.root_set
            .get_or_insert_with(|| ElementContainer::new(doc.slides().to_vec()))
            .clone()
    }

    /// Evaluate a pattern and return the matched set.
    ///
    /// An empty pattern yields the full slide sequence. An empty result
    /// is valid; callers must tolerate no-ops.
    pub fn match_path(&mut self, doc: &Document, segments: &[Segment]) -> ElementContainer {
        let mut current = self.root_set(doc);
        let last = segments.len().saturating_sub(1);

        for (index, segment) in segments.iter().enumerate() {
            let is_final = index == last;
            let key = (current.set_id(), segment.cache_key(), is_final);

            if let Some(hit) = self.cache.get(&key) {
                debug!("match cache hit for segment {:?}", segment);
                current = hit.clone();
                continue;
            }

            let mut ids = match segment {
                Segment::Reset => doc.slides().to_vec(),
                Segment::Any => current.ids().to_vec(),
                Segment::Descendants => descendant_closure(doc, current.ids()),
                Segment::Is(matcher) => current
                    .iter()
                    .filter(|&id| doc.get(id).is_some_and(|data| matcher.accepts(data)))
                    .collect(),
            };

            // A reset leaves the working set at slide level; every other
            // non-final segment descends one level.
            if !is_final && !matches!(segment, Segment::Reset) {
                ids = descend(doc, &ids);
            }

            let next = ElementContainer::new(ids);
            self.cache.insert(key, next.clone());
            current = next;
        }

        current
    }

    /// Drop all cached results, including the root working set.
    ///
    /// Required when the caller starts styling a different document.
    pub fn reset(&mut self) {
        self.cache.clear();
        self.root_set = None;
    }

    /// Number of memoized segment results (diagnostics).
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

/// Replace each item that has children by its children; keep childless
/// items as-is. When the incoming set contains both an element and its
/// parent (a `**` expansion does), the element would be emitted twice;
/// only the first occurrence is kept.
fn descend(doc: &Document, ids: &[ElementId]) -> Vec<ElementId> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for &id in ids {
        let children = doc.children(id);
        if children.is_empty() {
            if seen.insert(id) {
                result.push(id);
            }
        } else {
            for &child in children {
                if seen.insert(child) {
                    result.push(child);
                }
            }
        }
    }
    result
}

/// Depth-first closure: each item plus all of its reachable
/// descendants, deduplicated across overlapping subtrees.
fn descendant_closure(doc: &Document, ids: &[ElementId]) -> Vec<ElementId> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for &id in ids {
        collect(doc, id, &mut seen, &mut result);
    }
    result
}

fn collect(
    doc: &Document,
    id: ElementId,
    seen: &mut HashSet<ElementId>,
    result: &mut Vec<ElementId>,
) {
    if !seen.insert(id) {
        return;
    }
    result.push(id);
    for &child in doc.children(id) {
        collect(doc, child, seen, result);
    }
}
